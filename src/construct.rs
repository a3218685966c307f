//! Constructor registration and overload resolution.
//!
//! Types that can be built through a constructor register a set of tagged
//! [`ConstructorSignature`]s via the [`Constructible`] trait. Given a tuple
//! of argument values, resolution picks the signature whose parameter kinds
//! are assignable from the argument kinds, preferring exact matches over
//! numeric widening; callers can also pick a signature by tag and skip
//! resolution.
//!
//! Assignability follows fixed widening chains (`i8 → i16 → i32 → i64`,
//! `u8 → u16 → u32 → u64`, `u8 → i16`, `u16 → i32`, `u32 → i64`,
//! `f32 → f64`), each step costing 1; integers widen into `f32`/`f64` at
//! chain-steps plus 4/5 and into decimals at a flat 8, so floating-point and
//! decimal parameters only win when no integer parameter fits. A candidate's
//! cost is the sum of its per-parameter distances; the lowest cost wins and
//! an exact tie is ambiguous. There is no narrowing and no bool/char/string
//! conversion.

use std::any::type_name;
use std::fmt;

#[cfg(feature = "decimal")]
use rust_decimal::Decimal;

use crate::error::{BuildError, BuildResult};

/// The kind of a constructor parameter or argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParamKind {
	/// Boolean parameter.
	Bool,
	/// Character parameter.
	Char,
	/// `i8` parameter.
	I8,
	/// `i16` parameter.
	I16,
	/// `i32` parameter.
	I32,
	/// `i64` parameter.
	I64,
	/// `u8` parameter.
	U8,
	/// `u16` parameter.
	U16,
	/// `u32` parameter.
	U32,
	/// `u64` parameter.
	U64,
	/// `f32` parameter.
	F32,
	/// `f64` parameter.
	F64,
	/// Decimal parameter.
	#[cfg(feature = "decimal")]
	Decimal,
	/// String parameter.
	Str,
}

impl fmt::Display for ParamKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Bool => "bool",
			Self::Char => "char",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::F32 => "f32",
			Self::F64 => "f64",
			#[cfg(feature = "decimal")]
			Self::Decimal => "decimal",
			Self::Str => "str",
		};
		write!(f, "{name}")
	}
}

/// Rank of an integer kind within its widening chain.
///
/// Returns `(signed, rank)`; `None` for non-integer kinds.
fn int_rank(kind: ParamKind) -> Option<(bool, u32)> {
	match kind {
		ParamKind::I8 => Some((true, 0)),
		ParamKind::I16 => Some((true, 1)),
		ParamKind::I32 => Some((true, 2)),
		ParamKind::I64 => Some((true, 3)),
		ParamKind::U8 => Some((false, 0)),
		ParamKind::U16 => Some((false, 1)),
		ParamKind::U32 => Some((false, 2)),
		ParamKind::U64 => Some((false, 3)),
		_ => None,
	}
}

/// Distance from an argument kind to a parameter kind along the widening
/// chains, or `None` when the argument is not assignable.
fn widening_distance(from: ParamKind, to: ParamKind) -> Option<u32> {
	if from == to {
		return Some(0);
	}
	if let Some((from_signed, from_rank)) = int_rank(from) {
		if let Some((to_signed, to_rank)) = int_rank(to) {
			// Same-signedness widening, or unsigned into a strictly wider
			// signed kind.
			let allowed = (from_signed == to_signed || (!from_signed && to_signed)) && to_rank > from_rank;
			return allowed.then(|| to_rank - from_rank);
		}
		return match to {
			ParamKind::F32 => Some((3 - from_rank) + 4),
			ParamKind::F64 => Some((3 - from_rank) + 5),
			#[cfg(feature = "decimal")]
			ParamKind::Decimal => Some(8),
			_ => None,
		};
	}
	match (from, to) {
		(ParamKind::F32, ParamKind::F64) => Some(1),
		_ => None,
	}
}

/// A dynamically-kinded constructor argument.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ArgValue {
	/// Boolean argument.
	Bool(bool),
	/// Character argument.
	Char(char),
	/// `i8` argument.
	I8(i8),
	/// `i16` argument.
	I16(i16),
	/// `i32` argument.
	I32(i32),
	/// `i64` argument.
	I64(i64),
	/// `u8` argument.
	U8(u8),
	/// `u16` argument.
	U16(u16),
	/// `u32` argument.
	U32(u32),
	/// `u64` argument.
	U64(u64),
	/// `f32` argument.
	F32(f32),
	/// `f64` argument.
	F64(f64),
	/// Decimal argument.
	#[cfg(feature = "decimal")]
	Decimal(Decimal),
	/// String argument.
	Str(String),
}

impl ArgValue {
	/// Returns the argument's kind.
	pub fn kind(&self) -> ParamKind {
		match self {
			Self::Bool(_) => ParamKind::Bool,
			Self::Char(_) => ParamKind::Char,
			Self::I8(_) => ParamKind::I8,
			Self::I16(_) => ParamKind::I16,
			Self::I32(_) => ParamKind::I32,
			Self::I64(_) => ParamKind::I64,
			Self::U8(_) => ParamKind::U8,
			Self::U16(_) => ParamKind::U16,
			Self::U32(_) => ParamKind::U32,
			Self::U64(_) => ParamKind::U64,
			Self::F32(_) => ParamKind::F32,
			Self::F64(_) => ParamKind::F64,
			#[cfg(feature = "decimal")]
			Self::Decimal(_) => ParamKind::Decimal,
			Self::Str(_) => ParamKind::Str,
		}
	}

	/// Extracts a boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match *self {
			Self::Bool(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a character.
	pub fn as_char(&self) -> Option<char> {
		match *self {
			Self::Char(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts an `i8`.
	pub fn as_i8(&self) -> Option<i8> {
		match *self {
			Self::I8(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts an `i16`, widening smaller integers.
	pub fn as_i16(&self) -> Option<i16> {
		match *self {
			Self::I8(value) => Some(value.into()),
			Self::I16(value) => Some(value),
			Self::U8(value) => Some(value.into()),
			_ => None,
		}
	}

	/// Extracts an `i32`, widening smaller integers.
	pub fn as_i32(&self) -> Option<i32> {
		match *self {
			Self::I8(value) => Some(value.into()),
			Self::I16(value) => Some(value.into()),
			Self::I32(value) => Some(value),
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			_ => None,
		}
	}

	/// Extracts an `i64`, widening smaller integers.
	pub fn as_i64(&self) -> Option<i64> {
		match *self {
			Self::I8(value) => Some(value.into()),
			Self::I16(value) => Some(value.into()),
			Self::I32(value) => Some(value.into()),
			Self::I64(value) => Some(value),
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			Self::U32(value) => Some(value.into()),
			_ => None,
		}
	}

	/// Extracts a `u8`.
	pub fn as_u8(&self) -> Option<u8> {
		match *self {
			Self::U8(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a `u16`, widening smaller unsigned integers.
	pub fn as_u16(&self) -> Option<u16> {
		match *self {
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a `u32`, widening smaller unsigned integers.
	pub fn as_u32(&self) -> Option<u32> {
		match *self {
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			Self::U32(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a `u64`, widening smaller unsigned integers.
	pub fn as_u64(&self) -> Option<u64> {
		match *self {
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			Self::U32(value) => Some(value.into()),
			Self::U64(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts an `f32`, widening integers.
	pub fn as_f32(&self) -> Option<f32> {
		match *self {
			Self::I8(value) => Some(value.into()),
			Self::I16(value) => Some(value.into()),
			Self::I32(value) => Some(value as f32),
			Self::I64(value) => Some(value as f32),
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			Self::U32(value) => Some(value as f32),
			Self::U64(value) => Some(value as f32),
			Self::F32(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts an `f64`, widening integers and `f32`.
	pub fn as_f64(&self) -> Option<f64> {
		match *self {
			Self::I8(value) => Some(value.into()),
			Self::I16(value) => Some(value.into()),
			Self::I32(value) => Some(value.into()),
			Self::I64(value) => Some(value as f64),
			Self::U8(value) => Some(value.into()),
			Self::U16(value) => Some(value.into()),
			Self::U32(value) => Some(value.into()),
			Self::U64(value) => Some(value as f64),
			Self::F32(value) => Some(value.into()),
			Self::F64(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a decimal, widening integers.
	#[cfg(feature = "decimal")]
	pub fn as_decimal(&self) -> Option<Decimal> {
		match *self {
			Self::I8(value) => Some(Decimal::from(value)),
			Self::I16(value) => Some(Decimal::from(value)),
			Self::I32(value) => Some(Decimal::from(value)),
			Self::I64(value) => Some(Decimal::from(value)),
			Self::U8(value) => Some(Decimal::from(value)),
			Self::U16(value) => Some(Decimal::from(value)),
			Self::U32(value) => Some(Decimal::from(value)),
			Self::U64(value) => Some(Decimal::from(value)),
			Self::Decimal(value) => Some(value),
			_ => None,
		}
	}

	/// Extracts a string slice.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}
}

/// Renders argument kinds for diagnostics.
pub(crate) fn kinds_string(args: &[ArgValue]) -> String {
	args.iter()
		.map(|arg| arg.kind().to_string())
		.collect::<Vec<_>>()
		.join(", ")
}

/// Checked access to the arguments of a constructor invocation.
///
/// Extraction applies the same widening rules as resolution, so a
/// constructor whose parameter is declared `I64` can extract an argument
/// supplied as `i32`.
#[derive(Debug)]
pub struct Args<'a> {
	values: &'a [ArgValue],
}

impl<'a> Args<'a> {
	pub(crate) fn new(values: &'a [ArgValue]) -> Self {
		Self { values }
	}

	/// Returns the number of supplied arguments.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if no arguments were supplied.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	fn value(&self, index: usize) -> BuildResult<&ArgValue> {
		self.values
			.get(index)
			.ok_or(BuildError::MissingArgument { index })
	}

	fn mismatch(&self, index: usize, expected: ParamKind) -> BuildError {
		let actual = self.values[index].kind();
		BuildError::ArgumentMismatch {
			index,
			expected,
			actual,
		}
	}

	/// Extracts argument `index` as a boolean.
	pub fn bool_at(&self, index: usize) -> BuildResult<bool> {
		self.value(index)?
			.as_bool()
			.ok_or_else(|| self.mismatch(index, ParamKind::Bool))
	}

	/// Extracts argument `index` as a character.
	pub fn char_at(&self, index: usize) -> BuildResult<char> {
		self.value(index)?
			.as_char()
			.ok_or_else(|| self.mismatch(index, ParamKind::Char))
	}

	/// Extracts argument `index` as an `i8`.
	pub fn i8_at(&self, index: usize) -> BuildResult<i8> {
		self.value(index)?
			.as_i8()
			.ok_or_else(|| self.mismatch(index, ParamKind::I8))
	}

	/// Extracts argument `index` as an `i16`.
	pub fn i16_at(&self, index: usize) -> BuildResult<i16> {
		self.value(index)?
			.as_i16()
			.ok_or_else(|| self.mismatch(index, ParamKind::I16))
	}

	/// Extracts argument `index` as an `i32`.
	pub fn i32_at(&self, index: usize) -> BuildResult<i32> {
		self.value(index)?
			.as_i32()
			.ok_or_else(|| self.mismatch(index, ParamKind::I32))
	}

	/// Extracts argument `index` as an `i64`.
	pub fn i64_at(&self, index: usize) -> BuildResult<i64> {
		self.value(index)?
			.as_i64()
			.ok_or_else(|| self.mismatch(index, ParamKind::I64))
	}

	/// Extracts argument `index` as a `u8`.
	pub fn u8_at(&self, index: usize) -> BuildResult<u8> {
		self.value(index)?
			.as_u8()
			.ok_or_else(|| self.mismatch(index, ParamKind::U8))
	}

	/// Extracts argument `index` as a `u16`.
	pub fn u16_at(&self, index: usize) -> BuildResult<u16> {
		self.value(index)?
			.as_u16()
			.ok_or_else(|| self.mismatch(index, ParamKind::U16))
	}

	/// Extracts argument `index` as a `u32`.
	pub fn u32_at(&self, index: usize) -> BuildResult<u32> {
		self.value(index)?
			.as_u32()
			.ok_or_else(|| self.mismatch(index, ParamKind::U32))
	}

	/// Extracts argument `index` as a `u64`.
	pub fn u64_at(&self, index: usize) -> BuildResult<u64> {
		self.value(index)?
			.as_u64()
			.ok_or_else(|| self.mismatch(index, ParamKind::U64))
	}

	/// Extracts argument `index` as an `f32`.
	pub fn f32_at(&self, index: usize) -> BuildResult<f32> {
		self.value(index)?
			.as_f32()
			.ok_or_else(|| self.mismatch(index, ParamKind::F32))
	}

	/// Extracts argument `index` as an `f64`.
	pub fn f64_at(&self, index: usize) -> BuildResult<f64> {
		self.value(index)?
			.as_f64()
			.ok_or_else(|| self.mismatch(index, ParamKind::F64))
	}

	/// Extracts argument `index` as a decimal.
	#[cfg(feature = "decimal")]
	pub fn decimal_at(&self, index: usize) -> BuildResult<Decimal> {
		self.value(index)?
			.as_decimal()
			.ok_or_else(|| self.mismatch(index, ParamKind::Decimal))
	}

	/// Extracts argument `index` as a string slice.
	pub fn str_at(&self, index: usize) -> BuildResult<&str> {
		self.value(index)?
			.as_str()
			.ok_or_else(|| self.mismatch(index, ParamKind::Str))
	}

	/// Extracts argument `index` as an owned string.
	pub fn string_at(&self, index: usize) -> BuildResult<String> {
		Ok(self.str_at(index)?.to_string())
	}
}

/// One registered constructor of a [`Constructible`] type.
pub struct ConstructorSignature<T> {
	tag: &'static str,
	params: Vec<ParamKind>,
	construct: fn(&Args<'_>) -> BuildResult<T>,
}

impl<T> ConstructorSignature<T> {
	/// Creates a signature.
	///
	/// # Arguments
	///
	/// * `tag` - Caller-visible name of the signature
	/// * `params` - Parameter kinds in declaration order
	/// * `construct` - Construction function receiving checked arguments
	pub fn new(
		tag: &'static str,
		params: impl Into<Vec<ParamKind>>,
		construct: fn(&Args<'_>) -> BuildResult<T>,
	) -> Self {
		Self {
			tag,
			params: params.into(),
			construct,
		}
	}

	/// Returns the signature's tag.
	pub fn tag(&self) -> &'static str {
		self.tag
	}

	/// Returns the parameter kinds.
	pub fn params(&self) -> &[ParamKind] {
		&self.params
	}

	/// Total widening cost of calling this signature with `args`, or `None`
	/// when the arguments do not fit.
	pub(crate) fn match_cost(&self, args: &[ArgValue]) -> Option<u32> {
		if args.len() != self.params.len() {
			return None;
		}
		let mut cost = 0;
		for (arg, param) in args.iter().zip(&self.params) {
			cost += widening_distance(arg.kind(), *param)?;
		}
		Some(cost)
	}

	/// Runs the construction function against `args`.
	pub(crate) fn invoke(&self, args: &[ArgValue]) -> BuildResult<T> {
		let args = Args::new(args);
		(self.construct)(&args)
	}
}

impl<T> fmt::Debug for ConstructorSignature<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConstructorSignature")
			.field("tag", &self.tag)
			.field("params", &self.params)
			.finish()
	}
}

/// A type with explicitly registered constructors.
///
/// ```
/// use specimen::{Args, BuildResult, Constructible, ConstructorSignature, ParamKind};
///
/// #[derive(Debug, Default)]
/// struct Payment {
///     memo: String,
///     count: i32,
///     rate: f32,
/// }
///
/// impl Constructible for Payment {
///     fn constructors() -> Vec<ConstructorSignature<Self>> {
///         vec![
///             ConstructorSignature::new("memo", [ParamKind::Str], |args| {
///                 Ok(Self {
///                     memo: args.string_at(0)?,
///                     ..Self::default()
///                 })
///             }),
///             ConstructorSignature::new("count_rate", [ParamKind::I32, ParamKind::F32], |args| {
///                 Ok(Self {
///                     count: args.i32_at(0)?,
///                     rate: args.f32_at(1)?,
///                     ..Self::default()
///                 })
///             }),
///         ]
///     }
/// }
/// ```
pub trait Constructible: Sized {
	/// Returns the registered constructor signatures.
	fn constructors() -> Vec<ConstructorSignature<Self>>;
}

/// Resolves the best-matching constructor for `args`.
pub(crate) fn resolve<T: Constructible>(args: &[ArgValue]) -> BuildResult<ConstructorSignature<T>> {
	let target = type_name::<T>();
	let mut best_cost: Option<u32> = None;
	let mut matches: Vec<ConstructorSignature<T>> = Vec::new();
	for signature in T::constructors() {
		let Some(cost) = signature.match_cost(args) else {
			continue;
		};
		match best_cost {
			Some(best) if cost > best => {}
			Some(best) if cost == best => matches.push(signature),
			_ => {
				best_cost = Some(cost);
				matches.clear();
				matches.push(signature);
			}
		}
	}
	match matches.len() {
		0 => Err(BuildError::NoMatchingConstructor {
			target,
			supplied: kinds_string(args),
		}),
		1 => {
			let signature = matches.remove(0);
			tracing::debug!(ty = target, tag = signature.tag, cost = ?best_cost, "resolved constructor");
			Ok(signature)
		}
		_ => Err(BuildError::AmbiguousConstructor {
			target,
			candidates: matches
				.iter()
				.map(|signature| format!("`{}`", signature.tag))
				.collect::<Vec<_>>()
				.join(", "),
		}),
	}
}

/// Resolves a constructor by tag, checking only assignability.
pub(crate) fn resolve_tagged<T: Constructible>(
	tag: &str,
	args: &[ArgValue],
) -> BuildResult<ConstructorSignature<T>> {
	let target = type_name::<T>();
	let Some(signature) = T::constructors()
		.into_iter()
		.find(|signature| signature.tag == tag)
	else {
		return Err(BuildError::UnknownConstructor {
			target,
			tag: tag.to_string(),
		});
	};
	if signature.match_cost(args).is_none() {
		return Err(BuildError::IncompatibleArguments {
			target,
			tag: tag.to_string(),
			supplied: kinds_string(args),
		});
	}
	Ok(signature)
}

/// Conversion of a single Rust value into an [`ArgValue`].
pub trait IntoArgValue {
	/// Converts the value.
	fn into_arg_value(self) -> ArgValue;
}

macro_rules! impl_into_arg_value {
	($($ty:ty => $variant:ident),+ $(,)?) => {
		$(
			impl IntoArgValue for $ty {
				fn into_arg_value(self) -> ArgValue {
					ArgValue::$variant(self)
				}
			}
		)+
	};
}

impl_into_arg_value! {
	bool => Bool,
	char => Char,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	String => Str,
}

#[cfg(feature = "decimal")]
impl IntoArgValue for Decimal {
	fn into_arg_value(self) -> ArgValue {
		ArgValue::Decimal(self)
	}
}

impl IntoArgValue for &str {
	fn into_arg_value(self) -> ArgValue {
		ArgValue::Str(self.to_string())
	}
}

impl IntoArgValue for ArgValue {
	fn into_arg_value(self) -> ArgValue {
		self
	}
}

/// Conversion of a value tuple into a constructor argument list.
///
/// Implemented for tuples of up to eight [`IntoArgValue`] elements and for
/// `Vec<ArgValue>`.
pub trait IntoArgs {
	/// Converts the tuple.
	fn into_args(self) -> Vec<ArgValue>;
}

impl IntoArgs for Vec<ArgValue> {
	fn into_args(self) -> Vec<ArgValue> {
		self
	}
}

impl IntoArgs for () {
	fn into_args(self) -> Vec<ArgValue> {
		Vec::new()
	}
}

macro_rules! impl_into_args {
	($($ty:ident),+) => {
		impl<$($ty: IntoArgValue),+> IntoArgs for ($($ty,)+) {
			fn into_args(self) -> Vec<ArgValue> {
				#[allow(non_snake_case)]
				let ($($ty,)+) = self;
				vec![$($ty.into_arg_value()),+]
			}
		}
	};
}

impl_into_args!(A);
impl_into_args!(A, B);
impl_into_args!(A, B, C);
impl_into_args!(A, B, C, D);
impl_into_args!(A, B, C, D, E);
impl_into_args!(A, B, C, D, E, F);
impl_into_args!(A, B, C, D, E, F, G);
impl_into_args!(A, B, C, D, E, F, G, H);
