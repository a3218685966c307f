//! Property tables and population.
//!
//! Instead of reflecting over a type at runtime, every buildable type
//! registers a [`Blueprint`]: its default construction function plus one
//! [`PropertySlot`] per auto-populated property. Blueprints are produced by
//! `#[derive(Buildable)]` or written by hand for types that need full
//! control.
//!
//! Population walks the slot table in declaration order and asks each slot to
//! fill its property from the session. Slots only write properties that still
//! hold their type's default value, so values assigned by a constructor
//! survive the populate pass. Properties whose type has no generator support
//! are registered as opaque slots and left untouched.

use std::fmt;

use crate::generator::GeneratorSession;

/// The kind of value a property slot generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyKind {
	/// Boolean property.
	Bool,
	/// Character property.
	Char,
	/// `i8` property.
	I8,
	/// `i16` property.
	I16,
	/// `i32` property.
	I32,
	/// `i64` property.
	I64,
	/// `i128` property.
	I128,
	/// `isize` property.
	Isize,
	/// `u8` property.
	U8,
	/// `u16` property.
	U16,
	/// `u32` property.
	U32,
	/// `u64` property.
	U64,
	/// `u128` property.
	U128,
	/// `usize` property.
	Usize,
	/// `f32` property.
	F32,
	/// `f64` property.
	F64,
	/// String property.
	String,
	/// Decimal property.
	#[cfg(feature = "decimal")]
	Decimal,
	/// Date property.
	#[cfg(feature = "chrono")]
	Date,
	/// Datetime property (naive or UTC).
	#[cfg(feature = "chrono")]
	DateTime,
	/// Uuid property.
	#[cfg(feature = "uuid")]
	Uuid,
	/// Enum property cycling through a registered variant set.
	Cycle,
	/// Property filled by a caller-supplied expression or sequence.
	Custom,
	/// Property with no generator support; populating it is a no-op.
	Opaque,
}

impl fmt::Display for PropertyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Bool => "bool",
			Self::Char => "char",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::I128 => "i128",
			Self::Isize => "isize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::U128 => "u128",
			Self::Usize => "usize",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::String => "string",
			#[cfg(feature = "decimal")]
			Self::Decimal => "decimal",
			#[cfg(feature = "chrono")]
			Self::Date => "date",
			#[cfg(feature = "chrono")]
			Self::DateTime => "datetime",
			#[cfg(feature = "uuid")]
			Self::Uuid => "uuid",
			Self::Cycle => "cycle",
			Self::Custom => "custom",
			Self::Opaque => "opaque",
		};
		write!(f, "{name}")
	}
}

/// One auto-populated property of a buildable type.
///
/// The populate function receives the object under construction and the
/// build's generator session. Functions produced by `#[derive(Buildable)]`
/// leave properties alone when they no longer hold their default value;
/// hand-written slots should do the same to keep constructor-assigned values
/// intact.
pub struct PropertySlot<T> {
	name: &'static str,
	kind: PropertyKind,
	populate: fn(&mut T, &mut GeneratorSession),
}

impl<T> PropertySlot<T> {
	/// Creates a property slot.
	pub fn new(
		name: &'static str,
		kind: PropertyKind,
		populate: fn(&mut T, &mut GeneratorSession),
	) -> Self {
		Self {
			name,
			kind,
			populate,
		}
	}

	/// Creates an opaque slot whose populate function does nothing.
	pub fn opaque(name: &'static str) -> Self {
		fn noop<T>(_: &mut T, _: &mut GeneratorSession) {}
		Self {
			name,
			kind: PropertyKind::Opaque,
			populate: noop::<T>,
		}
	}

	/// Returns the property name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the property kind.
	pub fn kind(&self) -> PropertyKind {
		self.kind
	}
}

impl<T> fmt::Debug for PropertySlot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertySlot")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish()
	}
}

/// A type's registered construction function and property table.
pub struct Blueprint<T> {
	target: &'static str,
	make: fn() -> T,
	slots: Vec<PropertySlot<T>>,
}

impl<T> Blueprint<T> {
	/// Creates a blueprint with no property slots.
	///
	/// # Arguments
	///
	/// * `target` - Display name of the target type, used in diagnostics
	/// * `make` - Default construction function
	pub fn new(target: &'static str, make: fn() -> T) -> Self {
		Self {
			target,
			make,
			slots: Vec::new(),
		}
	}

	/// Adds a property slot.
	pub fn with_slot(mut self, slot: PropertySlot<T>) -> Self {
		self.slots.push(slot);
		self
	}

	/// Returns the display name of the target type.
	pub fn target(&self) -> &'static str {
		self.target
	}

	/// Returns the registered property slots.
	pub fn slots(&self) -> &[PropertySlot<T>] {
		&self.slots
	}

	/// Constructs an instance via the default construction function.
	pub fn construct(&self) -> T {
		(self.make)()
	}

	/// Populates `value`'s properties from the session.
	///
	/// Slots run in declaration order; opaque slots are skipped.
	pub fn populate(&self, value: &mut T, session: &mut GeneratorSession) {
		for slot in &self.slots {
			if matches!(slot.kind, PropertyKind::Opaque) {
				tracing::trace!(ty = self.target, property = slot.name, "skipping opaque property");
				continue;
			}
			(slot.populate)(value, session);
		}
	}
}

impl<T> fmt::Debug for Blueprint<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blueprint")
			.field("target", &self.target)
			.field("slots", &self.slots)
			.finish()
	}
}

/// A type that registers a blueprint for building and population.
///
/// Derive this with `#[derive(Buildable)]` (requires the type to implement
/// [`Default`]), or implement it by hand to control every slot:
///
/// ```
/// use specimen::{Blueprint, Buildable, PropertyKind, PropertySlot};
///
/// #[derive(Debug, Default)]
/// struct Invoice {
///     number: u32,
///     reference: String,
/// }
///
/// impl Buildable for Invoice {
///     fn blueprint() -> Blueprint<Self> {
///         Blueprint::new("Invoice", Self::default)
///             .with_slot(PropertySlot::new("number", PropertyKind::U32, |invoice, session| {
///                 if invoice.number == 0 {
///                     invoice.number = session.next_u32();
///                 }
///             }))
///             .with_slot(PropertySlot::new("reference", PropertyKind::String, |invoice, session| {
///                 if invoice.reference.is_empty() {
///                     invoice.reference = session.next_string("reference");
///                 }
///             }))
///     }
/// }
/// ```
pub trait Buildable: Sized {
	/// Returns the property table used to construct and populate instances.
	fn blueprint() -> Blueprint<Self>;
}

/// An enum whose variants can be cycled by the generator.
///
/// Derive this with `#[derive(VariantCycle)]` on an enum of unit variants;
/// the variant set follows declaration order.
pub trait VariantCycle: Clone + 'static {
	/// Returns the declared variant set.
	fn variants() -> &'static [Self];
}

/// Picks the session's next variant from `V`'s declared set.
///
/// Returns `None` when the variant set is empty.
pub fn cycled<V: VariantCycle>(session: &mut GeneratorSession) -> Option<V> {
	let variants = V::variants();
	if variants.is_empty() {
		return None;
	}
	let index = session.variant_index(variants.len());
	variants.get(index).cloned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Debug, Default, PartialEq)]
	struct Sample {
		id: u32,
		label: String,
		payload: Vec<u8>,
	}

	fn sample_blueprint() -> Blueprint<Sample> {
		Blueprint::new("Sample", Sample::default)
			.with_slot(PropertySlot::new("id", PropertyKind::U32, |sample, session| {
				if sample.id == 0 {
					sample.id = session.next_u32();
				}
			}))
			.with_slot(PropertySlot::new(
				"label",
				PropertyKind::String,
				|sample, session| {
					if sample.label.is_empty() {
						sample.label = session.next_string("label");
					}
				},
			))
			.with_slot(PropertySlot::opaque("payload"))
	}

	#[rstest]
	fn test_populate_fills_default_properties() {
		let blueprint = sample_blueprint();
		let mut session = GeneratorSession::new();
		session.advance();

		let mut sample = blueprint.construct();
		blueprint.populate(&mut sample, &mut session);

		assert_eq!(sample.id, 1);
		assert_eq!(sample.label, "label1");
	}

	#[rstest]
	fn test_populate_leaves_non_default_properties() {
		let blueprint = sample_blueprint();
		let mut session = GeneratorSession::new();
		session.advance();

		let mut sample = Sample {
			id: 42,
			..Sample::default()
		};
		blueprint.populate(&mut sample, &mut session);

		assert_eq!(sample.id, 42);
		assert_eq!(sample.label, "label1");
	}

	#[rstest]
	fn test_opaque_slots_are_no_ops() {
		let blueprint = sample_blueprint();
		let mut session = GeneratorSession::new();
		session.advance();

		let mut sample = blueprint.construct();
		blueprint.populate(&mut sample, &mut session);

		assert!(sample.payload.is_empty());
	}

	#[rstest]
	fn test_slot_metadata() {
		let blueprint = sample_blueprint();
		let names: Vec<_> = blueprint.slots().iter().map(|slot| slot.name()).collect();
		assert_eq!(names, vec!["id", "label", "payload"]);
		assert_eq!(blueprint.slots()[2].kind(), PropertyKind::Opaque);
		assert_eq!(blueprint.target(), "Sample");
	}

	#[derive(Debug, Clone, Copy, PartialEq)]
	enum Chord {
		Major,
		Minor,
		Diminished,
	}

	impl VariantCycle for Chord {
		fn variants() -> &'static [Self] {
			&[Self::Major, Self::Minor, Self::Diminished]
		}
	}

	#[rstest]
	fn test_cycled_follows_declaration_order() {
		let mut session = GeneratorSession::new();
		let mut picked = Vec::new();
		for _ in 0..4 {
			session.advance();
			picked.push(cycled::<Chord>(&mut session));
		}
		assert_eq!(
			picked,
			vec![
				Some(Chord::Major),
				Some(Chord::Minor),
				Some(Chord::Diminished),
				Some(Chord::Major),
			]
		);
	}
}
