//! Object and list builders.
//!
//! [`ObjectBuilder`] produces one instance; [`ListBuilder`] produces an
//! ordered list sharing a single generator session, so sequential values
//! stay distinct across the whole list. Both are configured through chained
//! calls and finished with a terminal [`build`](ObjectBuilder::build);
//! builders are one-shot and reject a second build with
//! [`BuildError::AlreadyBuilt`].
//!
//! Override rules run after auto-population in insertion order, so the last
//! rule touching a property wins. On lists, every rule is scoped by an
//! [`IndexSelection`]; selections that do not fit the list size fail the
//! build before any element is produced.

use std::fmt;

#[cfg(feature = "random")]
use rand::{SeedableRng, rngs::StdRng};

use crate::blueprint::{Blueprint, Buildable};
use crate::config::{self, BuilderConfig};
use crate::construct::{Constructible, IntoArgs, resolve, resolve_tagged};
use crate::error::{BuildError, BuildResult};
use crate::generator::GeneratorSession;

type OverrideRule<T> = Box<dyn FnMut(&mut T)>;
type ConstructorCall<T> = Box<dyn Fn() -> BuildResult<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
	Configuring,
	Built,
}

/// The list indices an override rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IndexSelection {
	/// Every index.
	All,
	/// The first `n` indices.
	First(usize),
	/// The last `n` indices.
	Last(usize),
	/// A single index.
	Exactly(usize),
	/// A half-open index range.
	Section {
		/// First selected index.
		start: usize,
		/// One past the last selected index.
		end: usize,
	},
	/// Every `step`-th index starting at `start`.
	Step {
		/// First selected index.
		start: usize,
		/// Distance between selected indices.
		step: usize,
	},
	/// `n` distinct indices chosen at random.
	#[cfg(feature = "random")]
	Random(usize),
}

impl IndexSelection {
	/// Checks that the selection fits a list of `size` elements.
	pub(crate) fn validate(&self, size: usize) -> BuildResult<()> {
		let fits = match *self {
			Self::All => true,
			Self::First(count) | Self::Last(count) => count <= size,
			Self::Exactly(index) => index < size,
			Self::Section { start, end } => start < end && end <= size,
			Self::Step { start, step } => step >= 1 && start < size,
			#[cfg(feature = "random")]
			Self::Random(count) => count <= size,
		};
		if fits {
			Ok(())
		} else {
			Err(BuildError::PositionOutOfRange {
				rule: self.to_string(),
				size,
			})
		}
	}

	/// Resolves the selection to concrete indices.
	///
	/// Random selections are resolved by the list builder, which owns the
	/// rng; here they yield no indices.
	pub(crate) fn resolve_indices(&self, size: usize) -> Vec<usize> {
		match *self {
			Self::All => (0..size).collect(),
			Self::First(count) => (0..count).collect(),
			Self::Last(count) => (size - count..size).collect(),
			Self::Exactly(index) => vec![index],
			Self::Section { start, end } => (start..end).collect(),
			Self::Step { start, step } => (start..size).step_by(step).collect(),
			#[cfg(feature = "random")]
			Self::Random(_) => Vec::new(),
		}
	}
}

impl fmt::Display for IndexSelection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::All => write!(f, "all"),
			Self::First(count) => write!(f, "the first {count}"),
			Self::Last(count) => write!(f, "the last {count}"),
			Self::Exactly(index) => write!(f, "index {index}"),
			Self::Section { start, end } => write!(f, "section {start}..{end}"),
			Self::Step { start, step } => write!(f, "every {step} from {start}"),
			#[cfg(feature = "random")]
			Self::Random(count) => write!(f, "{count} at random"),
		}
	}
}

/// Fluent builder for a single object.
///
/// ```
/// use specimen::{Buildable, ObjectBuilder};
///
/// #[derive(Debug, Default, Buildable)]
/// struct Track {
///     title: String,
///     length_secs: u32,
/// }
///
/// # fn main() -> specimen::BuildResult<()> {
/// let track = ObjectBuilder::<Track>::new()
///     .with(|track| track.title = "Take Five".to_string())
///     .build()?;
///
/// assert_eq!(track.title, "Take Five");
/// assert_eq!(track.length_secs, 1);
/// # Ok(())
/// # }
/// ```
pub struct ObjectBuilder<T: Buildable> {
	blueprint: Blueprint<T>,
	config: BuilderConfig,
	overrides: Vec<OverrideRule<T>>,
	construct: Option<ConstructorCall<T>>,
	state: BuilderState,
}

impl<T: Buildable> ObjectBuilder<T> {
	/// Creates a builder using the process-wide default configuration.
	pub fn new() -> Self {
		Self {
			blueprint: T::blueprint(),
			config: config::default_config(),
			overrides: Vec::new(),
			construct: None,
			state: BuilderState::Configuring,
		}
	}

	/// Replaces the builder's configuration.
	pub fn with_config(mut self, config: BuilderConfig) -> Self {
		self.config = config;
		self
	}

	/// Enables or disables auto-population.
	pub fn auto_populate(mut self, enabled: bool) -> Self {
		self.config = self.config.with_auto_populate(enabled);
		self
	}

	/// Seeds the random strategies for reproducible output.
	pub fn seeded(mut self, seed: u64) -> Self {
		self.config = self.config.with_seed(seed);
		self
	}

	/// Adds an override rule, applied after auto-population.
	pub fn with(mut self, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.overrides.push(Box::new(rule));
		self
	}

	/// Adds an override rule; chaining alias of [`with`](Self::with).
	pub fn and(self, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.with(rule)
	}

	/// Builds the object.
	///
	/// Builders are one-shot: the first call transitions the builder to its
	/// terminal state, and every later call (including calls through a
	/// builder derived from this one by further chaining) returns
	/// [`BuildError::AlreadyBuilt`]. A build that fails also spends the
	/// builder.
	pub fn build(&mut self) -> BuildResult<T> {
		if self.state == BuilderState::Built {
			return Err(BuildError::AlreadyBuilt {
				target: self.blueprint.target(),
			});
		}
		self.state = BuilderState::Built;

		let mut session = GeneratorSession::from_config(&self.config);
		session.advance();

		let mut value = match &self.construct {
			Some(call) => call()?,
			None => self.blueprint.construct(),
		};
		if self.config.auto_populate() {
			self.blueprint.populate(&mut value, &mut session);
		}
		for rule in &mut self.overrides {
			rule(&mut value);
		}
		Ok(value)
	}
}

impl<T: Buildable + Constructible + 'static> ObjectBuilder<T> {
	/// Supplies constructor arguments; the matching constructor is resolved
	/// at build time. A later call replaces an earlier one.
	pub fn with_constructor_args(mut self, args: impl IntoArgs) -> Self {
		let args = args.into_args();
		self.construct = Some(Box::new(move || {
			let signature = resolve::<T>(&args)?;
			signature.invoke(&args)
		}));
		self
	}

	/// Selects a constructor by tag, bypassing resolution.
	pub fn using_constructor(mut self, tag: impl Into<String>, args: impl IntoArgs) -> Self {
		let tag = tag.into();
		let args = args.into_args();
		self.construct = Some(Box::new(move || {
			let signature = resolve_tagged::<T>(&tag, &args)?;
			signature.invoke(&args)
		}));
		self
	}
}

impl<T: Buildable> Default for ObjectBuilder<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Buildable> fmt::Debug for ObjectBuilder<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectBuilder")
			.field("target", &self.blueprint.target())
			.field("overrides", &self.overrides.len())
			.field("state", &self.state)
			.finish()
	}
}

/// Fluent builder for an ordered list of objects.
///
/// All elements share one generator session, so sequential values are
/// distinct across the list.
///
/// ```
/// use specimen::{Buildable, ListBuilder};
///
/// #[derive(Debug, Default, Buildable)]
/// struct Track {
///     id: u64,
///     title: String,
///     #[buildable(skip)]
///     explicit: bool,
/// }
///
/// # fn main() -> specimen::BuildResult<()> {
/// let tracks = ListBuilder::<Track>::of_size(10)
///     .every(2, |track| track.explicit = true)
///     .build()?;
///
/// assert_eq!(tracks.len(), 10);
/// assert_eq!(tracks.iter().filter(|track| track.explicit).count(), 5);
/// assert_eq!(tracks[9].id, 10);
/// # Ok(())
/// # }
/// ```
pub struct ListBuilder<T: Buildable> {
	size: usize,
	blueprint: Blueprint<T>,
	config: BuilderConfig,
	rules: Vec<(IndexSelection, OverrideRule<T>)>,
	construct: Option<ConstructorCall<T>>,
	state: BuilderState,
}

impl<T: Buildable> ListBuilder<T> {
	/// Creates a builder for a list of `size` elements.
	pub fn of_size(size: usize) -> Self {
		Self {
			size,
			blueprint: T::blueprint(),
			config: config::default_config(),
			rules: Vec::new(),
			construct: None,
			state: BuilderState::Configuring,
		}
	}

	/// Replaces the builder's configuration.
	pub fn with_config(mut self, config: BuilderConfig) -> Self {
		self.config = config;
		self
	}

	/// Enables or disables auto-population.
	pub fn auto_populate(mut self, enabled: bool) -> Self {
		self.config = self.config.with_auto_populate(enabled);
		self
	}

	/// Seeds the random strategies for reproducible output.
	pub fn seeded(mut self, seed: u64) -> Self {
		self.config = self.config.with_seed(seed);
		self
	}

	fn rule(mut self, selection: IndexSelection, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rules.push((selection, Box::new(rule)));
		self
	}

	/// Applies an override to every element.
	pub fn all(self, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::All, rule)
	}

	/// Applies an override to the first `count` elements.
	pub fn first(self, count: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::First(count), rule)
	}

	/// Applies an override to the last `count` elements.
	pub fn last(self, count: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::Last(count), rule)
	}

	/// Applies an override to the element at `index`.
	pub fn at(self, index: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::Exactly(index), rule)
	}

	/// Applies an override to the half-open index range `start..end`.
	pub fn section(self, start: usize, end: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::Section { start, end }, rule)
	}

	/// Applies an override to indices `0, step, 2 * step, …`.
	///
	/// `every(2, …)` selects the even indices.
	pub fn every(self, step: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::Step { start: 0, step }, rule)
	}

	/// Applies an override to indices `start, start + step, …`.
	pub fn every_from(
		self,
		start: usize,
		step: usize,
		rule: impl FnMut(&mut T) + 'static,
	) -> Self {
		self.rule(IndexSelection::Step { start, step }, rule)
	}

	/// Applies an override to `count` distinct elements chosen at random.
	///
	/// Seed the builder for a reproducible choice.
	#[cfg(feature = "random")]
	pub fn random(self, count: usize, rule: impl FnMut(&mut T) + 'static) -> Self {
		self.rule(IndexSelection::Random(count), rule)
	}

	/// Builds the list.
	///
	/// Position rules are checked against the list size before any element
	/// is produced, then applied in insertion order after auto-population.
	/// Builders are one-shot; see [`ObjectBuilder::build`].
	pub fn build(&mut self) -> BuildResult<Vec<T>> {
		if self.state == BuilderState::Built {
			return Err(BuildError::AlreadyBuilt {
				target: self.blueprint.target(),
			});
		}
		self.state = BuilderState::Built;

		for (selection, _) in &self.rules {
			selection.validate(self.size)?;
		}

		tracing::trace!(ty = self.blueprint.target(), size = self.size, "building list");
		let mut session = GeneratorSession::from_config(&self.config);
		let mut items = Vec::with_capacity(self.size);
		for _ in 0..self.size {
			session.advance();
			let mut value = match &self.construct {
				Some(call) => call()?,
				None => self.blueprint.construct(),
			};
			if self.config.auto_populate() {
				self.blueprint.populate(&mut value, &mut session);
			}
			items.push(value);
		}

		#[cfg(feature = "random")]
		let mut rng: Option<StdRng> = None;
		#[cfg(feature = "random")]
		let seed = self.config.seed();

		for (selection, rule) in &mut self.rules {
			let indices = match selection {
				#[cfg(feature = "random")]
				IndexSelection::Random(count) => {
					let rng = rng.get_or_insert_with(|| match seed {
						Some(seed) => StdRng::seed_from_u64(seed),
						None => StdRng::from_entropy(),
					});
					let mut picked = rand::seq::index::sample(rng, self.size, *count).into_vec();
					picked.sort_unstable();
					picked
				}
				other => other.resolve_indices(self.size),
			};
			for index in indices {
				rule(&mut items[index]);
			}
		}
		Ok(items)
	}
}

impl<T: Buildable + Constructible + 'static> ListBuilder<T> {
	/// Supplies constructor arguments for every element; the matching
	/// constructor is resolved at build time.
	pub fn with_constructor_args(mut self, args: impl IntoArgs) -> Self {
		let args = args.into_args();
		self.construct = Some(Box::new(move || {
			let signature = resolve::<T>(&args)?;
			signature.invoke(&args)
		}));
		self
	}

	/// Selects a constructor by tag for every element, bypassing resolution.
	pub fn using_constructor(mut self, tag: impl Into<String>, args: impl IntoArgs) -> Self {
		let tag = tag.into();
		let args = args.into_args();
		self.construct = Some(Box::new(move || {
			let signature = resolve_tagged::<T>(&tag, &args)?;
			signature.invoke(&args)
		}));
		self
	}
}

impl<T: Buildable> fmt::Debug for ListBuilder<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListBuilder")
			.field("target", &self.blueprint.target())
			.field("size", &self.size)
			.field("rules", &self.rules.len())
			.field("state", &self.state)
			.finish()
	}
}
