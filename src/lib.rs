//! Fluent test-object building for unit-test fixtures.
//!
//! This crate generates single objects or lists of objects with
//! auto-populated property values:
//!
//! - **Blueprints**: per-type property tables built by `#[derive(Buildable)]`
//!   or explicit registration, instead of runtime introspection
//! - **Deterministic values**: numbers count up, strings become
//!   `"<PropertyName><n>"`, dates step one day per object, enums cycle
//! - **Override rules**: chained closures replacing generated values, with
//!   list rules scoped to index selections ("every second element")
//! - **Constructor selection**: registered, tagged constructor signatures
//!   resolved by argument kinds, preferring exact matches over widening
//!
//! # Features
//!
//! - `macros` - `#[derive(Buildable)]` / `#[derive(VariantCycle)]` support
//!   (enabled by default)
//! - `chrono` - date and datetime property kinds (enabled by default)
//! - `uuid` - uuid property kind (enabled by default)
//! - `decimal` - decimal property and constructor-argument kind (enabled by
//!   default)
//! - `random` - random naming strategy and random position rules (enabled by
//!   default)
//! - `full` - all features enabled
//!
//! # Quick Start
//!
//! ## Building objects and lists
//!
//! ```
//! use specimen::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq, VariantCycle)]
//! enum Genre {
//!     #[default]
//!     Jazz,
//!     Swing,
//!     Bebop,
//! }
//!
//! #[derive(Debug, Default, Buildable)]
//! struct Track {
//!     id: u64,
//!     title: String,
//!     #[buildable(cycle)]
//!     genre: Genre,
//!     #[buildable(skip)]
//!     notes: String,
//! }
//!
//! # fn main() -> specimen::BuildResult<()> {
//! let track = ObjectBuilder::<Track>::new()
//!     .with(|track| track.title = "So What".to_string())
//!     .build()?;
//! assert_eq!(track.id, 1);
//! assert_eq!(track.title, "So What");
//! assert_eq!(track.genre, Genre::Jazz);
//! assert!(track.notes.is_empty());
//!
//! let tracks = ListBuilder::<Track>::of_size(10)
//!     .every(2, |track| track.title = "bonus".to_string())
//!     .build()?;
//! assert_eq!(tracks.len(), 10);
//! assert_eq!(tracks.iter().filter(|track| track.title == "bonus").count(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Selecting a constructor
//!
//! ```
//! use specimen::prelude::*;
//!
//! #[derive(Debug, Default, Buildable)]
//! struct Payment {
//!     memo: String,
//!     count: i32,
//!     rate: f32,
//! }
//!
//! impl Constructible for Payment {
//!     fn constructors() -> Vec<ConstructorSignature<Self>> {
//!         vec![
//!             ConstructorSignature::new("memo", [ParamKind::Str], |args| {
//!                 Ok(Self {
//!                     memo: args.string_at(0)?,
//!                     ..Self::default()
//!                 })
//!             }),
//!             ConstructorSignature::new("count_rate", [ParamKind::I32, ParamKind::F32], |args| {
//!                 Ok(Self {
//!                     count: args.i32_at(0)?,
//!                     rate: args.f32_at(1)?,
//!                     ..Self::default()
//!                 })
//!             }),
//!         ]
//!     }
//! }
//!
//! # fn main() -> specimen::BuildResult<()> {
//! let payment = ObjectBuilder::<Payment>::new()
//!     .with_constructor_args((5, 15.0f32))
//!     .build()?;
//! assert_eq!(payment.count, 5);
//! assert_eq!(payment.rate, 15.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ## Blueprints
//!
//! - [`Buildable`](blueprint::Buildable) trait - registers a type's
//!   [`Blueprint`](blueprint::Blueprint)
//! - [`PropertySlot`](blueprint::PropertySlot) - one auto-populated property
//! - [`VariantCycle`](blueprint::VariantCycle) - enums whose variants cycle
//!
//! ## Value generation
//!
//! - [`GeneratorSession`](generator::GeneratorSession) - per-build counters
//! - [`NamingStrategy`](generator::NamingStrategy) - sequential or random
//! - [`sequence`](generator::sequence) - process-wide named sequences
//!
//! ## Constructor resolution
//!
//! - [`Constructible`](construct::Constructible) trait - registers tagged
//!   [`ConstructorSignature`](construct::ConstructorSignature)s
//! - [`ArgValue`](construct::ArgValue) / [`ParamKind`](construct::ParamKind) -
//!   dynamically-kinded arguments and parameters
//!
//! ## Builders
//!
//! - [`ObjectBuilder`](builder::ObjectBuilder) - one object
//! - [`ListBuilder`](builder::ListBuilder) - an ordered list with
//!   [`IndexSelection`](builder::IndexSelection)-scoped rules

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blueprint;
pub mod builder;
pub mod config;
pub mod construct;
pub mod error;
pub mod generator;
pub mod prelude;

// Re-export commonly used types at crate root
pub use blueprint::{Blueprint, Buildable, PropertyKind, PropertySlot, VariantCycle};
pub use builder::{IndexSelection, ListBuilder, ObjectBuilder};
pub use config::BuilderConfig;
pub use construct::{
	ArgValue, Args, Constructible, ConstructorSignature, IntoArgValue, IntoArgs, ParamKind,
};
pub use error::{BuildError, BuildResult};
pub use generator::{GeneratorSession, NamingStrategy, Sequence};

// Re-export derive macros when available
#[cfg(feature = "macros")]
pub use specimen_macros::{Buildable, VariantCycle};
