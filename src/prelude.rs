//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the specimen crate.
//!
//! # Example
//!
//! ```
//! use specimen::prelude::*;
//!
//! // Now you have access to:
//! // - Builder types and index selections
//! // - Blueprint and constructor traits
//! // - Generator types and sequences
//! // - Error types
//! ```

// Error types
pub use crate::error::{BuildError, BuildResult};

// Builder types
pub use crate::builder::{IndexSelection, ListBuilder, ObjectBuilder};

// Blueprint types
pub use crate::blueprint::{Blueprint, Buildable, PropertyKind, PropertySlot, VariantCycle, cycled};

// Constructor types
pub use crate::construct::{
	ArgValue, Args, Constructible, ConstructorSignature, IntoArgValue, IntoArgs, ParamKind,
};

// Configuration
pub use crate::config::{BuilderConfig, default_config, reset_default_config, set_default_config};

// Generator types and sequence functions
pub use crate::generator::{
	GeneratorSession, NamingStrategy, Sequence, formatted_sequence, reset_sequence,
	reset_sequences, sequence,
};

// Re-export the derive macros when available
#[cfg(feature = "macros")]
pub use specimen_macros::{Buildable, VariantCycle};
