//! Error types for the builder.
//!
//! This module defines the error types used throughout the specimen crate.

use thiserror::Error;

use crate::construct::ParamKind;

/// Errors that can occur while configuring or running a build.
#[derive(Debug, Error)]
pub enum BuildError {
	/// No registered constructor accepts the supplied arguments.
	#[error("no constructor of `{target}` accepts ({supplied})")]
	NoMatchingConstructor {
		/// Target type whose constructors were searched.
		target: &'static str,
		/// Kinds of the supplied arguments.
		supplied: String,
	},

	/// More than one registered constructor matches the supplied arguments
	/// equally well.
	#[error("constructor selection for `{target}` is ambiguous between {candidates}")]
	AmbiguousConstructor {
		/// Target type whose constructors were searched.
		target: &'static str,
		/// Tags of the tied candidates.
		candidates: String,
	},

	/// A constructor was selected by tag, but no signature with that tag is
	/// registered.
	#[error("no constructor tagged `{tag}` is registered for `{target}`")]
	UnknownConstructor {
		/// Target type whose constructors were searched.
		target: &'static str,
		/// The requested tag.
		tag: String,
	},

	/// A constructor was selected by tag, but the supplied arguments do not
	/// fit its parameter list.
	#[error("arguments ({supplied}) do not fit constructor `{tag}` of `{target}`")]
	IncompatibleArguments {
		/// Target type whose constructor was selected.
		target: &'static str,
		/// Tag of the selected constructor.
		tag: String,
		/// Kinds of the supplied arguments.
		supplied: String,
	},

	/// A constructor argument has the wrong kind for the requested extraction.
	#[error("constructor argument {index} is {actual}, expected {expected}")]
	ArgumentMismatch {
		/// Zero-based argument position.
		index: usize,
		/// Kind the constructor asked for.
		expected: ParamKind,
		/// Kind that was actually supplied.
		actual: ParamKind,
	},

	/// A constructor asked for an argument position that was not supplied.
	#[error("constructor argument {index} is missing")]
	MissingArgument {
		/// Zero-based argument position.
		index: usize,
	},

	/// The builder has already produced its output; builders are one-shot.
	#[error("builder for `{target}` has already produced its output")]
	AlreadyBuilt {
		/// Target type of the spent builder.
		target: &'static str,
	},

	/// A position rule selects indices outside the list being built.
	#[error("position rule `{rule}` does not fit a list of size {size}")]
	PositionOutOfRange {
		/// Human-readable description of the offending rule.
		rule: String,
		/// Size of the list the rule was applied to.
		size: usize,
	},
}

/// Result type alias for build operations.
pub type BuildResult<T> = Result<T, BuildError>;
