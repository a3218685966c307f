//! Procedural macros for specimen.
//!
//! This crate provides the `#[derive(Buildable)]` macro for generating
//! property blueprints and the `#[derive(VariantCycle)]` macro for
//! registering enum variant sets.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod buildable_derive;
mod variant_cycle_derive;

/// Derives a `Buildable` implementation for a struct with named fields.
///
/// The generated blueprint constructs instances through the struct's
/// [`Default`] implementation and registers one property slot per field.
/// Field types are recognized syntactically by their path tail (`u32`,
/// `String`, `Option<i64>`, `Uuid`, `NaiveDate`, `DateTime`, `Decimal`, …);
/// a type alias of a supported type is therefore not recognized and falls
/// back to an opaque slot that leaves the field at its default value.
/// Generated slots only write fields that still hold their default value, so
/// constructor-assigned values survive population.
///
/// Fields of kinds gated behind crate features (`chrono`, `uuid`, `decimal`)
/// compile only when the corresponding feature is enabled.
///
/// # Attributes
///
/// - `#[buildable(skip)]` - never auto-populate this field
/// - `#[buildable(default = value)]` - populate with a fixed value instead
///   of a generated one
/// - `#[buildable(sequence = "format")]` - fill a `String` field from the
///   process-wide sequence named `Type.field`, replacing `{n}` in the format
/// - `#[buildable(cycle)]` - cycle the variants of a field whose type
///   derives `VariantCycle`; applied unconditionally, even over
///   constructor-assigned values
///
/// # Example
///
/// ```ignore
/// use specimen::Buildable;
///
/// #[derive(Debug, Default, Buildable)]
/// pub struct User {
///     pub id: u64,
///
///     pub username: String,
///
///     #[buildable(sequence = "user_{n}")]
///     pub code: String,
///
///     #[buildable(default = true)]
///     pub is_active: bool,
///
///     #[buildable(skip)]
///     pub password_hash: String,
/// }
/// ```
///
/// This generates:
///
/// ```ignore
/// impl specimen::Buildable for User {
///     fn blueprint() -> specimen::Blueprint<Self> {
///         specimen::Blueprint::new("User", <Self as Default>::default)
///             .with_slot(specimen::PropertySlot::new("id", specimen::PropertyKind::U64, |object, session| {
///                 if object.id == <u64 as Default>::default() {
///                     object.id = session.next_u64();
///                 }
///             }))
///             // … one slot per remaining field …
///     }
/// }
/// ```
#[proc_macro_derive(Buildable, attributes(buildable))]
pub fn derive_buildable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	buildable_derive::derive_buildable_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}

/// Derives a `VariantCycle` implementation for an enum of unit variants.
///
/// The variant set follows declaration order; the generator cycles through
/// it when populating fields marked `#[buildable(cycle)]`.
///
/// # Example
///
/// ```ignore
/// use specimen::VariantCycle;
///
/// #[derive(Debug, Clone, Copy, VariantCycle)]
/// pub enum Status {
///     Pending,
///     Active,
///     Closed,
/// }
/// ```
#[proc_macro_derive(VariantCycle)]
pub fn derive_variant_cycle(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	variant_cycle_derive::derive_variant_cycle_impl(input)
		.unwrap_or_else(|err| err.to_compile_error())
		.into()
}
