//! Implementation of the `Buildable` derive macro.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
	Data, DeriveInput, Expr, Field, Fields, GenericArgument, Ident, LitStr, PathArguments, Result,
	Type,
};

/// Parsed `#[buildable(...)]` attributes of one field.
struct FieldAttrs {
	skip: bool,
	cycle: bool,
	default: Option<Expr>,
	sequence: Option<String>,
}

impl FieldAttrs {
	fn parse(field: &Field) -> Result<Self> {
		let mut attrs = Self {
			skip: false,
			cycle: false,
			default: None,
			sequence: None,
		};
		for attr in &field.attrs {
			if !attr.path().is_ident("buildable") {
				continue;
			}
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("skip") {
					attrs.skip = true;
					Ok(())
				} else if meta.path.is_ident("cycle") {
					attrs.cycle = true;
					Ok(())
				} else if meta.path.is_ident("default") {
					let expr: Expr = meta.value()?.parse()?;
					attrs.default = Some(expr);
					Ok(())
				} else if meta.path.is_ident("sequence") {
					let lit: LitStr = meta.value()?.parse()?;
					attrs.sequence = Some(lit.value());
					Ok(())
				} else {
					Err(meta.error(
						"unsupported `buildable` attribute; expected `skip`, `cycle`, \
						 `default = ...`, or `sequence = \"...\"`",
					))
				}
			})?;
		}
		Ok(attrs)
	}
}

pub(crate) fn derive_buildable_impl(input: DeriveInput) -> Result<TokenStream> {
	let ident = &input.ident;
	let target_label = ident.to_string();

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			ident,
			"`Buildable` can only be derived for structs; derive `VariantCycle` for enums",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			ident,
			"`Buildable` requires a struct with named fields",
		));
	};

	let mut slots = Vec::new();
	for field in &fields.named {
		let attrs = FieldAttrs::parse(field)?;
		if attrs.skip {
			continue;
		}
		let Some(field_ident) = &field.ident else {
			continue;
		};
		let name = field_ident.to_string();
		let slot = if let Some(expr) = &attrs.default {
			fixed_slot(field_ident, &name, expr)
		} else if let Some(format) = &attrs.sequence {
			sequence_slot(field, field_ident, &name, &target_label, format)?
		} else if attrs.cycle {
			cycle_slot(field_ident, &name)
		} else {
			value_slot(field_ident, &name, &field.ty)
		};
		slots.push(slot);
	}

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	Ok(quote! {
		#[automatically_derived]
		impl #impl_generics ::specimen::Buildable for #ident #ty_generics #where_clause {
			#[allow(clippy::float_cmp)]
			fn blueprint() -> ::specimen::Blueprint<Self> {
				::specimen::Blueprint::new(
					#target_label,
					<Self as ::core::default::Default>::default,
				)
				#( .with_slot(#slots) )*
			}
		}
	})
}

/// Slot for `#[buildable(default = ...)]`: assigns the fixed expression.
fn fixed_slot(field: &Ident, name: &str, expr: &Expr) -> TokenStream {
	quote! {
		::specimen::PropertySlot::new(
			#name,
			::specimen::PropertyKind::Custom,
			|object, _session| {
				object.#field = (#expr).into();
			},
		)
	}
}

/// Slot for `#[buildable(sequence = "...")]`: fills a string field from the
/// process-wide sequence named `Type.field`.
fn sequence_slot(
	source: &Field,
	field: &Ident,
	name: &str,
	target: &str,
	format: &str,
) -> Result<TokenStream> {
	if scalar_of(&source.ty).map(|(kind, _, _)| kind) != Some("String") {
		return Err(syn::Error::new_spanned(
			&source.ty,
			"`sequence` requires a `String` field",
		));
	}
	let sequence_name = format!("{target}.{name}");
	Ok(quote! {
		::specimen::PropertySlot::new(
			#name,
			::specimen::PropertyKind::Custom,
			|object, _session| {
				if object.#field.is_empty() {
					object.#field =
						::specimen::generator::formatted_sequence(#sequence_name, #format);
				}
			},
		)
	})
}

/// Slot for `#[buildable(cycle)]`: picks the session's next variant.
fn cycle_slot(field: &Ident, name: &str) -> TokenStream {
	quote! {
		::specimen::PropertySlot::new(
			#name,
			::specimen::PropertyKind::Cycle,
			|object, session| {
				if let ::core::option::Option::Some(value) =
					::specimen::blueprint::cycled(session)
				{
					object.#field = value;
				}
			},
		)
	}
}

/// Slot for an unannotated field: generate by recognized kind, or register
/// an opaque no-op slot.
fn value_slot(field: &Ident, name: &str, ty: &Type) -> TokenStream {
	if let Some(inner) = option_inner(ty) {
		let Some((kind, method, needs_name)) = scalar_of(inner) else {
			return quote! { ::specimen::PropertySlot::opaque(#name) };
		};
		let kind = Ident::new(kind, Span::call_site());
		let call = session_call(method, name, needs_name);
		return quote! {
			::specimen::PropertySlot::new(
				#name,
				::specimen::PropertyKind::#kind,
				|object, session| {
					if object.#field.is_none() {
						object.#field = ::core::option::Option::Some(#call);
					}
				},
			)
		};
	}
	let Some((kind, method, needs_name)) = scalar_of(ty) else {
		return quote! { ::specimen::PropertySlot::opaque(#name) };
	};
	let kind = Ident::new(kind, Span::call_site());
	let call = session_call(method, name, needs_name);
	quote! {
		::specimen::PropertySlot::new(
			#name,
			::specimen::PropertyKind::#kind,
			|object, session| {
				if object.#field == <#ty as ::core::default::Default>::default() {
					object.#field = #call;
				}
			},
		)
	}
}

fn session_call(method: &str, name: &str, needs_name: bool) -> TokenStream {
	let method = Ident::new(method, Span::call_site());
	if needs_name {
		quote!(session.#method(#name))
	} else {
		quote!(session.#method())
	}
}

/// Maps a recognized type path tail to its property kind, session method,
/// and whether the method takes the property name.
fn scalar_of(ty: &Type) -> Option<(&'static str, &'static str, bool)> {
	let Type::Path(path) = ty else {
		return None;
	};
	let segment = path.path.segments.last()?;
	let entry = match segment.ident.to_string().as_str() {
		"bool" => ("Bool", "next_bool", false),
		"char" => ("Char", "next_char", false),
		"i8" => ("I8", "next_i8", false),
		"i16" => ("I16", "next_i16", false),
		"i32" => ("I32", "next_i32", false),
		"i64" => ("I64", "next_i64", false),
		"i128" => ("I128", "next_i128", false),
		"isize" => ("Isize", "next_isize", false),
		"u8" => ("U8", "next_u8", false),
		"u16" => ("U16", "next_u16", false),
		"u32" => ("U32", "next_u32", false),
		"u64" => ("U64", "next_u64", false),
		"u128" => ("U128", "next_u128", false),
		"usize" => ("Usize", "next_usize", false),
		"f32" => ("F32", "next_f32", false),
		"f64" => ("F64", "next_f64", false),
		"String" => ("String", "next_string", true),
		"Decimal" => ("Decimal", "next_decimal", false),
		"NaiveDate" => ("Date", "next_date", false),
		"NaiveDateTime" => ("DateTime", "next_naive_datetime", false),
		"DateTime" => ("DateTime", "next_datetime", false),
		"Uuid" => ("Uuid", "next_uuid", false),
		_ => return None,
	};
	Some(entry)
}

/// Returns the inner type of `Option<T>`, if `ty` is one.
fn option_inner(ty: &Type) -> Option<&Type> {
	let Type::Path(path) = ty else {
		return None;
	};
	let segment = path.path.segments.last()?;
	if segment.ident != "Option" {
		return None;
	}
	let PathArguments::AngleBracketed(args) = &segment.arguments else {
		return None;
	};
	if args.args.len() != 1 {
		return None;
	}
	match args.args.first()? {
		GenericArgument::Type(inner) => Some(inner),
		_ => None,
	}
}
