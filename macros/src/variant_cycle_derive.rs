//! Implementation of the `VariantCycle` derive macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

pub(crate) fn derive_variant_cycle_impl(input: DeriveInput) -> Result<TokenStream> {
	let ident = &input.ident;

	let Data::Enum(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			ident,
			"`VariantCycle` can only be derived for enums",
		));
	};
	if data.variants.is_empty() {
		return Err(syn::Error::new_spanned(
			ident,
			"`VariantCycle` requires at least one variant",
		));
	}

	let mut variant_idents = Vec::new();
	for variant in &data.variants {
		if !matches!(variant.fields, Fields::Unit) {
			return Err(syn::Error::new_spanned(
				variant,
				"`VariantCycle` requires unit variants",
			));
		}
		variant_idents.push(&variant.ident);
	}

	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	Ok(quote! {
		#[automatically_derived]
		impl #impl_generics ::specimen::VariantCycle for #ident #ty_generics #where_clause {
			fn variants() -> &'static [Self] {
				&[ #( Self::#variant_idents ),* ]
			}
		}
	})
}
