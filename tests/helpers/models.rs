//! Shared fixture types for the integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use specimen::prelude::*;

/// Unit enum cycled by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, VariantCycle)]
pub enum Genre {
	#[default]
	Jazz,
	Swing,
	Bebop,
}

/// Plain buildable type with a cycled enum, a skipped field, and an
/// optional field.
#[derive(Debug, Default, Clone, PartialEq, Buildable)]
pub struct Track {
	pub id: u64,
	pub title: String,
	pub length_secs: u32,
	#[buildable(cycle)]
	pub genre: Genre,
	#[buildable(skip)]
	pub notes: String,
	pub rating: Option<u8>,
}

/// Buildable type with two registered constructors differing in parameter
/// kinds.
#[derive(Debug, Default, Clone, PartialEq, Buildable)]
pub struct Payment {
	pub memo: String,
	pub amount: Decimal,
	pub count: i32,
	pub rate: f32,
}

impl Constructible for Payment {
	fn constructors() -> Vec<ConstructorSignature<Self>> {
		vec![
			ConstructorSignature::new(
				"memo_amount",
				[ParamKind::Str, ParamKind::Decimal],
				|args| {
					Ok(Self {
						memo: args.string_at(0)?,
						amount: args.decimal_at(1)?,
						..Self::default()
					})
				},
			),
			ConstructorSignature::new(
				"count_rate",
				[ParamKind::I32, ParamKind::F32],
				|args| {
					Ok(Self {
						count: args.i32_at(0)?,
						rate: args.f32_at(1)?,
						..Self::default()
					})
				},
			),
		]
	}
}
