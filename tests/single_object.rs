//! Building single objects through registered constructors.

#[path = "helpers/models.rs"]
mod models;

use models::Payment;
use rstest::rstest;
use rust_decimal::Decimal;
use specimen::prelude::*;

const THE_MEMO: &str = "wire transfer";
const THE_COUNT: i32 = 5;
const THE_RATE: f32 = 15.0;

#[rstest]
fn test_builds_through_a_matching_constructor() {
	let the_amount = Decimal::from(10);
	let payment = ObjectBuilder::<Payment>::new()
		.with_constructor_args((THE_MEMO, the_amount))
		.build()
		.unwrap();

	assert_eq!(payment.memo, THE_MEMO);
	assert_eq!(payment.amount, the_amount);
}

#[rstest]
fn test_chooses_the_correct_constructor() {
	let payment = ObjectBuilder::<Payment>::new()
		.with_constructor_args((THE_COUNT, THE_RATE))
		.build()
		.unwrap();

	assert_eq!(payment.count, THE_COUNT);
	assert_eq!(payment.rate, THE_RATE);
}

#[rstest]
fn test_constructor_values_survive_population() {
	let payment = ObjectBuilder::<Payment>::new()
		.with_constructor_args((THE_MEMO, Decimal::from(10)))
		.build()
		.unwrap();

	// Constructor-assigned fields keep their values; the rest are populated.
	assert_eq!(payment.memo, THE_MEMO);
	assert_eq!(payment.count, 1);
	assert_eq!(payment.rate, 1.0);
}

#[rstest]
fn test_overrides_beat_constructor_and_population() {
	let payment = ObjectBuilder::<Payment>::new()
		.with_constructor_args((THE_COUNT, THE_RATE))
		.with(|payment| payment.count = 77)
		.build()
		.unwrap();

	assert_eq!(payment.count, 77);
	assert_eq!(payment.rate, THE_RATE);
}

#[rstest]
fn test_tagged_selection_bypasses_resolution() {
	let payment = ObjectBuilder::<Payment>::new()
		.using_constructor("count_rate", (9i32, 2.5f32))
		.build()
		.unwrap();

	assert_eq!(payment.count, 9);
	assert_eq!(payment.rate, 2.5);
}

#[rstest]
fn test_unresolvable_arguments_fail_at_build() {
	let mut builder = ObjectBuilder::<Payment>::new().with_constructor_args((true, 'x'));
	assert!(matches!(
		builder.build(),
		Err(BuildError::NoMatchingConstructor { .. })
	));
}

#[derive(Debug, Default, Buildable)]
struct Measurement {
	wide: i64,
	precise: f64,
}

impl Constructible for Measurement {
	fn constructors() -> Vec<ConstructorSignature<Self>> {
		vec![
			ConstructorSignature::new("wide", [ParamKind::I64], |args| {
				Ok(Self {
					wide: args.i64_at(0)?,
					..Self::default()
				})
			}),
			ConstructorSignature::new("precise", [ParamKind::F64], |args| {
				Ok(Self {
					precise: args.f64_at(0)?,
					..Self::default()
				})
			}),
		]
	}
}

#[rstest]
fn test_integer_widening_prefers_the_integer_parameter() {
	// i32 widens into i64 at a lower cost than into f64.
	let measurement = ObjectBuilder::<Measurement>::new()
		.with_constructor_args((7i32,))
		.build()
		.unwrap();

	assert_eq!(measurement.wide, 7);
}

#[rstest]
fn test_exact_float_match_selects_the_float_parameter() {
	let measurement = ObjectBuilder::<Measurement>::new()
		.with_constructor_args((2.25f64,))
		.build()
		.unwrap();

	assert_eq!(measurement.precise, 2.25);
}
