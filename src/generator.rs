//! Deterministic value generation.
//!
//! A [`GeneratorSession`] backs one build invocation. It carries a single
//! ordinal counter that advances once per generated object, so every
//! auto-populated property of the k-th object derives its value from k:
//! numbers count up from 1, strings become `"<PropertyName><k>"`, dates step
//! one day per object from a fixed epoch, and enum variants cycle in
//! declaration order. Two sessions with the same configuration and the same
//! call sequence produce identical values, which keeps fixtures reproducible.
//!
//! The optional [`NamingStrategy::Random`] strategy (behind the `random`
//! feature) swaps the counters for rand-generated values; supplying a seed
//! restores reproducibility.
//!
//! The module also provides process-wide named sequences ([`sequence`]) and a
//! small local [`Sequence`] counter for hand-rolled fixtures.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

#[cfg(feature = "chrono")]
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
#[cfg(feature = "random")]
use rand::{Rng, SeedableRng, distributions::Alphanumeric, rngs::StdRng};
#[cfg(feature = "decimal")]
use rust_decimal::Decimal;
#[cfg(feature = "uuid")]
use uuid::Uuid;

use crate::config::BuilderConfig;

/// Fixed epoch for generated dates.
#[cfg(feature = "chrono")]
const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
	Some(date) => date,
	None => panic!("fixed epoch is a valid date"),
};

/// Strategy used to produce generated property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStrategy {
	/// Deterministic per-session counters (default).
	#[default]
	Sequential,

	/// Rand-generated values. Deterministic only when a seed is configured.
	#[cfg(feature = "random")]
	Random,
}

/// Counter state backing one build invocation.
///
/// The session's ordinal advances once per generated object via
/// [`advance`](Self::advance); value methods never advance it. A session that
/// has not been advanced behaves as if it were at ordinal 1.
#[derive(Debug)]
pub struct GeneratorSession {
	counter: u64,
	naming: NamingStrategy,
	#[cfg(feature = "random")]
	seed: Option<u64>,
	#[cfg(feature = "random")]
	rng: Option<StdRng>,
}

impl GeneratorSession {
	/// Creates a sequential session.
	pub fn new() -> Self {
		Self::from_config(&BuilderConfig::new())
	}

	/// Creates a session from a builder configuration.
	pub fn from_config(config: &BuilderConfig) -> Self {
		tracing::trace!(naming = ?config.naming(), seed = ?config.seed(), "generator session started");
		Self {
			counter: 0,
			naming: config.naming(),
			#[cfg(feature = "random")]
			seed: config.seed(),
			#[cfg(feature = "random")]
			rng: None,
		}
	}

	/// Advances the session to the next object.
	pub fn advance(&mut self) {
		self.counter = self.counter.saturating_add(1);
	}

	/// Returns the current object ordinal (1-based).
	pub fn ordinal(&self) -> u64 {
		self.counter.max(1)
	}

	/// Maps the ordinal into `1..=max`, wrapping for narrow types.
	fn scaled(&self, max: u64) -> u64 {
		(self.ordinal() - 1) % max + 1
	}

	#[cfg(feature = "random")]
	fn rng(&mut self) -> &mut StdRng {
		let seed = self.seed;
		self.rng.get_or_insert_with(|| match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		})
	}

	/// Returns the next boolean; sequential values alternate starting with
	/// `true`.
	pub fn next_bool(&mut self) -> bool {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal() % 2 == 1,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().r#gen(),
		}
	}

	/// Returns the next character, cycling `'A'..='Z'`.
	pub fn next_char(&mut self) -> char {
		match self.naming {
			NamingStrategy::Sequential => (b'A' + ((self.ordinal() - 1) % 26) as u8) as char,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(b'A'..=b'Z') as char,
		}
	}

	/// Returns the next `i8`, wrapping within `1..=i8::MAX`.
	pub fn next_i8(&mut self) -> i8 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(i8::MAX as u64) as i8,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i8::MAX),
		}
	}

	/// Returns the next `i16`, wrapping within `1..=i16::MAX`.
	pub fn next_i16(&mut self) -> i16 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(i16::MAX as u64) as i16,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i16::MAX),
		}
	}

	/// Returns the next `i32`.
	pub fn next_i32(&mut self) -> i32 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(i32::MAX as u64) as i32,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i32::MAX),
		}
	}

	/// Returns the next `i64`.
	pub fn next_i64(&mut self) -> i64 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(i64::MAX as u64) as i64,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i64::MAX),
		}
	}

	/// Returns the next `i128`.
	pub fn next_i128(&mut self) -> i128 {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal() as i128,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i64::MAX as i128),
		}
	}

	/// Returns the next `isize`, wrapping within `1..=i32::MAX`.
	pub fn next_isize(&mut self) -> isize {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(i32::MAX as u64) as isize,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=i32::MAX as isize),
		}
	}

	/// Returns the next `u8`, wrapping within `1..=u8::MAX`.
	pub fn next_u8(&mut self) -> u8 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(u8::MAX as u64) as u8,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u8::MAX),
		}
	}

	/// Returns the next `u16`, wrapping within `1..=u16::MAX`.
	pub fn next_u16(&mut self) -> u16 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(u16::MAX as u64) as u16,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u16::MAX),
		}
	}

	/// Returns the next `u32`.
	pub fn next_u32(&mut self) -> u32 {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(u32::MAX as u64) as u32,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u32::MAX),
		}
	}

	/// Returns the next `u64`.
	pub fn next_u64(&mut self) -> u64 {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal(),
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u64::MAX),
		}
	}

	/// Returns the next `u128`.
	pub fn next_u128(&mut self) -> u128 {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal() as u128,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u64::MAX as u128),
		}
	}

	/// Returns the next `usize`, wrapping within `1..=u32::MAX`.
	pub fn next_usize(&mut self) -> usize {
		match self.naming {
			NamingStrategy::Sequential => self.scaled(u32::MAX as u64) as usize,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1..=u32::MAX as usize),
		}
	}

	/// Returns the next `f32`.
	pub fn next_f32(&mut self) -> f32 {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal() as f32,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1.0f32..1_000_000.0),
		}
	}

	/// Returns the next `f64`.
	pub fn next_f64(&mut self) -> f64 {
		match self.naming {
			NamingStrategy::Sequential => self.ordinal() as f64,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(1.0f64..1_000_000.0),
		}
	}

	/// Returns the next string for the named property:
	/// `"<PropertyName><ordinal>"`, or a random alphanumeric suffix under the
	/// random strategy.
	pub fn next_string(&mut self, property: &str) -> String {
		match self.naming {
			NamingStrategy::Sequential => format!("{property}{}", self.ordinal()),
			#[cfg(feature = "random")]
			NamingStrategy::Random => {
				let rng = self.rng();
				let suffix: String = (0..8).map(|_| rng.sample(Alphanumeric) as char).collect();
				format!("{property}{suffix}")
			}
		}
	}

	/// Returns the next decimal.
	#[cfg(feature = "decimal")]
	pub fn next_decimal(&mut self) -> Decimal {
		match self.naming {
			NamingStrategy::Sequential => Decimal::from(self.ordinal()),
			#[cfg(feature = "random")]
			NamingStrategy::Random => Decimal::from(self.rng().gen_range(1..=i64::MAX)),
		}
	}

	/// Returns the next date, stepping one day per object from 2000-01-01.
	#[cfg(feature = "chrono")]
	pub fn next_date(&mut self) -> NaiveDate {
		match self.naming {
			NamingStrategy::Sequential => EPOCH
				.checked_add_days(Days::new(self.ordinal() - 1))
				.unwrap_or(EPOCH),
			#[cfg(feature = "random")]
			NamingStrategy::Random => {
				let offset = self.rng().gen_range(0u64..36_500);
				EPOCH.checked_add_days(Days::new(offset)).unwrap_or(EPOCH)
			}
		}
	}

	/// Returns the next naive datetime at midnight of [`next_date`](Self::next_date).
	#[cfg(feature = "chrono")]
	pub fn next_naive_datetime(&mut self) -> NaiveDateTime {
		self.next_date().and_time(NaiveTime::MIN)
	}

	/// Returns the next UTC datetime at midnight of [`next_date`](Self::next_date).
	#[cfg(feature = "chrono")]
	pub fn next_datetime(&mut self) -> DateTime<Utc> {
		self.next_naive_datetime().and_utc()
	}

	/// Returns the next uuid, derived from the ordinal.
	#[cfg(feature = "uuid")]
	pub fn next_uuid(&mut self) -> Uuid {
		match self.naming {
			NamingStrategy::Sequential => Uuid::from_u128(self.ordinal() as u128),
			#[cfg(feature = "random")]
			NamingStrategy::Random => Uuid::from_u128(self.rng().r#gen()),
		}
	}

	/// Returns the index of the variant to pick from a set of `len` variants.
	///
	/// Sequential sessions cycle through the set in order; `len == 0` returns
	/// index 0.
	pub fn variant_index(&mut self, len: usize) -> usize {
		if len == 0 {
			return 0;
		}
		match self.naming {
			NamingStrategy::Sequential => ((self.ordinal() - 1) % len as u64) as usize,
			#[cfg(feature = "random")]
			NamingStrategy::Random => self.rng().gen_range(0..len),
		}
	}
}

impl Default for GeneratorSession {
	fn default() -> Self {
		Self::new()
	}
}

/// A local auto-incrementing counter for hand-rolled fixtures.
#[derive(Debug, Default)]
pub struct Sequence {
	current: u64,
}

impl Sequence {
	/// Creates a sequence starting at 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next value (1-based).
	pub fn next(&mut self) -> u64 {
		self.current += 1;
		self.current
	}

	/// Returns `"<prefix><next value>"`.
	pub fn next_string(&mut self, prefix: &str) -> String {
		format!("{prefix}{}", self.next())
	}
}

/// Process-wide named sequence counters.
static SEQUENCES: Lazy<Mutex<HashMap<String, u64>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the next value of the named process-wide sequence (1-based).
///
/// # Example
///
/// ```
/// # use specimen::generator::{reset_sequence, sequence};
/// reset_sequence("doc.sequence");
/// assert_eq!(sequence("doc.sequence"), 1);
/// assert_eq!(sequence("doc.sequence"), 2);
/// ```
pub fn sequence(name: &str) -> u64 {
	let mut sequences = SEQUENCES.lock();
	let counter = sequences.entry(name.to_string()).or_insert(0);
	*counter += 1;
	*counter
}

/// Returns the named sequence's next value formatted into `format`, replacing
/// every `{n}` placeholder.
///
/// # Example
///
/// ```
/// # use specimen::generator::{formatted_sequence, reset_sequence};
/// reset_sequence("doc.code");
/// assert_eq!(formatted_sequence("doc.code", "user_{n}"), "user_1");
/// ```
pub fn formatted_sequence(name: &str, format: &str) -> String {
	let value = sequence(name);
	format.replace("{n}", &value.to_string())
}

/// Resets the named process-wide sequence to zero.
pub fn reset_sequence(name: &str) {
	SEQUENCES.lock().remove(name);
}

/// Resets all process-wide sequences.
///
/// This is primarily useful for testing.
pub fn reset_sequences() {
	SEQUENCES.lock().clear();
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_fresh_session_behaves_as_first_ordinal() {
		let mut session = GeneratorSession::new();
		assert_eq!(session.ordinal(), 1);
		assert_eq!(session.next_i32(), 1);
		assert_eq!(session.next_string("Title"), "Title1");
		assert!(session.next_bool());
		assert_eq!(session.next_char(), 'A');
	}

	#[rstest]
	fn test_values_follow_the_object_ordinal() {
		let mut session = GeneratorSession::new();
		session.advance();
		session.advance();
		session.advance();
		assert_eq!(session.ordinal(), 3);
		assert_eq!(session.next_i32(), 3);
		assert_eq!(session.next_u64(), 3);
		assert_eq!(session.next_f64(), 3.0);
		assert_eq!(session.next_string("Name"), "Name3");
		assert!(session.next_bool());
		assert_eq!(session.next_char(), 'C');
	}

	#[rstest]
	fn test_narrow_integers_wrap_without_hitting_zero() {
		let mut session = GeneratorSession::new();
		for _ in 0..300 {
			session.advance();
		}
		let value = session.next_u8();
		assert_ne!(value, 0);
		assert_eq!(value, ((300 - 1) % 255 + 1) as u8);
	}

	#[rstest]
	fn test_variant_index_cycles() {
		let mut session = GeneratorSession::new();
		let mut seen = Vec::new();
		for _ in 0..4 {
			session.advance();
			seen.push(session.variant_index(3));
		}
		assert_eq!(seen, vec![0, 1, 2, 0]);
	}

	#[rstest]
	fn test_variant_index_of_empty_set() {
		let mut session = GeneratorSession::new();
		assert_eq!(session.variant_index(0), 0);
	}

	#[rstest]
	fn test_sessions_are_deterministic() {
		let run = || {
			let mut session = GeneratorSession::new();
			let mut values = Vec::new();
			for _ in 0..5 {
				session.advance();
				values.push((session.next_i64(), session.next_string("Id")));
			}
			values
		};
		assert_eq!(run(), run());
	}

	#[cfg(feature = "chrono")]
	#[rstest]
	fn test_dates_step_one_day_from_epoch() {
		let mut session = GeneratorSession::new();
		session.advance();
		assert_eq!(session.next_date(), EPOCH);
		session.advance();
		session.advance();
		let third = session.next_date();
		assert_eq!(third, NaiveDate::from_ymd_opt(2000, 1, 3).unwrap());
		assert_eq!(session.next_datetime().date_naive(), third);
	}

	#[cfg(feature = "uuid")]
	#[rstest]
	fn test_uuids_derive_from_the_ordinal() {
		let mut session = GeneratorSession::new();
		session.advance();
		session.advance();
		assert_eq!(session.next_uuid(), Uuid::from_u128(2));
	}

	#[cfg(feature = "decimal")]
	#[rstest]
	fn test_decimals_follow_the_counter() {
		let mut session = GeneratorSession::new();
		session.advance();
		session.advance();
		assert_eq!(session.next_decimal(), Decimal::from(2u64));
	}

	#[cfg(feature = "random")]
	#[rstest]
	fn test_seeded_random_sessions_are_reproducible() {
		let config = BuilderConfig::new()
			.with_naming(NamingStrategy::Random)
			.with_seed(42);
		let run = || {
			let mut session = GeneratorSession::from_config(&config);
			session.advance();
			(session.next_i32(), session.next_string("Code"))
		};
		assert_eq!(run(), run());
	}

	#[cfg(feature = "random")]
	#[rstest]
	fn test_random_strings_keep_the_property_prefix() {
		let config = BuilderConfig::new().with_naming(NamingStrategy::Random);
		let mut session = GeneratorSession::from_config(&config);
		session.advance();
		assert!(session.next_string("Code").starts_with("Code"));
	}

	#[rstest]
	fn test_local_sequence() {
		let mut sequence = Sequence::new();
		assert_eq!(sequence.next(), 1);
		assert_eq!(sequence.next(), 2);
		assert_eq!(sequence.next_string("code"), "code3");
	}

	#[rstest]
	fn test_named_sequences_are_independent() {
		reset_sequence("gen.alpha");
		reset_sequence("gen.beta");
		assert_eq!(sequence("gen.alpha"), 1);
		assert_eq!(sequence("gen.alpha"), 2);
		assert_eq!(sequence("gen.beta"), 1);
	}

	#[rstest]
	fn test_formatted_sequence_replaces_placeholder() {
		reset_sequence("gen.fmt");
		assert_eq!(formatted_sequence("gen.fmt", "item_{n}"), "item_1");
		assert_eq!(formatted_sequence("gen.fmt", "item_{n}"), "item_2");
	}
}
