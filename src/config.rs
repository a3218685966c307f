//! Builder configuration.
//!
//! Every builder carries a [`BuilderConfig`] controlling auto-population and
//! value naming. A process-wide default configuration can be installed for
//! test suites that want the same behavior everywhere without threading a
//! config through each call site.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::generator::NamingStrategy;

/// Configuration for a single builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
	/// Whether properties without an override are auto-populated.
	auto_populate: bool,

	/// Strategy used to produce generated values.
	naming: NamingStrategy,

	/// Seed for the random strategies. Ignored by sequential generation.
	seed: Option<u64>,
}

impl BuilderConfig {
	/// Creates a configuration with auto-population enabled and the
	/// sequential naming strategy.
	pub fn new() -> Self {
		Self {
			auto_populate: true,
			naming: NamingStrategy::default(),
			seed: None,
		}
	}

	/// Sets whether properties are auto-populated.
	pub fn with_auto_populate(mut self, enabled: bool) -> Self {
		self.auto_populate = enabled;
		self
	}

	/// Sets the naming strategy.
	pub fn with_naming(mut self, naming: NamingStrategy) -> Self {
		self.naming = naming;
		self
	}

	/// Sets the seed used by the random strategies.
	///
	/// Sequential generation is already deterministic and ignores the seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Returns whether auto-population is enabled.
	pub fn auto_populate(&self) -> bool {
		self.auto_populate
	}

	/// Returns the naming strategy.
	pub fn naming(&self) -> NamingStrategy {
		self.naming
	}

	/// Returns the seed, if one was set.
	pub fn seed(&self) -> Option<u64> {
		self.seed
	}
}

impl Default for BuilderConfig {
	fn default() -> Self {
		Self::new()
	}
}

/// Process-wide default configuration picked up by new builders.
static DEFAULT_CONFIG: Lazy<RwLock<BuilderConfig>> = Lazy::new(|| RwLock::new(BuilderConfig::new()));

/// Returns a copy of the process-wide default configuration.
pub fn default_config() -> BuilderConfig {
	*DEFAULT_CONFIG.read()
}

/// Installs a new process-wide default configuration.
///
/// Builders created afterwards start from this configuration; builders that
/// already exist are unaffected.
pub fn set_default_config(config: BuilderConfig) {
	*DEFAULT_CONFIG.write() = config;
}

/// Restores the built-in default configuration.
///
/// This is primarily useful for testing.
pub fn reset_default_config() {
	set_default_config(BuilderConfig::new());
}
