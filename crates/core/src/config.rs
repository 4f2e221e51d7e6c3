//! Engine configuration.
//!
//! Defaults come from the constants in `types`; the binary overrides them from
//! command-line flags. Validation happens once, when the engine is built.

use thiserror::Error;

use crate::types::{FAST_DROP_MS, NORMAL_DROP_MS};

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroDropInterval { name: &'static str },

    #[error("fast drop interval ({fast_ms}ms) is slower than the normal one ({normal_ms}ms)")]
    FastSlowerThanNormal { fast_ms: u32, normal_ms: u32 },
}

/// Tunables of the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed of the piece bag
    pub seed: u64,
    /// Gravity period in milliseconds
    pub normal_drop_ms: u32,
    /// Gravity period while soft drop is held
    pub fast_drop_ms: u32,
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normal_drop_ms == 0 {
            return Err(ConfigError::ZeroDropInterval {
                name: "normal_drop_ms",
            });
        }
        if self.fast_drop_ms == 0 {
            return Err(ConfigError::ZeroDropInterval {
                name: "fast_drop_ms",
            });
        }
        if self.fast_drop_ms > self.normal_drop_ms {
            return Err(ConfigError::FastSlowerThanNormal {
                fast_ms: self.fast_drop_ms,
                normal_ms: self.normal_drop_ms,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            normal_drop_ms: NORMAL_DROP_MS,
            fast_drop_ms: FAST_DROP_MS,
        }
    }
}
