//! # Unified Configuration
//!
//! Configuration structures for the physics core and the host that drives it.
//!
//! ## Configuration Categories
//!
//! - **Physics Config**: tick rate, broad-phase selection, octree tuning
//! - **Engine Config**: logging and the physics section, loaded from one file

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// Which broad phase produces candidate pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BroadPhaseMode {
    /// Every candidate tested against every other (O(n²))
    #[default]
    BruteForce,
    /// Adaptive octree subdivision, same pairs as brute force
    Octree,
}

/// # Octree Settings
///
/// The scene tree is seeded with eight octants around the origin whose keys
/// sit at `±half_range / 2`, so the default of 256 puts the seed keys at ±128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctreeSettings {
    /// Half the edge length of the whole partitioned region
    pub half_range: i32,
    /// A leaf holding more candidates than this gets subdivided
    pub split_threshold: usize,
}

impl Default for OctreeSettings {
    fn default() -> Self {
        Self {
            half_range: 256,
            split_threshold: 2,
        }
    }
}

impl OctreeSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Halving has to stay integral all the way down to a unit cell
        if self.half_range < 4 || !(self.half_range as u32).is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "octree half_range must be a power of two >= 4, got {}",
                self.half_range
            )));
        }
        if self.split_threshold == 0 {
            return Err(ConfigError::Invalid("octree split_threshold must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// # Physics Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Fixed simulation tick rate in Hz
    pub tick_rate_hz: f32,
    /// Upper bound on catch-up ticks for one frame
    pub max_ticks_per_frame: u32,
    /// Broad-phase implementation
    pub broad_phase: BroadPhaseMode,
    /// Octree tuning (used when `broad_phase` is `Octree`)
    pub octree: OctreeSettings,
}

impl PhysicsConfig {
    /// Create a new physics configuration with defaults
    pub fn new() -> Self {
        Self {
            tick_rate_hz: 30.0,
            max_ticks_per_frame: 5,
            broad_phase: BroadPhaseMode::BruteForce,
            octree: OctreeSettings::default(),
        }
    }

    /// Set tick rate
    pub fn with_tick_rate(mut self, hz: f32) -> Self {
        self.tick_rate_hz = hz;
        self
    }

    /// Select the broad phase
    pub fn with_broad_phase(mut self, mode: BroadPhaseMode) -> Self {
        self.broad_phase = mode;
        self
    }

    /// Set octree settings
    pub fn with_octree(mut self, octree: OctreeSettings) -> Self {
        self.octree = octree;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_rate_hz must be positive, got {}",
                self.tick_rate_hz
            )));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::Invalid("max_ticks_per_frame must be at least 1".to_string()));
        }
        self.octree.validate()
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Top-level configuration a host loads from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Physics core configuration
    pub physics: PhysicsConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            physics: PhysicsConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Replace the physics section
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
