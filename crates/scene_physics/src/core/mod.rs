//! # Core Module
//!
//! Shared configuration types used by every subsystem of the physics core.
//!
//! ## Organization
//!
//! - **Config**: physics and engine configuration structures

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    EngineConfig,
    PhysicsConfig,
    OctreeSettings,
    BroadPhaseMode,
    Config,
    ConfigError,
};
