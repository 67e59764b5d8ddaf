//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and NaN-guarded numerical helpers
//! - Fixed tick timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
