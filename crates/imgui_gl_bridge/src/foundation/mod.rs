//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the bridge:
//! - Math types and the GUI projection
//! - Logging utilities

pub mod math;
pub mod logging;
