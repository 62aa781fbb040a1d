//! Tests for the mock renderer
//!
//! Organized into focused submodules per concern.

use super::*;

// Test helper functions
mod helpers;

mod tokenstream_performance;


mod render_case;
