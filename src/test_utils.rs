// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by the unit test modules.
//!
//! Float fields (volume, played fraction, seconds) are compared with the
//! `approx` macros re-exported here rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Tolerance for comparing positions in seconds.
pub const SECS_EPSILON: f64 = 1e-6;
