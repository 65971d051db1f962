//! Utility modules: build info, math, formatting, persistence.

pub mod build_info;
pub mod format;
pub mod math;
pub mod persistence;

pub use format::commify;
pub use math::{gcd, gcd_all, rand_num, random_index, scale};
