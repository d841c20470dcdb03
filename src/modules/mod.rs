//! Wrappers around registry modules the stacks call.

pub mod vpc;

pub use vpc::{Vpc, VpcOptions};
