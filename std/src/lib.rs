//! veriflow-std
//!
//! The standard section renderer library: one renderer per catalog variant,
//! plus an installer that registers the whole set.

pub mod prelude;
pub mod sections;

pub use sections::register_standard;
