//! SAIL resolution.

pub mod resolver;

pub use resolver::resolve;
