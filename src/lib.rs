#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

pub mod errors;
pub use errors::Error;

pub mod framework;
pub mod games;
