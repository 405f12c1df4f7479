//! Safe SQL builder: identifiers are fixed, values always go through parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
