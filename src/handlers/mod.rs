//! HTTP handlers for statuses, blogs and the published listing.

pub mod blog;
pub mod publication;
pub mod status;
pub use blog::*;
pub use publication::*;
pub use status::*;
