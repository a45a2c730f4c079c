//! Types used throughout the Pinboard client.
//!
//! Domain values returned by the services and request types that carry
//! their own validation and query-parameter encoding.

mod common;
mod requests;

pub use common::*;
pub use requests::*;
