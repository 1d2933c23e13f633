//! Configuration loading and schema definitions
//!
//! Settings shared by the client library and the `watermark` binary.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
