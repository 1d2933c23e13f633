//! Endpoint-specific API implementations
//!
//! | Module | Backend route | Description |
//! |--------|---------------|-------------|
//! | `watermark` | `POST /watermark` | Composite a watermark onto a photo |

pub mod watermark;

pub use watermark::WatermarkApi;
