//! Service Ports
//!
//! Abstract interfaces for external services.

mod content_search;
mod date_picker;

pub use content_search::*;
pub use date_picker::*;
