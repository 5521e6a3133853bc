//! HTTP protocol layer module
//!
//! Response builders and CORS headers, decoupled from the crossword logic.

pub mod cors;
pub mod response;

// Re-export commonly used types
pub use cors::CorsHeaders;
pub use response::{
    build_413_response, build_500_response, build_empty_response, build_json_error,
    build_json_response, build_raw_json_response, build_text_response,
};
