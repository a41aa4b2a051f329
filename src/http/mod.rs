//! HTTP front-end subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, middleware, dispatch on method + path)
//!     → GET  /         → index page
//!     → GET  /message  → form page
//!     → GET  <other>   → static_files.rs (sanitize, resolve, guess MIME)
//!     → POST <any>     → relay client, then 302 back to /
//! ```

pub mod server;
pub mod static_files;

pub use server::HttpServer;
