//! Form submission relay service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod store;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{IngestListener, RelayClient};
pub use store::{MongoSink, RecordSink};
