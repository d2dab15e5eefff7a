//! Ticket Cluster Server - HTTP API for support-ticket clustering
//!
//! Exposes a fitted TF-IDF + k-means model so callers can submit a ticket's
//! subject and body and get back a cluster, a confidence score and the
//! ticket's most representative keywords.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Health with cluster count and uptime
//! - `POST /cluster` - Classify one ticket
//! - `POST /cluster/batch` - Classify a list of tickets
//! - `GET /clusters` - Cluster catalog
//! - `GET /clusters/{cluster_id}` - Cluster detail
//!
//! The models are loaded once at startup. A load failure aborts startup, so
//! a running server always has a complete model.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
