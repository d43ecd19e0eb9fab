//! ImageNet classification for whole images and grids of tiles.
//!
//! The library holds everything except the windows themselves:
//! - `imaging` - loading, tiling, preprocessing
//! - `inference` - category list and the network wrapper
//! - `state` - result sets and cell navigation
//! - `pipeline` - the upload-and-classify chains
//! - `ui` - iced view helpers shared by both binaries

pub mod config;
pub mod error;
pub mod imaging;
pub mod inference;
pub mod pipeline;
pub mod runtime;
pub mod state;
pub mod ui;

pub use error::{ClassifierError, Result};

/// Install the tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
