//! Environment loaders used by the command-line tooling.

mod error;
pub use error::ConfigError;

mod env_utils;
pub use env_utils::{load_rpc_url, load_string, load_url};
