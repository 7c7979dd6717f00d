use crate::ConfigError;
use socket_constants::ChainSlug;
use std::{borrow::Cow, env};

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a url from the environment
pub fn load_url(key: &str) -> Result<Cow<'static, str>, ConfigError> {
    load_string(key).map(Into::into)
}

/// Load the RPC url of a chain from `<NETWORK_KEY>_RPC`.
pub fn load_rpc_url(slug: ChainSlug) -> Result<Cow<'static, str>, ConfigError> {
    load_url(&slug.rpc_env_var())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var() {
        let err = load_string("SOCKET_TYPES_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::Var(key) if key == "SOCKET_TYPES_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn rpc_url_key() {
        let err = load_rpc_url(ChainSlug::PolygonAmoy).unwrap_err();
        assert!(matches!(err, ConfigError::Var(key) if key == "POLYGON_AMOY_RPC"));
    }
}
