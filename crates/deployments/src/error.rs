use socket_constants::ChainSlug;
use std::path::PathBuf;

/// Result type for address book and chain config operations.
pub type Result<T> = std::result::Result<T, AddressBookError>;

/// Errors returned while reading, writing or querying deployment files.
#[derive(thiserror::Error, Debug)]
pub enum AddressBookError {
    /// A required deployment entry is absent.
    #[error("{contract} is not deployed on {slug}")]
    DeployedAddressNotFound {
        /// The chain that was queried.
        slug: ChainSlug,
        /// The missing entry.
        contract: String,
    },
    /// The chain config file has no entry for a chain.
    #[error("no chain config for {0}")]
    MissingChainConfig(ChainSlug),

    /// The file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for its schema.
    #[error("malformed {path}: {source}")]
    Json {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl AddressBookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    pub(crate) fn not_found(slug: ChainSlug, contract: impl ToString) -> Self {
        Self::DeployedAddressNotFound { slug, contract: contract.to_string() }
    }
}
