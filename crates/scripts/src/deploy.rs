use crate::{ChainContext, ScriptError};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolConstructor,
};
use core::future::Future;
use serde_json::Value;
use socket_bindings::{
    CapacitorFactory, ExecutionManager, FastSwitchboard, GasPriceOracle, Hasher,
    OptimisticSwitchboard, SignatureVerifier, Socket, TransmitManager, DEFAULT_CAPACITOR_TYPE,
    DEFAULT_MAX_PACKET_LENGTH, SOCKET_VERSION,
};
use socket_constants::ChainSlug;
use socket_deployments::{
    AddressBook, ChainAddresses, ChainConfig, CoreContract, IntegrationAddresses, IntegrationType,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// A freshly deployed contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Deployed {
    /// Address of the new contract.
    pub address: Address,
    /// Block the deployment was included in, if known.
    pub block: Option<u64>,
}

/// Deploys contract creation code.
pub trait ContractFactory {
    /// The error type returned by deployments.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Deploy `contract`, appending the ABI-encoded `constructor_args` to its
    /// creation code.
    fn deploy(
        &self,
        contract: CoreContract,
        constructor_args: Bytes,
    ) -> impl Future<Output = Result<Deployed, Self::Error>> + Send;
}

/// Read the creation code of a contract from a forge or hardhat artifact.
///
/// Looks for `<dir>/<Name>.sol/<Name>.json` (forge) and then
/// `<dir>/<Name>.json`. The bytecode is read from `bytecode.object` or, if
/// that is absent, from a string-valued `bytecode`.
pub fn load_artifact(dir: &Path, contract: CoreContract) -> Result<Bytes, ScriptError> {
    let name = contract.name();
    let forge = dir.join(format!("{name}.sol")).join(format!("{name}.json"));
    let path = if forge.exists() { forge } else { dir.join(format!("{name}.json")) };

    let artifact_error =
        |reason: String| ScriptError::Artifact { path: path.clone(), reason };

    let contents = std::fs::read_to_string(&path).map_err(|e| artifact_error(e.to_string()))?;
    let json: Value = serde_json::from_str(&contents).map_err(|e| artifact_error(e.to_string()))?;
    let code = match &json["bytecode"] {
        Value::String(code) => code.as_str(),
        other => other["object"]
            .as_str()
            .ok_or_else(|| artifact_error("no bytecode".to_owned()))?,
    };
    let code: Bytes = code.parse().map_err(|e| artifact_error(format!("{e}")))?;
    if code.is_empty() {
        return Err(artifact_error("empty bytecode".to_owned()));
    }
    Ok(code)
}

/// A [`ContractFactory`] that sends creation transactions from a
/// [`ChainContext`], reading creation code from an artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactFactory<'a, P, S> {
    context: &'a ChainContext<P, S>,
    artifacts: PathBuf,
}

impl<'a, P, S> ArtifactFactory<'a, P, S> {
    /// Create a new factory.
    pub fn new(context: &'a ChainContext<P, S>, artifacts: impl Into<PathBuf>) -> Self {
        Self { context, artifacts: artifacts.into() }
    }

    /// Get the artifacts directory.
    pub fn artifacts(&self) -> &Path {
        &self.artifacts
    }
}

impl<P, S> ContractFactory for ArtifactFactory<'_, P, S>
where
    P: Provider + Send + Sync,
    S: Send + Sync,
{
    type Error = ScriptError;

    async fn deploy(
        &self,
        contract: CoreContract,
        constructor_args: Bytes,
    ) -> Result<Deployed, Self::Error> {
        let mut code = load_artifact(&self.artifacts, contract)?.to_vec();
        code.extend_from_slice(&constructor_args);

        let tx = TransactionRequest::default().with_deploy_code(code);
        let receipt = self.context.send(tx).await?;
        let address =
            receipt.contract_address.ok_or(ScriptError::NoContractAddress(contract))?;
        Ok(Deployed { address, block: receipt.block_number })
    }
}

/// Deploys the core contracts of one chain in dependency order, recording
/// each one in the address book as soon as it lands.
///
/// Contracts already present in the book are skipped, so an interrupted run
/// can be resumed.
#[derive(Debug, Clone)]
pub struct Deployer<F> {
    factory: F,
    slug: ChainSlug,
    config: ChainConfig,
    book_path: Option<PathBuf>,
}

impl<F> Deployer<F> {
    /// Create a new deployer.
    pub const fn new(factory: F, slug: ChainSlug, config: ChainConfig) -> Self {
        Self { factory, slug, config, book_path: None }
    }

    /// Save the address book to `path` after every deployment.
    pub fn with_book_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.book_path = Some(path.into());
        self
    }

    /// Get a reference to the factory.
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Get the chain slug.
    pub const fn slug(&self) -> ChainSlug {
        self.slug
    }

    /// ABI-encoded constructor arguments of `contract`. Dependencies are
    /// read from the book.
    pub fn constructor_args(
        &self,
        contract: CoreContract,
        book: &AddressBook,
    ) -> Result<Bytes, ScriptError> {
        let owner = self.config.role_owners.owner_address;
        let chain_slug = self.slug.as_u32();
        let dep = |c| book.core(self.slug, c);

        let args = match contract {
            CoreContract::Hasher => Hasher::constructorCall { owner_: owner }.abi_encode(),
            CoreContract::SignatureVerifier => {
                SignatureVerifier::constructorCall { owner_: owner }.abi_encode()
            }
            CoreContract::CapacitorFactory => {
                CapacitorFactory::constructorCall { owner_: owner }.abi_encode()
            }
            CoreContract::GasPriceOracle => {
                GasPriceOracle::constructorCall { owner_: owner, chainSlug_: chain_slug }
                    .abi_encode()
            }
            CoreContract::ExecutionManager => ExecutionManager::constructorCall {
                owner_: owner,
                chainSlug_: chain_slug,
                signatureVerifier_: dep(CoreContract::SignatureVerifier)?,
            }
            .abi_encode(),
            CoreContract::TransmitManager => TransmitManager::constructorCall {
                signatureVerifier_: dep(CoreContract::SignatureVerifier)?,
                owner_: owner,
                chainSlug_: chain_slug,
            }
            .abi_encode(),
            CoreContract::Socket => Socket::constructorCall {
                chainSlug_: chain_slug,
                hasher_: dep(CoreContract::Hasher)?,
                transmitManager_: dep(CoreContract::TransmitManager)?,
                executionManager_: dep(CoreContract::ExecutionManager)?,
                capacitorFactory_: dep(CoreContract::CapacitorFactory)?,
                owner_: owner,
                version_: SOCKET_VERSION.to_owned(),
            }
            .abi_encode(),
            CoreContract::FastSwitchboard => FastSwitchboard::constructorCall {
                owner_: owner,
                socket_: dep(CoreContract::Socket)?,
                chainSlug_: chain_slug,
                timeoutInSeconds_: U256::from(self.config.timeout()),
                signatureVerifier_: dep(CoreContract::SignatureVerifier)?,
            }
            .abi_encode(),
            CoreContract::OptimisticSwitchboard => OptimisticSwitchboard::constructorCall {
                owner_: owner,
                socket_: dep(CoreContract::Socket)?,
                chainSlug_: chain_slug,
                timeoutInSeconds_: U256::from(self.config.timeout()),
                signatureVerifier_: dep(CoreContract::SignatureVerifier)?,
            }
            .abi_encode(),
        };
        Ok(args.into())
    }

    fn persist(&self, book: &AddressBook) -> Result<(), ScriptError> {
        if let Some(path) = &self.book_path {
            book.save(path)?;
        }
        Ok(())
    }
}

impl<F: ContractFactory> Deployer<F> {
    /// Deploy every core contract missing from the book.
    ///
    /// Returns the contracts deployed by this run.
    #[instrument(skip_all, fields(chain = %self.slug))]
    pub async fn deploy(&self, book: &mut AddressBook) -> Result<ChainAddresses, ScriptError> {
        let mut deployed = ChainAddresses::default();

        for contract in CoreContract::ALL {
            if let Ok(address) = book.core(self.slug, contract) {
                info!(%contract, %address, "already deployed, skipping");
                continue;
            }

            let args = self.constructor_args(contract, book)?;
            let Deployed { address, block } = self
                .factory
                .deploy(contract, args)
                .await
                .map_err(|e| ScriptError::Factory(Box::new(e)))?;
            info!(%contract, %address, "deployed");

            let mut entry = ChainAddresses::default().with_core(contract, address);
            let has_start_block = book.chain(self.slug).is_some_and(|c| c.start_block.is_some());
            if !has_start_block {
                entry.start_block = block;
            }
            deployed.merge(entry.clone());
            book.merge_chain(self.slug, entry);
            self.persist(book)?;
        }

        Ok(deployed)
    }
}

/// Register the fast and optimistic switchboards for every sibling on the
/// Socket, recording the capacitor and decapacitor of each new path.
///
/// Paths already recorded in the book are skipped. When `book_path` is set
/// the book is saved after every registration, so a failure part way
/// through keeps the paths that already landed.
#[instrument(skip_all, fields(chain = %context.slug()))]
pub async fn connect<P, S>(
    context: &ChainContext<P, S>,
    config: &ChainConfig,
    book: &mut AddressBook,
    book_path: Option<&Path>,
) -> Result<usize, ScriptError>
where
    P: Provider,
{
    let slug = context.slug();
    let socket = Socket::new(book.core(slug, CoreContract::Socket)?, context.provider());
    let mut connected = 0;

    for sibling in config.siblings.iter().copied() {
        for (integration, core) in [
            (IntegrationType::Fast, CoreContract::FastSwitchboard),
            (IntegrationType::Optimistic, CoreContract::OptimisticSwitchboard),
        ] {
            if book.integration(slug, sibling, integration).is_ok() {
                continue;
            }
            let switchboard = book.core(slug, core)?;

            let tx = socket
                .registerSwitchBoard(
                    switchboard,
                    U256::from(DEFAULT_MAX_PACKET_LENGTH),
                    sibling.as_u32(),
                    DEFAULT_CAPACITOR_TYPE,
                )
                .into_transaction_request();
            context.send(tx).await?;

            let capacitor = socket.capacitors__(switchboard, sibling.as_u32()).call().await?;
            let decapacitor = socket.decapacitors__(switchboard, sibling.as_u32()).call().await?;
            info!(%sibling, %integration, %capacitor, %decapacitor, "registered switchboard");

            book.merge_chain(
                slug,
                ChainAddresses::default().with_integration(
                    sibling,
                    integration,
                    IntegrationAddresses { switchboard, capacitor, decapacitor },
                ),
            );
            if let Some(path) = book_path {
                book.save(path)?;
            }
            connected += 1;
        }
    }

    Ok(connected)
}
