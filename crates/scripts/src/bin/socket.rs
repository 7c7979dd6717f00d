//! `socket`: deploy and operate Socket contracts across chains.

use alloy::{
    network::EthereumWallet,
    primitives::U256,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use clap::{Parser, Subcommand};
use eyre::{OptionExt, Result};
use socket_constants::{ChainRegistry, ChainSlug};
use socket_deployments::{AddressBook, ChainConfigs, IntegrationType};
use socket_scripts::{connect, ops, ArtifactFactory, ChainContext, Deployer};
use socket_types::{config::load_rpc_url, PacketId, TransmissionParam};
use std::{collections::HashMap, path::PathBuf};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about = "Socket deployment and operations", long_about = None)]
struct Args {
    /// Private key signing transactions and privileged updates
    #[arg(long = "private-key", value_name = "KEY", env = "SOCKET_PRIVATE_KEY", global = true)]
    private_key: Option<String>,

    /// Address book JSON file
    #[arg(
        long = "address-book",
        env = "SOCKET_ADDRESS_BOOK",
        default_value = "deployments/addresses.json",
        global = true
    )]
    address_book: PathBuf,

    /// Per-chain deployment config JSON file
    #[arg(
        long = "chain-config",
        env = "SOCKET_CHAIN_CONFIG",
        default_value = "deployments/chain-config.json",
        global = true
    )]
    chain_config: PathBuf,

    /// Directory of compiled contract artifacts
    #[arg(long = "artifacts", env = "SOCKET_ARTIFACTS", default_value = "out", global = true)]
    artifacts: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deploy every core contract missing from the address book
    Deploy {
        /// Chain to deploy on, by slug or network key
        #[arg(long)]
        chain: ChainSlug,
    },
    /// Register switchboards for every configured sibling
    Connect {
        #[arg(long)]
        chain: ChainSlug,
    },
    /// Grant configured roles that are not yet held
    GrantRoles {
        #[arg(long)]
        chain: ChainSlug,
        /// List missing grants without sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Set the attest gas limit of a switchboard
    SetAttestGasLimit {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dst: ChainSlug,
        #[arg(long, value_parser = parse_integration)]
        integration: IntegrationType,
        limit: U256,
    },
    /// Set the execution overhead of a switchboard
    SetExecutionOverhead {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dst: ChainSlug,
        #[arg(long, value_parser = parse_integration)]
        integration: IntegrationType,
        overhead: U256,
    },
    /// Set the propose gas limit of the transmit manager
    SetProposeGasLimit {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dst: ChainSlug,
        limit: U256,
    },
    /// Trip or untrip an inbound path
    TripPath {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        src: ChainSlug,
        #[arg(long, value_parser = parse_integration)]
        integration: IntegrationType,
        /// Untrip instead of trip
        #[arg(long)]
        untrip: bool,
    },
    /// Point native bridge switchboards at the capacitors in the book
    SyncCapacitors {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the next packet to be sealed on every path of the book
    NextPackets,
    /// Relay a sealed packet through the native bridge
    RelayNative {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dst: ChainSlug,
        packet_id: PacketId,
    },
    /// Set the relative gas price of a destination on the gas price oracle
    SetGasPrice {
        #[arg(long)]
        chain: ChainSlug,
        #[arg(long)]
        dst: ChainSlug,
        price: U256,
    },
    /// List registered chains
    Chains,
    /// Encode or decode packet identifiers
    #[command(subcommand)]
    PacketId(PacketIdCommand),
    /// Encode or decode transmission parameters
    #[command(subcommand)]
    Param(ParamCommand),
}

#[derive(Debug, Subcommand)]
enum PacketIdCommand {
    /// Build an identifier from its parts
    Encode { chain_slug: u32, capacitor: String, nonce: U256 },
    /// Split an identifier, decimal or 0x-hex
    Decode { packet_id: PacketId },
}

#[derive(Debug, Subcommand)]
enum ParamCommand {
    /// Pack a parameter word
    Encode { version: u64, finality_type: u64, value: u64 },
    /// Unpack a 32-byte parameter word
    Decode { param: TransmissionParam },
}

fn parse_integration(s: &str) -> Result<IntegrationType, String> {
    let normalized = s.trim().to_uppercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unknown integration type {s}"))
}

impl Args {
    fn signer(&self) -> Result<PrivateKeySigner> {
        let key = self.private_key.as_deref().ok_or_eyre("a private key is required")?;
        Ok(key.parse()?)
    }

    async fn context(
        &self,
        slug: ChainSlug,
    ) -> Result<ChainContext<impl Provider, PrivateKeySigner>> {
        let signer = self.signer()?;
        let url = load_rpc_url(slug)?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer.clone()))
            .connect(&url)
            .await?;
        let configs = ChainConfigs::load(&self.chain_config)?;
        Ok(ChainContext::resolve(slug, provider, signer, &configs).await?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Deploy { chain } => {
            let context = args.context(*chain).await?;
            let config = ChainConfigs::load(&args.chain_config)?.get(*chain)?.clone();
            let mut book = AddressBook::load(&args.address_book)?;
            let factory = ArtifactFactory::new(&context, &args.artifacts);
            let deployed = Deployer::new(factory, *chain, config)
                .with_book_path(&args.address_book)
                .deploy(&mut book)
                .await?;
            info!(deployed = deployed.cores().count(), "deployment complete");
        }
        Command::Connect { chain } => {
            let context = args.context(*chain).await?;
            let configs = ChainConfigs::load(&args.chain_config)?;
            let mut book = AddressBook::load(&args.address_book)?;
            let book_path = Some(args.address_book.as_path());
            let connected = connect(&context, configs.get(*chain)?, &mut book, book_path).await?;
            info!(connected, "connection complete");
        }
        Command::GrantRoles { chain, dry_run } => {
            let context = args.context(*chain).await?;
            let configs = ChainConfigs::load(&args.chain_config)?;
            let config = configs.get(*chain)?;
            let book = AddressBook::load(&args.address_book)?;
            let grants = if *dry_run {
                ops::pending_grants(&context, config, &book).await?
            } else {
                ops::grant_roles(&context, config, &book).await?
            };
            for grant in grants {
                println!(
                    "{} {} {} -> {}",
                    grant.contract, grant.address, grant.role, grant.grantee
                );
            }
        }
        Command::SetAttestGasLimit { chain, dst, integration, limit } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            ops::set_attest_gas_limit(&context, &book, *dst, *integration, *limit).await?;
        }
        Command::SetExecutionOverhead { chain, dst, integration, overhead } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            ops::set_execution_overhead(&context, &book, *dst, *integration, *overhead).await?;
        }
        Command::SetProposeGasLimit { chain, dst, limit } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            ops::set_propose_gas_limit(&context, &book, *dst, *limit).await?;
        }
        Command::TripPath { chain, src, integration, untrip } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            ops::set_path_tripped(&context, &book, *src, *integration, !untrip).await?;
        }
        Command::SyncCapacitors { chain, dry_run } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            let mismatches = if *dry_run {
                ops::capacitor_mismatches(&context, &book).await?
            } else {
                ops::sync_capacitors(&context, &book).await?
            };
            for m in mismatches {
                println!("{} {}: {} -> {}", m.remote, m.switchboard, m.on_chain, m.expected);
            }
        }
        Command::NextPackets => {
            let book = AddressBook::load(&args.address_book)?;
            let mut providers = HashMap::new();
            for (slug, _) in book.chains() {
                let Ok(url) = load_rpc_url(slug) else {
                    warn!(chain = %slug, "no rpc url configured");
                    continue;
                };
                providers.insert(slug, ProviderBuilder::new().connect(&url).await?);
            }
            let results = ops::next_packets(&book, &providers).await;
            print!("{}", ops::render_packets(&results));
        }
        Command::RelayNative { chain, dst, packet_id } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            let tx_hash = ops::relay_native(&context, &book, *dst, *packet_id).await?;
            println!("{tx_hash}");
        }
        Command::SetGasPrice { chain, dst, price } => {
            let context = args.context(*chain).await?;
            let book = AddressBook::load(&args.address_book)?;
            ops::set_gas_price(&context, &book, *dst, *price).await?;
        }
        Command::Chains => {
            let registry = ChainRegistry::global()?;
            for slug in ChainSlug::ALL.iter().copied() {
                println!(
                    "{:>10}  {:<24} {:<10} {}",
                    slug.as_u32(),
                    slug.network_key(),
                    registry.family(slug).as_str(),
                    slug.name(),
                );
            }
        }
        Command::PacketId(PacketIdCommand::Encode { chain_slug, capacitor, nonce }) => {
            let id = PacketId::encode(*chain_slug, capacitor, *nonce)?;
            println!("{id}");
            println!("{}", id.to_b256());
        }
        Command::PacketId(PacketIdCommand::Decode { packet_id }) => {
            let parts = packet_id.decode()?;
            println!("chain slug: {}", parts.chain_slug.as_u32());
            println!("capacitor:  {}", parts.capacitor);
            println!("nonce:      {}", parts.nonce);
        }
        Command::Param(ParamCommand::Encode { version, finality_type, value }) => {
            let param = TransmissionParam::try_encode(*version, *finality_type, *value)?;
            println!("{}", param.to_b256());
        }
        Command::Param(ParamCommand::Decode { param }) => {
            println!("version:       {}", param.version());
            println!("finality type: {}", param.finality_type());
            println!("value:         {}", param.value());
            println!("finality:      {:?}", param.finality()?);
        }
    }

    Ok(())
}
