use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wss_client::config::{ClientConfig, Modes, Target, DEFAULT_PATH};
use wss_client::socket::tls::TrustStore;
use wss_client::{console, Client};

#[derive(Parser, Debug)]
#[command(name = "wss-client")]
#[command(about = "Exchange one message with a TLS WebSocket server, blocking and async")]
#[command(version)]
struct Cli {
    /// Server host name or IP address
    host: String,

    /// Server port, numeric or a service name such as `https`
    port: String,

    /// Text message to send
    text: String,

    /// Upgrade request path
    #[arg(long, default_value = DEFAULT_PATH)]
    path: String,

    /// Extra PEM file of trusted CA certificates
    #[arg(long = "ca-file", env = "WSS_CLIENT_CA_FILE")]
    ca_files: Vec<PathBuf>,

    /// Do not load the system's default roots
    #[arg(long)]
    no_system_roots: bool,

    /// Which drivers to run
    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "WSS_CLIENT_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Both,
    Sync,
    Async,
}

impl From<ModeArg> for Modes {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Both => Modes::Both,
            ModeArg::Sync => Modes::BlockingOnly,
            ModeArg::Async => Modes::CooperativeOnly,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cli.log_level))
                .context("invalid log filter")?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("installing log subscriber")?;

    let mut trust = if cli.no_system_roots {
        TrustStore::empty()
    } else {
        TrustStore::system()
    };
    for file in &cli.ca_files {
        trust = trust.with_ca_file(file);
    }

    let config = ClientConfig::builder()
        .trust(trust)
        .modes(cli.mode.into())
        .build();
    let client = Client::new(config, Arc::new(console::stdout()))
        .context("initializing TLS trust store")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building async runtime")?;

    let target = Target::new(cli.host, cli.port, cli.text).with_path(cli.path);
    let summary = client.run(&runtime, &target);
    tracing::debug!(?summary, "all sessions finished");

    Ok(())
}
