use greeter_core::HelloHandler;
use greeter_server::{
    BodyLimits, DEFAULT_BODY_READ_TIMEOUT, DEFAULT_MAX_BODY_BYTES, HttpServer, HttpServerConfig,
};

use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Run as a local HTTP server answering every request directly.
    /// Takes precedence over --simulator
    #[arg(long)]
    local: bool,

    /// Run as an HTTP server that repackages requests as API Gateway proxy invocations
    #[arg(long)]
    simulator: bool,

    /// Port the local server or simulator listens on
    #[arg(short, long, default_value = "8080")]
    port: String,

    /// Largest request body either server mode reads
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: usize,

    /// Seconds either server mode waits for a request body
    #[arg(long, default_value_t = DEFAULT_BODY_READ_TIMEOUT.as_secs())]
    body_timeout_secs: u64,
}

/// The entrypoint a process runs. Exactly one is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    /// Serve API Gateway proxy events through the function runtime.
    #[default]
    Invocation,
    Local,
    Simulator,
}

impl Mode {
    /// `local` wins when both flags are set.
    fn from_flags(local: bool, simulator: bool) -> Self {
        match (local, simulator) {
            (true, _) => Mode::Local,
            (false, true) => Mode::Simulator,
            (false, false) => Mode::Invocation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    port: String,
    body_limits: BodyLimits,
}

impl Args {
    fn into_parts(self) -> (Mode, Config) {
        let mode = Mode::from_flags(self.local, self.simulator);
        let config = Config {
            port: self.port,
            body_limits: BodyLimits {
                max_bytes: self.max_body_bytes,
                read_timeout: Duration::from_secs(self.body_timeout_secs),
            },
        };

        (mode, config)
    }
}

async fn run(mode: Mode, config: Config) -> anyhow::Result<()> {
    let server_config = HttpServerConfig {
        port: &config.port,
        body_limits: config.body_limits,
    };

    match mode {
        Mode::Invocation => greeter_lambda::run(HelloHandler)
            .await
            .map_err(anyhow::Error::from_boxed),
        Mode::Local => {
            init_tracing();
            tracing::info!("starting local server on port {}", config.port);
            HttpServer::local(server_config).await?.run().await
        }
        Mode::Simulator => {
            init_tracing();
            tracing::info!("starting API Gateway simulator on port {}", config.port);
            HttpServer::simulator(HelloHandler, server_config)
                .await?
                .run()
                .await
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (mode, config) = Args::parse().into_parts();

    run(mode, config).await
}
