use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use press_front::{export, server, Config, Site};

#[derive(Parser)]
#[command(
    name = "press-front",
    version,
    about = "Serve or export the feed, sitemap and robots.txt of a headless CMS site"
)]
struct Cli {
    /// Path to the TOML config file
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve /robots.txt, /rss.xml and /sitemap.xml
    Serve {
        /// Overrides `net.bind`
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Write robots.txt, rss.xml and sitemap.xml into a directory
    Build {
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "press_front=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            error!(path = %cli.config.display(), error = %err, "could not load config");
            return ExitCode::FAILURE;
        }
    };
    debug!(?config, "loaded config");

    let result = match Site::new(&config) {
        Ok(site) => run(cli.command, site, &config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, site: Site, config: &Config) -> press_front::Result<()> {
    match command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or(config.net.bind);
            info!(api = site.client().api_url(), "using content API");
            server::serve(Arc::new(site), bind).await
        }
        Command::Build { out } => {
            let written = export::export(&site, &out).await?;
            info!(files = written.len(), out = %out.display(), "export complete");
            Ok(())
        }
    }
}
