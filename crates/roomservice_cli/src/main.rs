//! RoomService server CLI.
use anyhow::Result;
use clap::{Parser, Subcommand};
use roomservice_app::{RoomServiceApp, RoomServiceConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs the reservation server
    Run,
    /// Applies pending store migrations and exits
    Migrate,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// The level of logging to use for the server
    #[clap(long, global = true, default_value = tracing::Level::INFO.as_str())]
    log_level: tracing::Level,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    // axum logs rejections from built-in extractors with the `axum::rejection`
                    // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                    format!(
                        "roomservice_cli={lvl},roomservice_app={lvl},roomservice_server={lvl},\
                         roomservice_services={lvl},roomservice_store={lvl},tower_http={lvl},\
                         axum::rejection=trace",
                        lvl = self.log_level
                    )
                    .into()
                }),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        info!("started with {:?}", self);

        let app = RoomServiceApp::new(RoomServiceConfig::new()?);

        match &self.command {
            Command::Run => Ok(app.run().await?),
            Command::Migrate => {
                app.migrate()?;
                info!("store is up to date");
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup human panic
    human_panic::setup_panic!();

    Cli::parse().execute().await
}
