//! Soilmate serve command
//!
//! Runs the HTTP server with settings from the config files and
//! environment. Flags override the bind address.

use anyhow::Result;
use clap::Args;
use soilmate_server::SoilmateServer;
use tracing::info;

use crate::config::{ConfigLoader, SoilmateConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Mark attribution cookies Secure (serving behind https)
    #[arg(long)]
    pub secure_cookies: bool,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = apply_args(ConfigLoader::load()?, &args);
    let integrations = &config.integrations;

    info!(
        webhook = integrations.sheets_webhook_url.is_some(),
        forms = integrations.forms_url.is_some(),
        brevo = integrations.brevo_api_key.is_some(),
        email = integrations.email_service.as_str(),
        "Starting soilmate server on {}",
        config.server.addr()
    );

    let server = SoilmateServer::new(config.server, integrations)?;
    server.run().await?;
    Ok(())
}

fn apply_args(mut config: SoilmateConfig, args: &ServeArgs) -> SoilmateConfig {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.secure_cookies {
        config.server.secure_cookies = true;
    }
    config
}
