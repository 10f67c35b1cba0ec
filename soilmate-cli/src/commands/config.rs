use std::io::{self, Write};

use crate::config::{ConfigLoader, SoilmateConfig};
use anyhow::Result;
use clap::{Args, Subcommand};
use soilmate_server::{EmailService, IntegrationsConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged, keys masked) and which
    /// integrations are live
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", toml::to_string_pretty(&config.redacted())?)?;
    print_integrations_to(&mut out, &config)?;
    Ok(())
}

fn show_paths() -> Result<()> {
    println!("User config:    {:?}", ConfigLoader::user_config_path());
    println!("Project config: {:?}", ConfigLoader::project_config_path());
    Ok(())
}

fn status(configured: bool) -> &'static str {
    if configured { "on" } else { "off" }
}

/// The email provider that will actually send, if any
fn active_email(integrations: &IntegrationsConfig) -> Option<&'static str> {
    let key = match integrations.email_service {
        EmailService::Resend => &integrations.resend_api_key,
        EmailService::SendGrid => &integrations.sendgrid_api_key,
        EmailService::None => return None,
    };
    key.as_ref().map(|_| integrations.email_service.as_str())
}

/// Print one line per integration saying whether requests reach it
pub fn print_integrations_to<W: Write>(w: &mut W, config: &SoilmateConfig) -> io::Result<()> {
    let integrations = &config.integrations;
    writeln!(w, "# Integrations")?;
    writeln!(w, "#   brevo contacts: {}", status(integrations.brevo_api_key.is_some()))?;
    writeln!(
        w,
        "#   sheets webhook: {}",
        status(integrations.sheets_webhook_url.is_some())
    )?;
    writeln!(w, "#   forms:          {}", status(integrations.forms_url.is_some()))?;
    match active_email(integrations) {
        Some(provider) => writeln!(w, "#   email:          {}", provider),
        None => writeln!(w, "#   email:          off"),
    }
}
