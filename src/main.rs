//! Portal session CLI
//!
//! Interactive login against the portal's authentication endpoint: prompts
//! for credentials (pre-filling the remembered username), runs the session
//! bootstrapper, and prints the post-login destination.

use portal_session::core::config::{CliArgs, CliCommand};
use portal_session::core::{Config, Logger, PortalError};
use portal_session::session::{
    AuthClient, Credentials, FileUsernameStore, Notifier, SessionBootstrapper, SessionContext,
    Severity, SubmitOutcome, UsernameStore,
};

use anyhow::Result;
use clap::Parser;
use colored::*;
use dialoguer::{Input, Password};
use std::sync::Arc;
use tracing::{info, warn};

/// Notifier rendering outcomes on the terminal
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => println!("{} {}", "✓".green().bold(), message.green()),
            Severity::Error => eprintln!("{} {}", "✗".red().bold(), message.red()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = match Config::from_cli(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), "Portal session client");
    info!(base_url = %config.portal.base_url, "Portal configuration");

    match &args.command {
        CliCommand::Login {
            username,
            no_remember,
        } => login(&config, username.clone(), *no_remember).await,
        CliCommand::Forget => forget(&config),
    }
}

async fn login(config: &Config, username_arg: Option<String>, no_remember: bool) -> Result<()> {
    let store = FileUsernameStore::new(&config.storage.data_dir);
    let remembered = store.load().unwrap_or_else(|e| {
        warn!("Could not read remembered username: {}", e);
        None
    });

    let username = match username_arg {
        Some(username) => username,
        None => {
            let mut prompt = Input::<String>::new().with_prompt("Username");
            if let Some(remembered) = remembered {
                prompt = prompt.default(remembered);
            }
            prompt.interact_text()?
        }
    };

    let password = Password::new().with_prompt("Password").interact()?;
    let credentials = Credentials::new(username, password);

    let client = AuthClient::new(&config.portal)?;
    let session = Arc::new(SessionContext::new());
    let notifier = Arc::new(ConsoleNotifier);
    let bootstrapper = SessionBootstrapper::new(client, session, notifier, &config.routing);

    match bootstrapper.submit(&credentials).await {
        Ok(SubmitOutcome::Success { destination, .. }) => {
            if no_remember {
                store.clear()?;
            } else {
                store.save(credentials.username.trim())?;
            }
            println!("Destination: {}", destination.route().bold());
            Ok(())
        }
        Ok(SubmitOutcome::Ignored) => Ok(()),
        Err(e) => {
            // Validation errors never reach the notifier; surface them here
            if matches!(e, PortalError::ValidationError(_)) {
                eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
            }
            std::process::exit(1);
        }
    }
}

fn forget(config: &Config) -> Result<()> {
    let store = FileUsernameStore::new(&config.storage.data_dir);
    store.clear()?;
    println!("Remembered username cleared.");
    Ok(())
}
