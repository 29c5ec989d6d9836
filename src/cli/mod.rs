//! CLI routing and command dispatch.

use crate::constants;
use crate::core::service::CredentialService;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod credential;
pub mod storage;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub service: CredentialService,
}

#[derive(Parser, Debug)]
#[command(name = "pswd", version, about = "CLI password manager with RSA encryption")]
pub struct Cli {
    /// Location config recording where the key and data files live
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "PSWD_CONFIG",
        default_value = constants::DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let service = CredentialService::open(&self.config)
            .with_context(|| format!("open location config {}", self.config.display()))?;
        let mut ctx = CliContext { service };

        match self.command {
            Commands::New(args) => credential::run_new(&ctx, args),
            Commands::Get(args) => credential::run_get(&ctx, args),
            Commands::Copy(args) => credential::run_copy(&ctx, args),
            Commands::Edit(args) => credential::run_edit(&ctx, args),
            Commands::ViewKeys => credential::run_view_keys(&ctx),
            Commands::ViewPasswords => credential::run_view_passwords(&ctx),
            Commands::Delete(args) => credential::run_delete(&ctx, args),
            Commands::GetStorage => storage::run_get_storage(&ctx),
            Commands::ResetStorage(args) => storage::run_reset_storage(&mut ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new password for a service (service names are case-insensitive)
    New(credential::NewArgs),
    /// Print the password for a service
    Get(credential::ServiceArgs),
    /// Copy the password for a service to the clipboard
    Copy(credential::ServiceArgs),
    /// Change an existing password
    Edit(credential::EditArgs),
    /// List every service with a stored password
    #[command(alias = "view_keys")]
    ViewKeys,
    /// Show every service together with its password
    #[command(alias = "view_passwords")]
    ViewPasswords,
    /// Remove the password for a service
    Delete(credential::ServiceArgs),
    /// Print the storage file path
    #[command(alias = "get_storage")]
    GetStorage,
    /// Move the storage file and remember its new location
    #[command(alias = "reset_storage")]
    ResetStorage(storage::ResetStorageArgs),
}
