use crate::cli::CliContext;
use crate::constants;
use crate::util::clipboard;
use anyhow::{bail, Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use dialoguer::Password;
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use zeroize::Zeroizing;

fn parse_service(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("service name cannot be empty".into());
    }
    Ok(s.to_string())
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Service name
    #[arg(value_parser = parse_service)]
    pub service: String,

    /// Password (prompted for when omitted)
    #[arg(conflicts_with = "generate")]
    pub password: Option<String>,

    /// Generate a random alphanumeric password and print it
    #[arg(long)]
    pub generate: bool,

    /// Length for a generated password
    #[arg(long, default_value_t = constants::DEFAULT_GENERATED_LENGTH, requires = "generate")]
    pub length: usize,
}

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Service name
    #[arg(value_parser = parse_service)]
    pub service: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Service name
    #[arg(value_parser = parse_service)]
    pub service: String,

    /// New password (prompted for when omitted)
    pub new_password: Option<String>,
}

pub fn run_new(ctx: &CliContext, args: NewArgs) -> Result<()> {
    let password: Zeroizing<String> = if args.generate {
        if args.length == 0 {
            bail!("--length must be at least 1");
        }
        Zeroizing::new(generate_secret(args.length))
    } else {
        resolve_password(args.password, &args.service)?
    };

    ctx.service
        .add(&args.service, &password)
        .with_context(|| format!("add password for {}", args.service))?;
    println!("Password added.");
    if args.generate {
        println!("{}", password.as_str());
    }
    Ok(())
}

pub fn run_get(ctx: &CliContext, args: ServiceArgs) -> Result<()> {
    let password = ctx.service.get(&args.service)?;
    println!("{}", password.as_str());
    Ok(())
}

pub fn run_copy(ctx: &CliContext, args: ServiceArgs) -> Result<()> {
    let password = ctx.service.get(&args.service)?;
    clipboard::copy(&password).context("copy password to clipboard")?;
    println!("Copied to clipboard.");
    Ok(())
}

pub fn run_edit(ctx: &CliContext, args: EditArgs) -> Result<()> {
    let password = resolve_password(args.new_password, &args.service)?;
    ctx.service
        .update(&args.service, &password)
        .with_context(|| format!("update password for {}", args.service))?;
    println!("Password updated.");
    Ok(())
}

pub fn run_view_keys(ctx: &CliContext) -> Result<()> {
    for service in ctx.service.list_services()? {
        println!("{}", service);
    }
    Ok(())
}

pub fn run_view_passwords(ctx: &CliContext) -> Result<()> {
    let entries = ctx.service.list_with_plaintext()?;
    if entries.is_empty() {
        println!("No passwords stored");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Service").add_attribute(Attribute::Bold),
        Cell::new("Password").add_attribute(Attribute::Bold),
    ]);
    for (service, password) in &entries {
        table.add_row(vec![service.as_str(), password.as_str()]);
    }

    println!("{}", table);
    Ok(())
}

pub fn run_delete(ctx: &CliContext, args: ServiceArgs) -> Result<()> {
    ctx.service.delete(&args.service)?;
    println!("Password removed.");
    Ok(())
}

/// Use the password given on the command line, or prompt for it twice.
fn resolve_password(given: Option<String>, service: &str) -> Result<Zeroizing<String>> {
    if let Some(password) = given {
        return Ok(Zeroizing::new(password));
    }
    let password = Password::new()
        .with_prompt(format!("Password for {}", service))
        .with_confirmation("Repeat password", "Passwords do not match")
        .allow_empty_password(false)
        .interact()
        .context("read password from prompt")?;
    Ok(Zeroizing::new(password))
}

fn generate_secret(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
