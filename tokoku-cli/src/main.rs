//! Tokoku CLI - drive the storefront flows from a terminal.
//!
//! Each subcommand is one page visit: it builds the matching flow
//! controller, drives it, renders the result as text, and exits. All state
//! that survives between visits (the session, open payment windows) lives in
//! the client-state file.

mod cli;
mod commands;
mod context;
mod prompt;

use anyhow::Result;
use clap::Parser;
use cli::{CartAction, Cli, Commands, SellerAction};
use colored::Colorize;
use context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    tokoku::init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::from_env()?;

    match cli.command {
        Commands::Login(args) => commands::auth::login(&ctx, args).await?,
        Commands::Register(args) => commands::auth::register(&ctx, args).await?,
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await?,
        Commands::Products(args) => commands::products::list(&ctx, args).await?,
        Commands::Product(args) => commands::products::detail(&ctx, args).await?,
        Commands::Add(args) => commands::products::add_to_cart(&ctx, args).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx).await?,
            CartAction::Update(args) => commands::cart::update(&ctx, args).await?,
            CartAction::Remove(args) => commands::cart::remove(&ctx, args).await?,
            CartAction::Clear => commands::cart::clear(&ctx).await?,
            CartAction::Checkout(args) => commands::cart::checkout(&ctx, args).await?,
        },
        Commands::Orders => commands::orders::list(&ctx).await?,
        Commands::Pay(args) => commands::pay::run(&ctx, args).await?,
        Commands::Seller { action } => match action {
            SellerAction::Products => commands::seller::products(&ctx).await?,
            SellerAction::Create(args) => commands::seller::create(&ctx, args).await?,
            SellerAction::Update(args) => commands::seller::update(&ctx, args).await?,
            SellerAction::Delete(args) => commands::seller::delete(&ctx, args).await?,
        },
    }

    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "→".blue(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}
