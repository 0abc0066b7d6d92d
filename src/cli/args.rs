//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Invoice portal - session-aware front door to the invoice backend
#[derive(Parser, Debug)]
#[command(name = "invoice-portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print an amount in words
    Words(WordsArgs),

    /// Resolve where a token's user lands after login
    Landing(LandingArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST or 0.0.0.0)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT or 3000)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the words command
#[derive(Parser, Debug)]
pub struct WordsArgs {
    /// Amount to spell out, e.g. 1234.56
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,
}

/// Arguments for the landing command
#[derive(Parser, Debug)]
pub struct LandingArgs {
    /// Backend access token
    #[arg(short, long, env = "INVOICE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Print the full landing as JSON
    #[arg(long)]
    pub json: bool,
}
