//! Alipay Demo CLI
//!
//! Command-line interface for rendering page-pay forms and checking
//! gateway notifications with a merchant configuration file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "alipay-demo")]
#[command(about = "Alipay Demo CLI - Sign page-pay requests and verify notifications", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Merchant configuration file (JSON)
    #[arg(short, long, global = true, default_value = "alipay.json")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a configuration template
    InitConfig {
        /// Output file (defaults to the --config path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Point the template at the sandbox gateway
        #[arg(long)]
        sandbox: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Render the auto-submitting page-pay form for an order
    Pay {
        /// Merchant order id
        #[arg(long)]
        out_trade_no: String,

        /// Order title shown to the payer
        #[arg(short, long)]
        subject: String,

        /// Total in yuan (e.g. 88.88)
        #[arg(short, long)]
        amount: String,

        /// Order description
        #[arg(short, long, default_value = "")]
        body: String,

        /// Product code
        #[arg(long, default_value = alipay_lib::order::FAST_INSTANT_TRADE_PAY)]
        product_code: String,

        /// Write the HTML to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a form-encoded notification body
    Verify {
        /// File holding the raw POST body (reads stdin when omitted)
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("alipay_demo_cli=debug,alipay_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("alipay_demo_cli=info,alipay_lib=warn")
            .init();
    }

    // Dispatch commands
    match cli.command {
        Commands::InitConfig {
            output,
            sandbox,
            force,
        } => {
            let path = output.unwrap_or(cli.config);
            commands::init_config::run(&path, sandbox, force, cli.verbose)?;
        }
        Commands::Pay {
            out_trade_no,
            subject,
            amount,
            body,
            product_code,
            output,
        } => {
            let request = commands::pay::PayRequest {
                out_trade_no,
                subject,
                amount,
                body,
                product_code,
            };
            commands::pay::run(&cli.config, &request, output.as_deref(), cli.verbose)?;
        }
        Commands::Verify { input } => {
            commands::verify::run(&cli.config, input.as_deref(), cli.verbose)?;
        }
    }

    Ok(())
}
