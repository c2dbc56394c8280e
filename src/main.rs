//! Till Register CLI
//!
//! Lists the catalog, reads product codes from stdin, and prints a receipt.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --catalog data/products.json
//! ```
//!
//! # Environment Variables
//!
//! - `TILL_CATALOG`: catalog path, same as `--catalog`
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use till_register::{Catalog, Result, Session};

/// Point-of-sale simulator: scan product codes, then print a receipt.
#[derive(Parser, Debug)]
#[command(name = "till-register", version, about)]
struct Cli {
    /// Product catalog (JSON list of product records)
    #[arg(
        long,
        short = 'c',
        env = "TILL_CATALOG",
        default_value = "data/products.json"
    )]
    catalog: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = Catalog::from_path(&cli.catalog)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(&catalog, stdout.lock());
    session.run(stdin.lock())?;

    Ok(())
}
