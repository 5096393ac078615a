mod rsa;
mod codec;
mod math;
mod error;
mod keystore;
mod session;
mod cli;

use std::error::Error;
use clap::Parser;
use crate::cli::Cli;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.into())
        .init();
    cli.execute()
}
