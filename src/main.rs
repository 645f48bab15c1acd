use clap::Parser;
use log::debug;

mod args;
mod norm;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = norm::run_normalize(&args) {
        eprintln!("survnorm: error: {}", e);
        std::process::exit(1);
    }
}
