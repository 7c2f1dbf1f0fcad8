use std::io::{self, Write};

use clap::Parser;
use pwforge_cli::{Args, Error};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    if args.count == 0 {
        return Err(Error::InvalidCount);
    }

    let generator = args.generator();
    let spec = args.spec();
    debug!(?generator, "using pools");

    // Generate everything up front so a failure prints nothing.
    let passwords =
        (0..args.count).map(|_| generator.generate(&spec)).collect::<Result<Vec<_>, _>>()?;

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer(&mut out, &passwords)?;
        writeln!(out)?;
    } else {
        for password in &passwords {
            writeln!(out, "{password}")?;
        }
    }

    info!(count = passwords.len(), "generated passwords");
    Ok(())
}
