//! Trolley command line entry point

use std::io::{self, Write};

use anyhow::Context;
use tracing::info;

use trolley::{fixtures::Fixture, receipt};

use crate::cli::config::Config;

mod cli;

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|error| error.exit());

    cli::logging::init(&config).context("failed to initialise logging")?;

    let mut fixture = Fixture::with_base_path(&config.fixtures);

    fixture
        .load_products(&config.set)
        .and_then(|fixture| fixture.load_cart(&config.set))
        .with_context(|| format!("failed to load fixture set {}", config.set))?;

    let catalog = fixture.catalog()?;
    let mut cart = fixture.cart()?;

    info!(
        set = %config.set,
        lines = cart.len(),
        steps = config.steps.len(),
        "replaying cart steps"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    cli::replay(catalog, &mut cart, &config.steps, &mut out)?;

    receipt::write_cart(&mut out, &cart)?;

    out.flush()?;

    Ok(())
}
