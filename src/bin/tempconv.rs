//! `tempconv`: one-shot Celsius/Fahrenheit converter

use std::io;

use anyhow::Result;
use weatherdesk::config::WeatherDeskConfig;
use weatherdesk::{converter, logging};

fn main() -> Result<()> {
    // The converter needs nothing from the config besides logging
    let config = WeatherDeskConfig::load().unwrap_or_default();
    logging::init(&config.logging)?;

    let stdin = io::stdin();
    converter::run_session(stdin.lock(), io::stdout().lock())?;
    Ok(())
}
