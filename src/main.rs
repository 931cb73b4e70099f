use std::env;
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result};
use daily_rate_converter::http_source::{HttpRateSource, RateSourceConfig};
use daily_rate_converter::session::ConversionSession;
use daily_rate_converter::write_report;

const BASE_URL_VAR: &str = "RATE_SOURCE_URL";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    anyhow::ensure!(
        (2..=3).contains(&args.len()),
        "Usage: {} <input.txt|-> [CURRENCY]",
        args.first().unwrap_or(&"daily-rate-converter".to_string())
    );

    let input = read_input(&args[1])?;

    let mut config = RateSourceConfig::default();
    if let Some(currency) = args.get(2) {
        config = config.with_currency(currency);
    }
    if let Ok(base_url) = env::var(BASE_URL_VAR) {
        config = config.with_base_url(base_url);
    }

    let source = HttpRateSource::new(config).context("Failed to set up the rate source")?;
    let session = ConversionSession::new(Arc::new(source));

    let report = session.run(&input).await?;

    write_report(&report, io::stdout()).context("Failed to write conversion report")?;

    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read input from stdin")?;
        return Ok(input);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read input file '{}'", path))
}
