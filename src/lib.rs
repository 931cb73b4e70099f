pub mod aggregator;
pub mod engine;
pub mod error;
pub mod http_source;
pub mod models;
pub mod parser;
pub mod rate_source;
pub mod resolver;
pub mod session;

use std::io::Write;
use std::sync::Arc;

use error::{ConverterError, Result};
use models::{ConvertedRow, Summary};
use rate_source::RateSource;

/// Rows and totals of one completed conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub rows: Vec<ConvertedRow>,
    pub summary: Summary,
}

/// Run the whole pipeline over raw input text
///
/// Parses the text, resolves one rate per distinct date, converts every
/// record and totals the result. Fails with `EmptyInput` when no line could
/// be parsed and with `ResolverFailure` when the rate lookups could not be
/// carried out; per-date lookup failures only mark the affected rows.
pub async fn convert_text<S>(source: Arc<S>, text: &str) -> Result<ConversionReport>
where
    S: RateSource + 'static,
{
    let records = parser::parse(text);
    if records.is_empty() {
        return Err(ConverterError::EmptyInput);
    }
    log::info!("Parsed {} record(s)", records.len());

    let rates = resolver::resolve_for_records(source, &records).await?;
    let rows = engine::convert(&records, &rates);
    let summary = aggregator::summarize(&rows);

    log::info!(
        "Converted {} of {} row(s), total {}",
        summary.valid_count,
        rows.len(),
        summary.total_converted
    );

    Ok(ConversionReport { rows, summary })
}

/// Write a report as CSV: the rows, a blank line, then the summary
pub fn write_report<W: Write>(report: &ConversionReport, mut writer: W) -> Result<()> {
    {
        let mut csv_writer = csv::Writer::from_writer(&mut writer);
        for row in &report.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
    }

    writeln!(writer)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.serialize(report.summary)?;
    csv_writer.flush()?;

    Ok(())
}
