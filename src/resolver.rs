use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{ConverterError, Result};
use crate::models::{RateEntry, RateMap, Record};
use crate::rate_source::RateSource;

/// Distinct dates of a record set, in a stable order
pub fn distinct_dates(records: &[Record]) -> BTreeSet<String> {
    records.iter().map(|r| r.date.clone()).collect()
}

/// Resolve one rate per distinct date
///
/// Spawns one lookup task per date and waits for every task to settle
/// before building the map. A failed lookup only marks its own date as
/// `Unavailable`. The call as a whole fails only when a task cannot be
/// joined (it panicked or was cancelled), which is reported as
/// `ConverterError::ResolverFailure`.
///
/// The returned map has exactly one entry per date in `dates`.
pub async fn resolve<S>(source: Arc<S>, dates: &BTreeSet<String>) -> Result<RateMap>
where
    S: RateSource + 'static,
{
    log::info!("Resolving {} {} rate(s)", dates.len(), source.currency());

    let handles: Vec<_> = dates
        .iter()
        .cloned()
        .map(|date| {
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let result = source.fetch_rate(&date).await;
                (date, result)
            })
        })
        .collect();

    // Each task owns its slot; the map is only touched after the join
    let mut rates = RateMap::with_capacity(dates.len());
    let mut join_failures = Vec::new();

    for outcome in futures::future::join_all(handles).await {
        match outcome {
            Ok((date, Ok(rate))) => {
                let entry = RateEntry::Available(rate);
                if entry.usable_rate().is_none() {
                    log::warn!("Ignoring non-positive rate {} for {}", rate, date);
                    rates.insert(date, RateEntry::Unavailable);
                } else {
                    log::debug!("Rate for {}: {}", date, rate);
                    rates.insert(date, entry);
                }
            }
            Ok((date, Err(e))) => {
                log::warn!("No rate for {}: {}", date, e);
                rates.insert(date, RateEntry::Unavailable);
            }
            Err(e) => join_failures.push(e.to_string()),
        }
    }

    if !join_failures.is_empty() {
        return Err(ConverterError::ResolverFailure(join_failures.join("; ")));
    }

    Ok(rates)
}

/// Resolve rates for the distinct dates of `records`
pub async fn resolve_for_records<S>(source: Arc<S>, records: &[Record]) -> Result<RateMap>
where
    S: RateSource + 'static,
{
    resolve(source, &distinct_dates(records)).await
}

