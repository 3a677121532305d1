//! Reduce collected funding to lightning addresses.

use lnfund_deps::{Funding, FundingMap, FundingSource, LightningMap, LIGHTNING_SCHEME};

/// Keep the lightning-typed funding of each package.
///
/// - A list keeps the url of its first `"lightning"` record, untouched.
/// - A single `"lightning"` record keeps its url with any leading
///   `lightning:` removed.
/// - Bare strings, missing funding, and records without a url are dropped.
///
/// Output order follows `results`.
pub fn filter_lightning(results: &FundingMap) -> LightningMap {
    let mut lightning = LightningMap::new();

    for (package, funding) in results {
        let address = match funding {
            Some(Funding::Many(sources)) => sources
                .iter()
                .filter_map(FundingSource::as_record)
                .find(|record| record.is_lightning())
                .and_then(|record| record.url.clone()),
            Some(Funding::Single(record)) if record.is_lightning() => {
                record.url.as_deref().map(strip_lightning_scheme)
            }
            _ => None,
        };

        if let Some(address) = address {
            lightning.insert(package.clone(), address);
        }
    }

    lightning
}

/// Drop a leading `lightning:` scheme marker.
pub fn strip_lightning_scheme(url: &str) -> String {
    url.strip_prefix(LIGHTNING_SCHEME).unwrap_or(url).to_string()
}
