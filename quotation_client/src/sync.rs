//! Fetch/cache/fallback policy producing the list to display.
//!
//! `load` never fails: every failure path resolves to a (possibly empty)
//! list plus a human-readable diagnostic. Live and cached data are never
//! merged; the result is always one or the other.
use log::warn;

use quotation_common::QuotationRecord;

use crate::cache::SnapshotCache;
use crate::fetcher::FetchQuotations;
use crate::probe::Connectivity;

/// Diagnostic reported when there is nothing to show at all.
pub const NO_CACHED_DATA: &str = "no cached data available";

/// Where the returned records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh from the backend.
    Live,
    /// Read from the local snapshot.
    Cached,
}

/// Result of one load: the records to display, where they came from, and
/// an optional diagnostic for the banner.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Records to display, most recently updated first.
    pub records: Vec<QuotationRecord>,
    /// Source of the records.
    pub origin: Origin,
    /// Human-readable reason when something degraded.
    pub diagnostic: Option<String>,
}

/// Orchestrates fetcher, cache, and connectivity probe.
pub struct SyncPolicy<F, P> {
    fetcher: F,
    probe: P,
    cache: SnapshotCache,
}

impl<F: FetchQuotations, P: Connectivity> SyncPolicy<F, P> {
    /// Creates a policy over the given parts.
    pub fn new(fetcher: F, probe: P, cache: SnapshotCache) -> Self {
        SyncPolicy {
            fetcher,
            probe,
            cache,
        }
    }

    /// Produces the list to display.
    ///
    /// Online, the fetched list replaces the snapshot wholesale and is
    /// returned tagged live; an empty response is a valid live result, not
    /// a fallback trigger. Offline the fetcher is never called. On any
    /// fetch failure the snapshot is returned tagged cached, with the
    /// failure message as diagnostic.
    pub fn load(&self) -> LoadOutcome {
        if !self.probe.is_online() {
            return self.fall_back_to_cache(None);
        }

        match self.fetcher.fetch() {
            Ok(mut records) => {
                sort_newest_first(&mut records);
                if let Err(e) = self.cache.save(&records) {
                    warn!("Failed to persist snapshot: {}", e);
                }
                LoadOutcome {
                    records,
                    origin: Origin::Live,
                    diagnostic: None,
                }
            }
            Err(e) => self.fall_back_to_cache(Some(e.to_string())),
        }
    }

    fn fall_back_to_cache(&self, failure: Option<String>) -> LoadOutcome {
        let (mut records, read_failure) = match self.cache.load() {
            Ok(records) => (records, None),
            Err(e) => {
                warn!("Failed to read snapshot: {}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };
        sort_newest_first(&mut records);

        let diagnostic = if records.is_empty() {
            failure
                .or(read_failure)
                .or_else(|| Some(NO_CACHED_DATA.to_string()))
        } else {
            failure
        };
        LoadOutcome {
            records,
            origin: Origin::Cached,
            diagnostic,
        }
    }
}

/// Presentation ordering: most recently updated first.
fn sort_newest_first(records: &mut [QuotationRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotation_common::{QuotationError, Result};
    use std::fs;
    use tempfile::TempDir;

    enum StubFetcher {
        Succeeds(Vec<QuotationRecord>),
        Fails(&'static str),
        MustNotBeCalled,
    }

    impl FetchQuotations for StubFetcher {
        fn fetch(&self) -> Result<Vec<QuotationRecord>> {
            match self {
                StubFetcher::Succeeds(records) => Ok(records.clone()),
                StubFetcher::Fails(message) => {
                    Err(QuotationError::Network((*message).to_string()))
                }
                StubFetcher::MustNotBeCalled => {
                    panic!("the fetcher must not be called on this path")
                }
            }
        }
    }

    struct Online;
    struct Offline;

    impl Connectivity for Online {
        fn is_online(&self) -> bool {
            true
        }
    }

    impl Connectivity for Offline {
        fn is_online(&self) -> bool {
            false
        }
    }

    fn record(id: &str, updated_at: &str) -> QuotationRecord {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "clientName": "Ada Lovelace",
            "companyName": "Analytical Engines Ltd",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "address": "12 Byron Street, Denver",
            "eventDate": "2025-06-14",
            "startTime": "18:00",
            "endTime": "23:00",
            "numberOfGuests": 80,
            "servicesRequested": ["bar"],
            "createdAt": updated_at,
            "updatedAt": updated_at
        }))
        .unwrap()
    }

    fn cache_in(dir: &TempDir) -> SnapshotCache {
        SnapshotCache::new(dir.path().join("snapshot.json"))
    }

    #[test]
    fn live_results_are_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        let fetched = vec![
            record("older", "2024-01-01T00:00:00Z"),
            record("newer", "2024-02-01T00:00:00Z"),
        ];
        let policy = SyncPolicy::new(StubFetcher::Succeeds(fetched), Online, cache_in(&dir));

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Live);
        assert!(outcome.diagnostic.is_none());
        assert_eq!(outcome.records[0].id, "newer");
        assert_eq!(outcome.records[1].id, "older");
    }

    #[test]
    fn offline_never_calls_the_fetcher() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache
            .save(&[
                record("a", "2024-01-01T00:00:00Z"),
                record("b", "2024-02-01T00:00:00Z"),
            ])
            .unwrap();
        let policy = SyncPolicy::new(StubFetcher::MustNotBeCalled, Offline, cache);

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Cached);
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.diagnostic.is_none());
    }

    #[test]
    fn successful_fetch_overwrites_the_cache_without_merging() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.save(&[record("a", "2024-01-01T00:00:00Z")]).unwrap();

        let fetched = vec![record("b", "2024-02-01T00:00:00Z")];
        let policy = SyncPolicy::new(StubFetcher::Succeeds(fetched), Online, cache);

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Live);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "b");

        let persisted = cache_in(&dir).load().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, "b");
    }

    #[test]
    fn empty_fetch_is_a_valid_live_result() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.save(&[record("a", "2024-01-01T00:00:00Z")]).unwrap();
        let policy = SyncPolicy::new(StubFetcher::Succeeds(Vec::new()), Online, cache);

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Live);
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostic.is_none());
        assert!(cache_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn fetch_failure_falls_back_to_cached_records_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache
            .save(&[
                record("a", "2024-01-01T00:00:00Z"),
                record("b", "2024-02-01T00:00:00Z"),
            ])
            .unwrap();
        let policy = SyncPolicy::new(StubFetcher::Fails("connection refused"), Online, cache);

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Cached);
        assert_eq!(outcome.records.len(), 2);
        let diagnostic = outcome.diagnostic.unwrap();
        assert!(diagnostic.contains("connection refused"));
    }

    #[test]
    fn fetch_failure_with_empty_cache_reports_the_failure() {
        let dir = TempDir::new().unwrap();
        let policy = SyncPolicy::new(
            StubFetcher::Fails("connection refused"),
            Online,
            cache_in(&dir),
        );

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Cached);
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostic.unwrap().contains("connection refused"));
    }

    #[test]
    fn offline_with_empty_cache_reports_no_cached_data() {
        let dir = TempDir::new().unwrap();
        let policy = SyncPolicy::new(StubFetcher::MustNotBeCalled, Offline, cache_in(&dir));

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Cached);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.diagnostic.as_deref(), Some(NO_CACHED_DATA));
    }

    #[test]
    fn corrupt_snapshot_degrades_to_empty_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("snapshot.json"), "not json").unwrap();
        let policy = SyncPolicy::new(StubFetcher::Fails("boom"), Online, cache_in(&dir));

        let outcome = policy.load();
        assert_eq!(outcome.origin, Origin::Cached);
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostic.is_some());
    }
}
