//! Date-keyed archive of fetched rate tables, persisted as one JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use fxconv_market_data::RateQuery;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;
use super::fx_model::{LatestPolicy, RateTable};
use super::fx_traits::RateArchiveTrait;

const CURRENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Default)]
struct ArchiveFile {
    version: u32,
    tables: BTreeMap<NaiveDate, RateTable>,
}

#[derive(Default)]
struct ArchiveState {
    tables: BTreeMap<NaiveDate, RateTable>,
    /// Date of the table fetched as "latest" by this process, if any.
    latest_this_run: Option<NaiveDate>,
}

/// Rate archive backed by a single JSON file.
///
/// The file is read once when the archive is opened and rewritten whenever a
/// new date is stored. A missing or unreadable file yields an empty archive.
#[derive(Debug)]
pub struct JsonRateArchive {
    path: PathBuf,
    policy: LatestPolicy,
    today: NaiveDate,
    state: RwLock<ArchiveState>,
}

impl std::fmt::Debug for ArchiveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveState")
            .field("dates", &self.tables.len())
            .field("latest_this_run", &self.latest_this_run)
            .finish()
    }
}

impl JsonRateArchive {
    pub fn open(path: impl Into<PathBuf>, policy: LatestPolicy) -> Self {
        Self::open_at(path, policy, Utc::now().date_naive())
    }

    /// Opens the archive with an explicit "today" for same-day latest lookups.
    pub fn open_at(path: impl Into<PathBuf>, policy: LatestPolicy, today: NaiveDate) -> Self {
        let path = path.into();
        let tables = match Self::load(&path) {
            Ok(tables) => {
                log::debug!(
                    "Loaded {} archived rate tables from {}",
                    tables.len(),
                    path.display()
                );
                tables
            }
            Err(e) => {
                log::warn!("{}; starting with an empty archive", e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            policy,
            today,
            state: RwLock::new(ArchiveState {
                tables,
                latest_this_run: None,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Archived dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.state
            .read()
            .map(|state| state.tables.keys().copied().collect())
            .unwrap_or_default()
    }

    fn load(path: &Path) -> Result<BTreeMap<NaiveDate, RateTable>, FxError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(path).map_err(|e| {
            FxError::ArchiveCorruption(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        let file: ArchiveFile = serde_json::from_slice(&raw).map_err(|e| {
            FxError::ArchiveCorruption(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        if file.version != CURRENT_VERSION {
            return Err(FxError::ArchiveCorruption(format!(
                "Unsupported archive version {} in {}",
                file.version,
                path.display()
            )));
        }

        Ok(file.tables)
    }

    fn persist(&self, tables: &BTreeMap<NaiveDate, RateTable>) -> Result<(), FxError> {
        let write_err = |e: &dyn std::fmt::Display| {
            FxError::Archive(format!("Failed to write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(&e))?;
        }

        let file = ArchiveFile {
            version: CURRENT_VERSION,
            tables: tables.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| write_err(&e))?;
        fs::write(&self.path, json).map_err(|e| write_err(&e))
    }
}

impl RateArchiveTrait for JsonRateArchive {
    fn lookup(&self, query: RateQuery) -> Result<Option<RateTable>, FxError> {
        let state = self
            .state
            .read()
            .map_err(|_| FxError::Archive("Rate archive lock poisoned".into()))?;

        let date = match query {
            RateQuery::On(date) => Some(date),
            RateQuery::Latest => match (state.latest_this_run, self.policy) {
                (Some(date), _) => Some(date),
                (None, LatestPolicy::SameDay) => Some(self.today),
                (None, LatestPolicy::AlwaysFetch) => None,
            },
        };

        Ok(date.and_then(|d| state.tables.get(&d).cloned()))
    }

    fn store(&self, query: RateQuery, table: &RateTable) -> Result<(), FxError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| FxError::Archive("Rate archive lock poisoned".into()))?;

        if query == RateQuery::Latest {
            state.latest_this_run = Some(table.date);
        }

        if state.tables.contains_key(&table.date) {
            log::debug!("Rates for {} already archived, keeping them", table.date);
            return Ok(());
        }

        state.tables.insert(table.date, table.clone());
        self.persist(&state.tables)?;
        log::info!(
            "Archived rates for {} in {}",
            table.date,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_table(day: NaiveDate) -> RateTable {
        RateTable {
            date: day,
            base: "USD".to_string(),
            timestamp: Utc.from_utc_datetime(&day.and_hms_opt(23, 59, 59).unwrap()),
            source: "TEST".to_string(),
            rates: BTreeMap::from([
                ("USD".to_string(), dec!(1)),
                ("EUR".to_string(), dec!(0.9085)),
                ("CZK".to_string(), dec!(24.549)),
            ]),
        }
    }

    #[test]
    fn test_missing_file_is_empty_archive() {
        let dir = tempdir().unwrap();
        let archive = JsonRateArchive::open(dir.path().join("rates.json"), LatestPolicy::default());

        assert!(archive.dates().is_empty());
        assert!(archive
            .lookup(RateQuery::On(date(2015, 11, 1)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_store_then_lookup_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("rates.json");
        let day = date(2015, 11, 1);

        let archive = JsonRateArchive::open(&path, LatestPolicy::default());
        archive.store(RateQuery::On(day), &make_table(day)).unwrap();
        assert!(path.exists());

        let reopened = JsonRateArchive::open(&path, LatestPolicy::default());
        let table = reopened.lookup(RateQuery::On(day)).unwrap().unwrap();
        assert_eq!(table.rate("CZK"), Some(dec!(24.549)));
        assert_eq!(reopened.dates(), vec![day]);
    }

    #[test]
    fn test_store_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let day = date(2015, 11, 1);
        let archive = JsonRateArchive::open(&path, LatestPolicy::default());

        archive.store(RateQuery::On(day), &make_table(day)).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        archive.store(RateQuery::On(day), &make_table(day)).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(archive.dates(), vec![day]);
    }

    #[test]
    fn test_archived_date_is_never_overwritten() {
        let dir = tempdir().unwrap();
        let day = date(2015, 11, 1);
        let archive = JsonRateArchive::open(dir.path().join("rates.json"), LatestPolicy::default());

        archive.store(RateQuery::On(day), &make_table(day)).unwrap();
        let mut changed = make_table(day);
        changed.rates.insert("CZK".to_string(), dec!(99));
        archive.store(RateQuery::On(day), &changed).unwrap();

        let table = archive.lookup(RateQuery::On(day)).unwrap().unwrap();
        assert_eq!(table.rate("CZK"), Some(dec!(24.549)));
    }

    #[test]
    fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, "{ this is not json").unwrap();

        let archive = JsonRateArchive::open(&path, LatestPolicy::default());
        assert!(archive.dates().is_empty());

        let day = date(2020, 2, 29);
        archive.store(RateQuery::On(day), &make_table(day)).unwrap();
        let reopened = JsonRateArchive::open(&path, LatestPolicy::default());
        assert_eq!(reopened.dates(), vec![day]);
    }

    #[test]
    fn test_unknown_version_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, r#"{"version": 7, "tables": {}}"#).unwrap();

        let archive = JsonRateArchive::open(&path, LatestPolicy::default());
        assert!(archive.dates().is_empty());
    }

    #[test]
    fn test_latest_is_not_cached_across_runs_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let today = date(2024, 3, 15);

        let archive = JsonRateArchive::open_at(&path, LatestPolicy::AlwaysFetch, today);
        assert!(archive.lookup(RateQuery::Latest).unwrap().is_none());
        archive.store(RateQuery::Latest, &make_table(today)).unwrap();
        // Same process: the table fetched as latest is reused.
        assert!(archive.lookup(RateQuery::Latest).unwrap().is_some());

        let next_run = JsonRateArchive::open_at(&path, LatestPolicy::AlwaysFetch, today);
        assert!(next_run.lookup(RateQuery::Latest).unwrap().is_none());
        // The table still answers requests for its calendar date.
        assert!(next_run.lookup(RateQuery::On(today)).unwrap().is_some());
    }

    #[test]
    fn test_same_day_policy_reuses_todays_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let today = date(2024, 3, 15);

        let first = JsonRateArchive::open_at(&path, LatestPolicy::SameDay, today);
        first.store(RateQuery::Latest, &make_table(today)).unwrap();

        let same_day = JsonRateArchive::open_at(&path, LatestPolicy::SameDay, today);
        assert_eq!(
            same_day.lookup(RateQuery::Latest).unwrap().map(|t| t.date),
            Some(today)
        );

        let next_day = JsonRateArchive::open_at(&path, LatestPolicy::SameDay, date(2024, 3, 16));
        assert!(next_day.lookup(RateQuery::Latest).unwrap().is_none());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        // The archive path is a directory, so writing it fails.
        let archive = JsonRateArchive::open(dir.path(), LatestPolicy::default());
        let day = date(2015, 11, 1);

        let err = archive.store(RateQuery::On(day), &make_table(day)).unwrap_err();
        assert!(matches!(err, FxError::Archive(_)));
        // The table stays usable for the rest of the run.
        assert!(archive.lookup(RateQuery::On(day)).unwrap().is_some());
    }
}
