//! Property-based tests for currency conversion and the rate archive.
//!
//! Amounts and rates are generated as scaled integers so every input is an
//! exact decimal.

use chrono::{NaiveDate, TimeZone, Utc};
use fxconv_core::fx::{
    CurrencyConverter, JsonRateArchive, LatestPolicy, MissingCodePolicy, RateArchiveTrait,
    RateTable,
};
use fxconv_market_data::RateQuery;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

const CODES: [&str; 6] = ["EUR", "USD", "CZK", "GBP", "JPY", "CAD"];

// =============================================================================
// Generators
// =============================================================================

/// Amounts between 0.01 and 100,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Rates between 0.01 and 200.0000.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (100i64..=2_000_000).prop_map(|units| Decimal::new(units, 4))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..9000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

/// A table quoting every code in `CODES` against EUR.
fn arb_table() -> impl Strategy<Value = RateTable> {
    (arb_date(), proptest::collection::vec(arb_rate(), CODES.len() - 1)).prop_map(
        |(date, rates)| {
            let mut table_rates = BTreeMap::from([("EUR".to_string(), Decimal::ONE)]);
            for (code, rate) in CODES[1..].iter().zip(rates) {
                table_rates.insert(code.to_string(), rate);
            }
            RateTable {
                date,
                base: "EUR".to_string(),
                timestamp: Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
                source: "PROPTEST".to_string(),
                rates: table_rates,
            }
        },
    )
}

fn arb_code() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(CODES.to_vec())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The converted amount is amount * rate[to] / rate[from], rounded to cents.
    #[test]
    fn prop_conversion_follows_cross_rate(
        table in arb_table(),
        amount in arb_amount(),
        from in arb_code(),
        to in arb_code(),
    ) {
        let converter = CurrencyConverter::new(&table);
        let converted = converter.convert_amount(amount, from, to).unwrap();

        let expected = amount * table.rate(to).unwrap() / table.rate(from).unwrap();
        prop_assert!((converted - expected).abs() <= Decimal::new(5, 3));
        prop_assert!(converted.scale() <= 2);
    }

    /// Converting there and back lands within the rounding error of the start.
    #[test]
    fn prop_round_trip_stays_close(
        table in arb_table(),
        amount in arb_amount(),
        from in arb_code(),
        to in arb_code(),
    ) {
        let converter = CurrencyConverter::new(&table);
        let there = converter.convert_amount(amount, from, to).unwrap();
        let back = converter.convert_amount(there, to, from).unwrap();

        let half_cent = Decimal::new(5, 3);
        let ratio = table.rate(from).unwrap() / table.rate(to).unwrap();
        let tolerance = half_cent * ratio + half_cent + Decimal::new(1, 6);
        prop_assert!(
            (back - amount).abs() <= tolerance,
            "{} {} -> {} {} -> {} {}", amount, from, there, to, back, from
        );
    }

    /// Skipped and converted codes together cover every requested code.
    #[test]
    fn prop_fan_out_partitions_requested_codes(
        table in arb_table(),
        amount in arb_amount(),
        extra in proptest::collection::btree_set("[A-Z]{3}", 0..4),
    ) {
        let mut requested: BTreeSet<String> = extra;
        requested.insert("USD".to_string());
        let requested: Vec<String> = requested.into_iter().collect();

        let result = CurrencyConverter::new(&table)
            .convert(amount, "EUR", &requested, MissingCodePolicy::Skip)
            .unwrap();

        let mut covered: BTreeSet<String> = result.amounts.keys().cloned().collect();
        covered.extend(result.skipped.iter().cloned());
        prop_assert_eq!(covered, requested.into_iter().collect::<BTreeSet<_>>());
        prop_assert!(result.skipped.iter().all(|code| !table.contains(code)));
    }

    /// Storing a table twice leaves the archive file unchanged.
    #[test]
    fn prop_archive_store_is_idempotent(table in arb_table()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let archive = JsonRateArchive::open(&path, LatestPolicy::default());
        let query = RateQuery::On(table.date);

        archive.store(query, &table).unwrap();
        let first = std::fs::read(&path).unwrap();
        archive.store(query, &table).unwrap();
        let second = std::fs::read(&path).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(archive.lookup(query).unwrap(), Some(table));
    }

    /// Every stored date is listed exactly once, in order, after a reopen.
    #[test]
    fn prop_archive_keeps_one_table_per_date(
        tables in proptest::collection::vec(arb_table(), 1..6),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        let archive = JsonRateArchive::open(&path, LatestPolicy::default());

        for table in &tables {
            archive.store(RateQuery::On(table.date), table).unwrap();
        }

        let expected: Vec<NaiveDate> = tables
            .iter()
            .map(|t| t.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let reopened = JsonRateArchive::open(&path, LatestPolicy::default());
        prop_assert_eq!(reopened.dates(), expected);
    }
}
