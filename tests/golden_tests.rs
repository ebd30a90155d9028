//! Golden tests - fixture-based tests that lock expected behavior
//!
//! These tests use JSON fixtures to verify that the aggregation engines
//! produce exactly the outputs the dashboard shipped with. Any change in
//! behavior (bucket shapes, tie-breaks, substitution defaults) will cause
//! these tests to fail, signaling a potential breaking change.
//!
//! Run with: cargo test --test golden_tests

use serde::Deserialize;
use std::fs;

fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let content =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

// ============================================================================
// PRICE BINNING GOLDEN TESTS
// ============================================================================

mod binning_golden {
    use super::*;
    use pretty_assertions::assert_eq;
    use storelens::aggregate::{bin_values, Bin};

    #[derive(Debug, Deserialize)]
    struct TestCase {
        name: String,
        values: Vec<f64>,
        bucket_count: usize,
        expected: Vec<ExpectedBin>,
    }

    #[derive(Debug, Deserialize)]
    struct ExpectedBin {
        range: (f64, f64),
        count: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        test_cases: Vec<TestCase>,
    }

    #[test]
    fn test_binning_golden() {
        let fixture: Fixture = load_fixture("price_bins.json");

        for case in fixture.test_cases {
            let bins = bin_values(&case.values, case.bucket_count);
            let expected: Vec<Bin> = case
                .expected
                .iter()
                .map(|b| Bin {
                    range: b.range,
                    count: b.count,
                })
                .collect();
            assert_eq!(bins, expected, "case '{}'", case.name);
        }
    }
}

// ============================================================================
// AGE BUCKETING GOLDEN TESTS
// ============================================================================

mod age_golden {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use storelens::aggregate::bucket_ages;

    #[derive(Debug, Deserialize)]
    struct TestCase {
        name: String,
        birthdays: Vec<NaiveDate>,
        as_of: NaiveDate,
        expected_counts: Vec<u32>,
        expected_most_common: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        test_cases: Vec<TestCase>,
    }

    #[test]
    fn test_age_bucketing_golden() {
        let fixture: Fixture = load_fixture("age_buckets.json");

        for case in fixture.test_cases {
            let distribution = bucket_ages(&case.birthdays, case.as_of);

            let counts: Vec<u32> = distribution.counts().map(|(_, count)| count).collect();
            assert_eq!(counts, case.expected_counts, "case '{}'", case.name);

            let most_common = distribution.most_common().map(|b| b.label().to_string());
            assert_eq!(
                most_common, case.expected_most_common,
                "case '{}'",
                case.name
            );
        }
    }
}

// ============================================================================
// SALES RANKING GOLDEN TESTS
// ============================================================================

mod ranking_golden {
    use super::*;
    use pretty_assertions::assert_eq;
    use storelens::aggregate::{
        monthly_revenue, most_popular_item, total_quantity_sold, total_sales_value,
    };
    use storelens::types::{CatalogItem, Order};

    #[derive(Debug, Deserialize)]
    struct Fixture {
        catalog: Vec<CatalogItem>,
        orders: Vec<Order>,
        expected_sales_values: Vec<(String, f64)>,
        expected_most_popular: String,
    }

    #[test]
    fn test_sales_ranking_golden() {
        let fixture: Fixture = load_fixture("sales_ranking.json");

        for (id, expected) in &fixture.expected_sales_values {
            let item = fixture
                .catalog
                .iter()
                .find(|item| &item.id == id)
                .unwrap_or_else(|| panic!("fixture catalog has no item {id}"));
            assert_eq!(
                total_sales_value(item, &fixture.orders),
                *expected,
                "sales value of {id}"
            );
        }

        let popular = most_popular_item(&fixture.catalog, &fixture.orders)
            .expect("fixture catalog is non-empty");
        assert_eq!(popular.id, fixture.expected_most_popular);
    }

    /// The two quantity-substitution defaults diverge on purpose: an
    /// unparseable quantity sells 0 units but still counts once toward
    /// revenue. Unifying them changes displayed figures.
    #[test]
    fn test_quantity_defaults_diverge() {
        let fixture: Fixture = load_fixture("sales_ranking.json");

        let unparseable: Vec<Order> = fixture
            .orders
            .iter()
            .map(|order| {
                let mut order = order.clone();
                order.item_quantity = Some("abc".to_string());
                order
            })
            .collect();

        for item in &fixture.catalog {
            assert_eq!(total_quantity_sold(item, &unparseable), 0);
        }

        let series = monthly_revenue(&unparseable);
        let revenue: f64 = series.iter().map(|entry| entry.revenue).sum();
        let expected: f64 = unparseable
            .iter()
            .filter(|order| order.created_at.is_some())
            .filter_map(|order| order.money.as_ref().map(|m| m.amount))
            .sum();
        assert_eq!(revenue, expected);
        assert!(revenue > 0.0);
    }
}
