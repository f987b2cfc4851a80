//! Property-based tests for batch counters, templates and ordering.
//!
//! Uses proptest to generate address lists, selector literals and template
//! values, and verifies the invariants the batch driver guarantees.

use proptest::prelude::*;
use std::collections::HashMap;
use webattr::batch::{percent, BatchDriver, BatchOptions};
use webattr::error::FetchError;
use webattr::extraction::{resolve, AttributeExtractor};
use webattr::fetch::Fetcher;
use webattr::template::{OutputTemplate, TemplateContext};

// ============================================================================
// TEST FETCHER
// ============================================================================

/// Pages keyed by address; any other address fails
struct MapFetcher(HashMap<String, String>);

impl Fetcher for MapFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        self.0
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::Network("unreachable".to_string()))
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Strategy for address lists; roughly a quarter of them unreachable
pub fn arb_addresses() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(("[a-z]{1,12}", prop::bool::weighted(0.75)), 1..20).prop_map(
        |items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (host, up))| (format!("https://{host}.example/{i}"), up))
                .collect()
        },
    )
}

/// Strategy for literal text, including quotes, commas and parentheses
pub fn arb_literal() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,()'\"\\\\-]{0,24}"
}

fn quote(literal: &str) -> String {
    format!("'{}'", literal.replace('\\', "\\\\").replace('\'', "''"))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_percent_is_bounded_and_monotonic(count in 1usize..10_000, a in 0usize..10_000, b in 0usize..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = percent(lo.min(count), count);
        let p_hi = percent(hi.min(count), count);
        prop_assert!(p_hi <= 100);
        prop_assert!(p_lo <= p_hi);
        prop_assert_eq!(percent(count, count), 100);
    }

    #[test]
    fn prop_percent_matches_float_rounding(count in 1usize..1000, done in 0usize..1000) {
        let done = done.min(count);
        let expected = (100.0 * done as f64 / count as f64).round() as u8;
        prop_assert_eq!(percent(done, count), expected);
    }

    #[test]
    fn prop_template_renders_counters(index in 1usize..1000, count in 1usize..1000, value in "[^$]{0,30}") {
        let template = OutputTemplate::parse("$Index/$Count: $Value").unwrap();
        let line = template.render(&TemplateContext {
            value: &value,
            uri: "https://example.com",
            index,
            count,
            percent: 0,
        });
        prop_assert_eq!(line, format!("{index}/{count}: {value}"));
    }

    #[test]
    fn prop_quoted_literals_round_trip(literal in arb_literal()) {
        let selector = format!("abstract(meta, content -eq {}, name)", quote(&literal));
        let query = resolve(&selector).unwrap();
        let html = format!(
            "<meta content=\"{}\" name=\"hit\">",
            literal.replace('&', "&amp;").replace('"', "&quot;")
        );
        let result = AttributeExtractor::extract_from_markup(&html, &query);
        prop_assert_eq!(result.value(), Some("hit"));
    }

    #[test]
    fn prop_output_preserves_input_order(addresses in arb_addresses()) {
        let pages: HashMap<String, String> = addresses
            .iter()
            .filter(|(_, up)| *up)
            .map(|(uri, _)| (uri.clone(), format!("<title>{uri}</title>")))
            .collect();
        let driver = BatchDriver::new(MapFetcher(pages));
        let uris: Vec<String> = addresses.iter().map(|(uri, _)| uri.clone()).collect();

        let options = BatchOptions::new().template("$Value|$Uri").unwrap();
        let lines = runtime()
            .block_on(driver.run(&uris, "title", &options))
            .unwrap();

        prop_assert_eq!(lines.len(), uris.len());
        for ((uri, up), line) in addresses.iter().zip(&lines) {
            let expected = if *up {
                format!("{uri}|{uri}")
            } else {
                format!("n/a|{uri}")
            };
            prop_assert_eq!(line, &expected);
        }
    }
}
