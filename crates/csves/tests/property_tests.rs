//! Property-based tests for csves.
//!
//! These tests use proptest to generate random inputs and verify that the
//! normalizer, delimiter detection and schema inference keep their invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p csves --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p csves --test property_tests
//! ```

use proptest::prelude::*;

use csves::{HeaderIndex, Ingestor, RecordAssembler, Schema, detect_delimiter, normalize_text};

// =============================================================================
// Test Strategies
// =============================================================================

/// Strings with plenty of padding, tabs and line breaks.
fn messy_string() -> impl Strategy<Value = String> {
    "[ \\t\\r\\na-zA-Z0-9_\\-\\.\\x{a0}\\x00\\x07]{0,60}"
}

/// Completely random UTF-8 (edge cases).
fn random_utf8() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..120)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

fn header_cell() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Za-z][A-Za-z0-9 ]{0,10}", " {0,3}", "\\t?[a-z]{1,5}\\t?"]
}

// =============================================================================
// Normalizer Properties
// =============================================================================

mod normalizer_tests {
    use super::*;

    proptest! {
        #[test]
        fn idempotent(input in messy_string()) {
            let once = normalize_text(&input);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn idempotent_on_random_utf8(input in random_utf8()) {
            let once = normalize_text(&input);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn no_padding_or_doubled_spaces(input in messy_string()) {
            let out = normalize_text(&input);
            prop_assert_eq!(out.trim(), out.as_str());
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains('\t'));
            prop_assert!(!out.contains('\n'));
        }
    }
}

// =============================================================================
// Delimiter Detection Properties
// =============================================================================

mod delimiter_tests {
    use super::*;

    proptest! {
        /// With different comma and semicolon counts the larger count wins.
        #[test]
        fn higher_count_wins(commas in 0usize..20, semicolons in 0usize..20) {
            prop_assume!(commas != semicolons);
            let mut line = String::from("x");
            line.push_str(&",a".repeat(commas));
            line.push_str(&";b".repeat(semicolons));

            let expected = if commas > semicolons { b',' } else { b';' };
            prop_assert_eq!(detect_delimiter(&line), expected);
        }

        /// Equal counts for every candidate resolve to comma.
        #[test]
        fn full_tie_is_comma(n in 0usize..10) {
            let line = ",;\t|".repeat(n);
            prop_assert_eq!(detect_delimiter(&line), b',');
        }

        /// Detection never panics and always returns a candidate.
        #[test]
        fn always_a_candidate(input in random_utf8()) {
            let d = detect_delimiter(&input);
            prop_assert!(csves::input::DELIMITERS.contains(&d));
        }
    }
}

// =============================================================================
// Schema and Assembly Properties
// =============================================================================

mod assembly_tests {
    use super::*;

    proptest! {
        /// One inferred definition per non-blank header cell.
        #[test]
        fn inference_counts_non_blank_cells(header in prop::collection::vec(header_cell(), 0..12)) {
            let schema = Schema::infer_from_header(&header);
            let non_blank = header.iter().filter(|h| !normalize_text(h).is_empty()).count();
            prop_assert_eq!(schema.len(), non_blank);
            prop_assert!(schema.iter().all(|f| !f.required));
        }

        /// Documents never hold empty values and always carry the source.
        #[test]
        fn documents_have_no_empty_values(
            row in prop::collection::vec(messy_string(), 3)
        ) {
            let header: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
            let schema = Schema::infer_from_header(&header);
            let index = HeaderIndex::build(&header);
            let doc = RecordAssembler::new(&schema, &index, "p.csv").assemble(row.as_slice());

            prop_assert!(doc.iter().all(|(_, v)| !v.is_empty()));
            prop_assert_eq!(doc.source(), Some("p.csv"));
        }

        /// Ingesting the same bytes twice yields the same batch.
        #[test]
        fn ingest_is_deterministic(
            rows in prop::collection::vec(("[a-z]{0,6}", "[0-9]{0,4}"), 0..20)
        ) {
            let mut data = String::from("name,value\n");
            for (name, value) in &rows {
                data.push_str(&format!("{},{}\n", name, value));
            }

            let ingestor = Ingestor::new();
            let a = ingestor.ingest_reader(data.as_bytes(), "p.csv").unwrap();
            let b = ingestor.ingest_reader(data.as_bytes(), "p.csv").unwrap();
            prop_assert_eq!(a.batch.fingerprint().unwrap(), b.batch.fingerprint().unwrap());
        }
    }
}
