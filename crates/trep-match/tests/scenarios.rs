//! End-to-end matching scenarios against a small synthetic catalog.

use trep_core::codes::IataType;
use trep_core::{LocationKey, LocationRecord};
use trep_index::{index_record, IndexBuilder, InMemoryIndex};
use trep_match::{MatchOrchestrator, SearchOptions};

fn sample_catalog() -> InMemoryIndex {
    let mut builder = IndexBuilder::new();
    builder.begin_build();

    let mut nce = LocationRecord::new(
        LocationKey::new("NCE", IataType::Airport, 6_299_418),
        "Nice Cote d'Azur",
        "Nice Cote d'Azur",
    );
    nce.latitude = 43.66272;
    nce.longitude = 7.20787;
    nce.page_rank = 50.0;
    nce.country_code = "FR".to_string();
    index_record(&mut builder, nce);

    let mut sfo = LocationRecord::new(
        LocationKey::new("SFO", IataType::Airport, 5_391_959),
        "San Francisco",
        "San Francisco",
    );
    sfo.latitude = 37.6213;
    sfo.longitude = -122.3790;
    sfo.page_rank = 85.0;
    sfo.country_code = "US".to_string();
    index_record(&mut builder, sfo);

    let mut rio = LocationRecord::new(
        LocationKey::new("RIO", IataType::City, 6_320_062),
        "Rio de Janeiro",
        "Rio de Janeiro",
    );
    rio.latitude = -22.9068;
    rio.longitude = -43.1729;
    rio.page_rank = 40.0;
    rio.country_code = "BR".to_string();
    index_record(&mut builder, rio);

    // Two airports sharing a name, differing only in PageRank, to exercise
    // the scoring-based alternate ordering.
    let mut low_rank = LocationRecord::new(
        LocationKey::new("ZZZ", IataType::Airport, 1),
        "Springfield",
        "Springfield",
    );
    low_rank.page_rank = 5.0;
    index_record(&mut builder, low_rank);

    let mut high_rank = LocationRecord::new(
        LocationKey::new("YYY", IataType::Airport, 2),
        "Springfield",
        "Springfield",
    );
    high_rank.page_rank = 95.0;
    index_record(&mut builder, high_rank);

    builder.commit().unwrap()
}

/// Scenario A: a trivial exact single-place query.
#[test]
fn scenario_a_trivial_match() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator.search("nce", &SearchOptions::default()).unwrap();

    assert_eq!(outcome.locations.len(), 1);
    assert_eq!(outcome.locations[0].iata_code(), "NCE");
    assert_eq!(outcome.locations[0].effective_edit_distance, 0);
    assert!(outcome.unmatched_words.is_empty());
}

/// Scenario B: a single-cell typo corrected by the spelling dictionary.
#[test]
fn scenario_b_single_cell_typo() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator.search("ncee", &SearchOptions::default()).unwrap();

    assert_eq!(outcome.locations.len(), 1);
    assert_eq!(outcome.locations[0].iata_code(), "NCE");
    assert_eq!(outcome.locations[0].effective_edit_distance, 1);
    assert_eq!(outcome.locations[0].allowable_edit_distance, 2);
    assert_eq!(outcome.locations[0].original_keywords, "ncee");
    assert_eq!(outcome.locations[0].corrected_keywords, "nce");
}

/// Scenario C: a multi-place query whose best partition groups tokens into
/// two separately-matching place names.
#[test]
fn scenario_c_multi_place_partition() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator
        .search("san francisco rio de janeiro", &SearchOptions::default())
        .unwrap();

    let codes: Vec<&str> = outcome.locations.iter().map(|l| l.iata_code()).collect();
    assert!(codes.contains(&"SFO"));
    assert!(codes.contains(&"RIO"));
    assert!(outcome.unmatched_words.is_empty());
}

/// Scenario D: a multi-place query with a typo in one of the cells.
#[test]
fn scenario_d_typo_plus_multi_place() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator
        .search("saan fransisco rio de janeiro", &SearchOptions::default())
        .unwrap();

    let codes: Vec<&str> = outcome.locations.iter().map(|l| l.iata_code()).collect();
    assert!(codes.contains(&"SFO"));
    assert!(codes.contains(&"RIO"));
}

/// Scenario E: a query with no plausible match anywhere in the catalog.
#[test]
fn scenario_e_no_match() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator
        .search("qzxjkvwplm", &SearchOptions::default())
        .unwrap();

    assert!(outcome.locations.is_empty());
    assert!(!outcome.unmatched_words.is_empty());
    // Per spec §8 scenario E, a single-cell unmatched partition scores
    // exactly 0.05 (100.0 * UNMATCHED_CELL_PENALTY / 100.0), not 5.0.
    assert!((outcome.total_percent - 0.05).abs() < 1e-9);
}

/// Scenario F: PageRank orders same-name alternates.
#[test]
fn scenario_f_page_rank_orders_alternates() {
    let index = sample_catalog();
    let orchestrator = MatchOrchestrator::new(&index);
    let outcome = orchestrator
        .search("springfield", &SearchOptions::default())
        .unwrap();

    assert_eq!(outcome.locations.len(), 1);
    assert_eq!(outcome.locations[0].extra_matches.len(), 1);
    // The higher-PageRank document should score (and therefore sort) ahead
    // of the lower one among the tied-percentage extras.
    let extra = &outcome.locations[0].extra_matches[0];
    assert!(extra.score > 0.0);
}
