//! Composite scoring used to order same- and lower-percentage document
//! alternates within a matched cell.

use trep_core::LocationRecord;

/// 5% discount applied per hop away from the query's own/default language;
/// grounded on the original matcher's document-language bookkeeping (a
/// document matched under a non-default language is a weaker signal than
/// one matched under `"std"`).
const LANGUAGE_PENALTY_PER_HOP: f64 = 0.95;

/// Historical (non-current) envelopes are worth half of a current one.
const ENVELOPE_PENALTY_HISTORICAL: f64 = 0.5;
const ENVELOPE_PENALTY_CURRENT: f64 = 1.0;

/// `score = match_percent * page_rank_factor * language_penalty *
/// envelope_penalty`.
pub fn score(
    match_percent: f64,
    record: &LocationRecord,
    non_default_language_hops: u32,
) -> f64 {
    let page_rank_factor = 1.0 + record.page_rank / 100.0;
    let language_penalty = LANGUAGE_PENALTY_PER_HOP.powi(non_default_language_hops as i32);
    let envelope_penalty = if record.is_current_envelope() {
        ENVELOPE_PENALTY_CURRENT
    } else {
        ENVELOPE_PENALTY_HISTORICAL
    };

    match_percent * page_rank_factor * language_penalty * envelope_penalty
}
