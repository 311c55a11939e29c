//! Term generation: turns a [`LocationRecord`] into the documents and
//! postings an [`IndexBuilder`] accepts.

use std::sync::Arc;

use trep_core::name_matrix::STD_LANGUAGE;
use trep_core::LocationRecord;

use crate::memory::IndexBuilder;

/// Split a name into lowercase word tokens, dropping punctuation-only
/// fragments. Splits on every non-alphanumeric separator, including
/// apostrophe, so index-side terms stay consistent with `trep-match`'s
/// `QueryHygiene::tokenise`.
pub fn tokenise_name(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Register every document (one per language variant) for one catalog
/// record, following the term generation rules from the component design:
/// IATA/ICAO/FAA codes, tokenised common/ascii/alternate names, city code,
/// state code, country code, country name, UN/LOCODE entries, UIC entries.
pub fn index_record(builder: &mut IndexBuilder, record: LocationRecord) {
    let record = Arc::new(record);

    let mut identifier_phrases: Vec<Vec<String>> = Vec::new();
    identifier_phrases.push(vec![record.key.iata_code.to_lowercase()]);
    if let Some(icao) = &record.icao_code {
        identifier_phrases.push(vec![icao.to_lowercase()]);
    }
    if let Some(faa) = &record.faa_code {
        identifier_phrases.push(vec![faa.to_lowercase()]);
    }
    if let Some(city_code) = &record.city_code {
        identifier_phrases.push(vec![city_code.to_lowercase()]);
    }
    if let Some(state_code) = &record.state_code {
        identifier_phrases.push(vec![state_code.to_lowercase()]);
    }
    if !record.country_code.is_empty() {
        identifier_phrases.push(vec![record.country_code.to_lowercase()]);
    }
    if !record.country_name.is_empty() {
        let toks = tokenise_name(&record.country_name);
        if !toks.is_empty() {
            identifier_phrases.push(toks);
        }
    }
    for unlocode in &record.unlocodes {
        identifier_phrases.push(vec![unlocode.to_lowercase()]);
    }
    for uic in &record.uic_codes {
        identifier_phrases.push(vec![uic.to_string()]);
    }

    let mut languages: Vec<&str> = record.name_matrix.languages().collect();
    if languages.is_empty() {
        languages.push(STD_LANGUAGE);
    }

    for language in languages {
        let mut phrases = identifier_phrases.clone();
        let mut spelling_terms: Vec<String> = identifier_phrases
            .iter()
            .map(|p| p.join(" "))
            .collect();

        if language == STD_LANGUAGE {
            for name in [&record.common_name, &record.ascii_name] {
                let toks = tokenise_name(name);
                if !toks.is_empty() {
                    spelling_terms.push(toks.join(" "));
                    phrases.push(toks);
                }
            }
        }
        if let Some(names) = record.name_matrix.get(language) {
            for name in names {
                let toks = tokenise_name(name);
                if !toks.is_empty() {
                    spelling_terms.push(toks.join(" "));
                    phrases.push(toks);
                }
            }
        }
        for city in &record.served_cities {
            let toks = tokenise_name(&city.name_utf8);
            if !toks.is_empty() {
                spelling_terms.push(toks.join(" "));
                phrases.push(toks);
            }
        }

        builder.add_document(
            Arc::clone(&record),
            language,
            record.key.clone(),
            phrases,
            spelling_terms,
            Vec::new(),
            Vec::new(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trep_core::codes::IataType;
    use trep_core::LocationKey;

    fn nce() -> LocationRecord {
        let mut rec = LocationRecord::new(
            LocationKey::new("NCE", IataType::Airport, 6_299_418),
            "Nice Cote d'Azur",
            "Nice Cote d'Azur",
        );
        rec.latitude = 43.66272;
        rec.longitude = 7.20787;
        rec.country_code = "FR".to_string();
        rec.country_name = "France".to_string();
        rec.icao_code = Some("LFMN".to_string());
        rec.name_matrix.insert("en", vec!["Nice Airport".to_string()]);
        rec
    }

    #[test]
    fn test_tokenise_name_splits_and_lowercases() {
        assert_eq!(
            tokenise_name("Nice Cote d'Azur"),
            vec!["nice", "cote", "d", "azur"]
        );
    }

    #[test]
    fn test_index_record_produces_std_and_language_documents() {
        use crate::lookup::InvertedIndex;

        let mut builder = IndexBuilder::new();
        builder.begin_build();
        index_record(&mut builder, nce());
        let index = builder.commit().unwrap();

        // two documents: "std" and "en"
        assert_eq!(index.len(), 2);
        assert!(!index.phrase_search("nce", 10).is_empty());
        assert!(!index.phrase_search("lfmn", 10).is_empty());
        assert!(!index.phrase_search("nice airport", 10).is_empty());
        assert!(!index.phrase_search("france", 10).is_empty());
    }
}
