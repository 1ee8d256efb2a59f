// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Catalog and price list ingestion.
//!
//! Both payloads arrive as JSON that has been HTML-escaped with decimal
//! character references (`&#91;` for `[` and so on). Ingestion decodes the
//! references, parses the JSON, and folds the price list into a
//! [`PriceIndex`] keyed by album name.
//!
//! Ingestion happens once, at start-up. Any failure here is fatal, the form
//! cannot be used without a catalog.

use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    error::IngestionError,
    model::{Album, Catalog, PriceEntry, PriceIndex, SaleData},
};

static CHAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([0-9]+);").expect("character reference pattern is valid"));

/// Replaces every `&#NN;` decimal character reference with the character it
/// names.
///
/// Text that does not have exactly that shape (hex references, named
/// entities, a stray `&#`) is passed through unchanged.
///
/// # Errors
///
/// Returns [`IngestionError::Entity`] if a reference names a value that is
/// not a Unicode scalar value, such as a surrogate or anything above
/// `U+10FFFF`.
pub(crate) fn decode_entities(input: &str) -> Result<String, IngestionError> {
    let mut decoded = String::with_capacity(input.len());
    let mut last = 0;

    for caps in CHAR_REF.captures_iter(input) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let ch = digits
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| IngestionError::Entity {
                sequence: whole.as_str().to_string(),
            })?;

        decoded.push_str(&input[last..whole.start()]);
        decoded.push(ch);
        last = whole.end();
    }

    decoded.push_str(&input[last..]);

    Ok(decoded)
}

/// Builds the sale data from the two encoded payloads.
///
/// # Arguments
///
/// * `catalog_payload` - Encoded JSON array of `{ "id", "albumname" }`.
/// * `price_list_payload` - Encoded JSON array of `{ "albumname", "price" }`.
///
/// # Errors
///
/// Returns an error if either payload contains an invalid character
/// reference or does not decode to JSON of the expected shape.
pub(crate) fn load(catalog_payload: &str, price_list_payload: &str) -> Result<SaleData, IngestionError> {
    let catalog_json = decode_entities(catalog_payload)?;
    let price_list_json = decode_entities(price_list_payload)?;

    let albums: Vec<Album> = serde_json::from_str(&catalog_json)
        .map_err(|source| IngestionError::Json { payload: "catalog", source })?;

    let entries: Vec<PriceEntry> = serde_json::from_str(&price_list_json)
        .map_err(|source| IngestionError::Json { payload: "price list", source })?;

    let catalog = Catalog::new(albums);
    let prices = index_prices(entries);

    // Prices join on name, so nothing guarantees every album has one
    for album in catalog.albums().iter().filter(|a| !prices.contains(&a.name)) {
        warn!(album = %album.name, id = %album.id, "Album has no price");
    }

    info!(albums = catalog.len(), prices = prices.len(), "Loaded sale data");

    Ok(SaleData { catalog, prices })
}

/// Reads both payloads from disk and passes them to [`load`].
///
/// # Errors
///
/// Returns [`IngestionError::Read`] if either file cannot be read, otherwise
/// any error from [`load`].
pub(crate) fn load_files(catalog_path: &Path, price_list_path: &Path) -> Result<SaleData, IngestionError> {
    let read = |path: &Path| {
        fs::read_to_string(path).map_err(|source| IngestionError::Read {
            path: path.to_path_buf(),
            source,
        })
    };

    debug!(catalog = %catalog_path.display(), prices = %price_list_path.display(), "Reading payloads");

    load(&read(catalog_path)?, &read(price_list_path)?)
}

/// Folds price entries into an index, later entries replacing earlier ones
/// with the same album name.
fn index_prices(entries: Vec<PriceEntry>) -> PriceIndex {
    entries.into_iter().fold(PriceIndex::default(), |mut index, entry| {
        if let Some(previous) = index.insert(entry.album_name.clone(), entry.price_text) {
            debug!(album = %entry.album_name, %previous, "Replaced duplicate price entry");
        }
        index
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::AlbumId;

    fn encode(s: &str) -> String {
        s.chars().map(|c| format!("&#{};", c as u32)).collect()
    }

    #[test]
    fn decodes_character_references() {
        let decoded = decode_entities("&#91;&#123;&#34;a&#34;: 1&#125;&#93;").unwrap();
        assert_eq!(decoded, r#"[{"a": 1}]"#);
    }

    #[test]
    fn decodes_non_ascii_references() {
        assert_eq!(decode_entities("Bj&#246;rk &#8212; Post").unwrap(), "Björk — Post");
    }

    #[test]
    fn leaves_other_ampersand_sequences_alone() {
        let input = "AC&amp;DC &#x41; &#; &#12 done";
        assert_eq!(decode_entities(input).unwrap(), input);
    }

    #[test]
    fn leaves_non_ascii_digit_references_alone() {
        let input = "Vol &#\u{0663}; and &#\u{0661}\u{0662};";
        assert_eq!(decode_entities(input).unwrap(), input);

        let catalog = r#"[{"id": 1, "albumname": "Vol &#\u0663;"}]"#;
        let data = load(catalog, "[]").unwrap();
        assert_eq!(data.catalog.albums()[0].name, "Vol &#\u{0663};");
    }

    #[test]
    fn rejects_surrogate_reference() {
        let err = decode_entities("x&#55296;y").unwrap_err();
        assert!(matches!(err, IngestionError::Entity { ref sequence } if sequence == "&#55296;"));
    }

    #[test]
    fn rejects_out_of_range_reference() {
        assert!(decode_entities("&#1114112;").is_err());
        assert!(decode_entities("&#99999999999999999999;").is_err());
    }

    #[test]
    fn decoding_plain_text_is_idempotent() {
        for s in ["", "plain", r#"[{"id": 1, "albumname": "Help!"}]"#, "a & b; #3"] {
            let once = decode_entities(s).unwrap();
            let twice = decode_entities(&once).unwrap();
            assert_eq!(once, twice);
            assert_eq!(once, s);
        }
    }

    #[test]
    fn printable_ascii_survives_encoding() {
        let printable: String = (0x20u8..=0x7e).map(char::from).collect();
        assert_eq!(decode_entities(&encode(&printable)).unwrap(), printable);
    }

    #[test]
    fn loads_encoded_payloads() {
        let catalog = encode(r#"[{"id": 1, "albumname": "Abbey Road"}, {"id": "lp-2", "albumname": "Revolver"}]"#);
        let prices = encode(r#"[{"albumname": "Abbey Road", "price": "$12.50"}]"#);

        let data = load(&catalog, &prices).unwrap();

        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.catalog.albums()[0].id, AlbumId::Number(1.into()));
        assert_eq!(data.catalog.albums()[0].name, "Abbey Road");
        assert_eq!(data.catalog.albums()[1].id, AlbumId::Text("lp-2".into()));
        assert_eq!(data.prices.get("Abbey Road"), Some("$12.50"));
        assert_eq!(data.prices.get("Revolver"), None);
    }

    #[test]
    fn ignores_extra_catalog_fields() {
        let catalog = r#"[{"id": 7, "albumname": "Rubber Soul", "releasedate": "1965-12-03", "bandname": "The Beatles"}]"#;
        let data = load(catalog, "[]").unwrap();
        assert_eq!(data.catalog.albums()[0].name, "Rubber Soul");
    }

    #[test]
    fn accepts_any_json_number_as_id() {
        let catalog = r#"[{"id": 1.0, "albumname": "A"}, {"id": 18446744073709551615, "albumname": "B"}]"#;
        let data = load(catalog, "[]").unwrap();

        assert_eq!(data.catalog.albums()[0].id.to_string(), "1.0");
        assert_eq!(data.catalog.albums()[1].id, AlbumId::Number(u64::MAX.into()));
    }

    #[test]
    fn later_price_entry_wins() {
        let prices = r#"[{"albumname": "a", "price": "$1"}, {"albumname": "a", "price": "$2"}]"#;
        let data = load("[]", prices).unwrap();
        assert_eq!(data.prices.len(), 1);
        assert_eq!(data.prices.get("a"), Some("$2"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = load("[{\"id\": 1,", "[]").unwrap_err();
        assert!(matches!(err, IngestionError::Json { payload: "catalog", .. }));

        let err = load("[]", r#"[{"albumname": "a"}]"#).unwrap_err();
        assert!(matches!(err, IngestionError::Json { payload: "price list", .. }));
    }

    #[test]
    fn rejects_malformed_encoding() {
        let err = load("[]", "&#55296;").unwrap_err();
        assert!(matches!(err, IngestionError::Entity { .. }));
    }

    #[test]
    fn loads_payloads_from_files() {
        let mut catalog = tempfile::NamedTempFile::new().unwrap();
        write!(catalog, "{}", encode(r#"[{"id": 1, "albumname": "Abbey Road"}]"#)).unwrap();

        let mut prices = tempfile::NamedTempFile::new().unwrap();
        write!(prices, "{}", encode(r#"[{"albumname": "Abbey Road", "price": "$12.50"}]"#)).unwrap();

        let data = load_files(catalog.path(), prices.path()).unwrap();
        assert_eq!(data.catalog.len(), 1);
        assert_eq!(data.prices.get("Abbey Road"), Some("$12.50"));
    }

    #[test]
    fn loads_demo_payloads() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
        let data = load_files(&root.join("catalog.json"), &root.join("prices.json")).unwrap();

        assert_eq!(data.catalog.len(), 4);
        assert_eq!(data.catalog.albums()[3].name, "Let It Be");
        assert_eq!(data.prices.get("Revolver"), Some("$9.99"));
        assert!(!data.prices.contains("Let It Be"));
    }

    #[test]
    fn reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = load_files(&missing, &missing).unwrap_err();
        assert!(matches!(err, IngestionError::Read { ref path, .. } if *path == missing));
    }
}
