use crate::error::{CatalogError, Result};
use crate::row::{CatalogId, CatalogRow};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decodes raw catalog bytes as UTF-8. A leading byte-order mark is stripped
/// (spreadsheet exports add one) and undecodable byte sequences are dropped.
pub fn decode_catalog_text(bytes: &[u8]) -> String {
    let mut input = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    let mut text = String::with_capacity(input.len());
    let mut dropped = 0usize;
    loop {
        match std::str::from_utf8(input) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                if let Ok(valid) = std::str::from_utf8(&input[..valid_up_to]) {
                    text.push_str(valid);
                }
                let skip = err.error_len().unwrap_or(input.len() - valid_up_to);
                dropped += skip;
                input = &input[valid_up_to + skip..];
            }
        }
    }
    if dropped > 0 {
        log::warn!("dropped {dropped} undecodable bytes from catalog text");
    }
    text
}

/// Parses decoded catalog text as header-full CSV, mapping each record
/// through the catalog's column mapping. A record missing a mapped column
/// yields an empty field; records the reader cannot decode are skipped.
pub fn parse_catalog(id: CatalogId, text: &str) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|source| CatalogError::Csv {
            catalog: id,
            source,
        })?
        .clone();
    let pattern_index = column_index(&headers, id.pattern_column());
    let recommendation_index = column_index(&headers, id.recommendation_column());
    if pattern_index.is_none() {
        log::warn!(
            "{id} catalog has no {} column; every row will be ineligible for matching",
            id.pattern_column()
        );
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(CatalogRow {
                catalog: id,
                pattern: field(&record, pattern_index),
                recommendation: field(&record, recommendation_index),
            }),
            Err(err) => log::warn!("skipping unreadable record in {id} catalog: {err}"),
        }
    }
    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|index| record.get(index))
        .unwrap_or_default()
        .to_string()
}
