//! JSON import/export of the quote collection.
//!
//! The file format is a top-level array of objects with string `text` and
//! `category` fields. Extra fields are ignored on import, so an exported file
//! (which carries ids and timestamps) imports cleanly.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::quote::{ContentKey, Quote};

/// Records accepted from an import document.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// New records, trimmed and given fresh ids, in document order.
    pub imported: Vec<Quote>,
    /// Items dropped because they were malformed, blank, or duplicates.
    pub skipped: usize,
}

impl ImportOutcome {
    #[must_use]
    pub fn added(&self) -> usize {
        self.imported.len()
    }
}

/// Parses `document` and returns the records not already present in `existing`.
///
/// # Errors
/// Returns [`CoreError::ImportFormat`] if the document is not valid JSON or its
/// top-level value is not an array. Nothing is partially accepted in that case.
pub fn import_json(existing: &[Quote], document: &str) -> Result<ImportOutcome> {
    let parsed: Value = serde_json::from_str(document)
        .map_err(|e| CoreError::ImportFormat(format!("not valid JSON: {e}")))?;
    let Value::Array(items) = parsed else {
        return Err(CoreError::ImportFormat(
            "expected an array of { text, category } objects".to_owned(),
        ));
    };

    let mut seen: HashSet<ContentKey> = existing.iter().map(Quote::content_key).collect();
    let mut outcome = ImportOutcome::default();

    for item in &items {
        let fields = item
            .get("text")
            .and_then(Value::as_str)
            .zip(item.get("category").and_then(Value::as_str));
        let Some(quote) = fields.and_then(|(text, category)| Quote::new(text, category).ok())
        else {
            outcome.skipped += 1;
            continue;
        };
        if seen.insert(quote.content_key()) {
            outcome.imported.push(quote);
        } else {
            outcome.skipped += 1;
        }
    }

    tracing::debug!(
        total = items.len(),
        added = outcome.added(),
        skipped = outcome.skipped,
        "parsed import document"
    );
    Ok(outcome)
}

/// Serializes the collection as pretty-printed JSON (2-space indentation).
///
/// # Errors
/// Returns [`CoreError::Serialization`] if encoding fails.
pub fn export_json(records: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_object_top_level() {
        let err = import_json(&[], r#"{"text":"A"}"#).unwrap_err();
        assert!(matches!(err, CoreError::ImportFormat(_)));
    }

    #[test]
    fn rejects_unparseable_document() {
        let err = import_json(&[], "[{\"text\": ").unwrap_err();
        assert!(matches!(err, CoreError::ImportFormat(_)));
    }

    #[test]
    fn skips_malformed_blank_and_duplicate_items() {
        let existing = vec![Quote::new("Known", "Life").unwrap()];
        let doc = r#"[
            {"text": "  Known ", "category": "Life"},
            {"text": "Fresh", "category": "Life", "extra": true},
            {"text": "Fresh", "category": "Life"},
            {"text": 5, "category": "Life"},
            {"text": "No category"},
            {"text": "   ", "category": "Life"},
            "not an object",
            null
        ]"#;

        let outcome = import_json(&existing, doc).unwrap();

        assert_eq!(outcome.added(), 1);
        assert_eq!(outcome.imported[0].text, "Fresh");
        assert_eq!(outcome.skipped, 7);
    }

    #[test]
    fn imported_records_are_trimmed_and_identified() {
        let outcome = import_json(&[], r#"[{"text": " A ", "category": " X "}]"#).unwrap();
        let quote = &outcome.imported[0];
        assert_eq!((quote.text.as_str(), quote.category.as_str()), ("A", "X"));
        assert!(quote.is_migrated());
    }

    #[test]
    fn export_uses_two_space_indent() {
        let json = export_json(&[Quote::new("A", "X").unwrap()]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\""));
    }

    #[test]
    fn export_then_import_preserves_content_keys() {
        let records = vec![
            Quote::new("A", "X").unwrap(),
            Quote::new("B", "X").unwrap(),
            Quote::new("A", "Y").unwrap(),
        ];
        let doc = export_json(&records).unwrap();
        let outcome = import_json(&[], &doc).unwrap();

        let before: Vec<_> = records.iter().map(Quote::content_key).collect();
        let after: Vec<_> = outcome.imported.iter().map(Quote::content_key).collect();
        assert_eq!(before, after);
        assert_eq!(outcome.skipped, 0);
    }
}
