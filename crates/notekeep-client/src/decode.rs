//! Tolerant decoding of note list responses.
//!
//! A list view must always be renderable, so list-shaped responses never fail:
//! a body that is not a JSON array becomes an empty list, and array entries
//! that are not notes are skipped.

use notekeep_core::logging::SUBSYSTEM_CLIENT;
use notekeep_core::Note;
use tracing::{trace, warn};

use crate::status::Operation;

/// Decode a list-shaped response body.
pub fn note_list(op: Operation, body: &str) -> Vec<Note> {
    let items = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(other) => {
            warn!(
                subsystem = SUBSYSTEM_CLIENT,
                op = op.as_str(),
                kind = json_kind(&other),
                "Unexpected data format, expected a list; using empty result"
            );
            return Vec::new();
        }
        Err(e) => {
            warn!(
                subsystem = SUBSYSTEM_CLIENT,
                op = op.as_str(),
                error = %e,
                "Response is not JSON; using empty result"
            );
            return Vec::new();
        }
    };

    let total = items.len();
    let notes: Vec<Note> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<Note>(item) {
            Ok(note) => {
                trace!(op = op.as_str(), note_id = %note.id, "Decoded note");
                Some(note)
            }
            Err(e) => {
                warn!(
                    subsystem = SUBSYSTEM_CLIENT,
                    op = op.as_str(),
                    index = idx,
                    error = %e,
                    "Skipping malformed note entry"
                );
                None
            }
        })
        .collect();

    if notes.len() < total {
        warn!(
            subsystem = SUBSYSTEM_CLIENT,
            op = op.as_str(),
            result_count = notes.len(),
            skipped = total - notes.len(),
            "Some list entries were not notes"
        );
    }
    notes
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_array_of_notes() {
        let body = r#"[
            {"id": 1, "title": "A", "content": "a", "createdAt": "2024-03-01T10:00:00"},
            {"id": 2, "title": "B", "content": "b", "createdAt": "2024-03-02T10:00:00"}
        ]"#;
        let notes = note_list(Operation::ListNotes, body);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "A");
        assert_eq!(notes[1].id.as_str(), "2");
    }

    #[test]
    fn test_empty_array() {
        assert!(note_list(Operation::SearchNotes, "[]").is_empty());
    }

    #[test]
    fn test_object_body_is_empty() {
        let body = r#"{"notes": [], "error": "unexpected"}"#;
        assert!(note_list(Operation::ListNotes, body).is_empty());
    }

    #[test]
    fn test_html_body_is_empty() {
        assert!(note_list(Operation::ListNotes, "<html>login</html>").is_empty());
        assert!(note_list(Operation::ListNotes, "").is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let body = r#"[
            {"id": 1, "title": "A", "content": "a", "createdAt": "2024-03-01T10:00:00"},
            {"unexpected": true},
            "text"
        ]"#;
        let notes = note_list(Operation::ListNotes, body);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
    }
}
