use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::model::schema::{FieldKind, FieldSpec, MOVIE_FIELDS};

/// The in-progress form for a new record: raw text per schema field,
/// untyped until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    values: BTreeMap<&'static str, String>,
}

impl Draft {
    pub fn empty() -> Self {
        Draft {
            values: MOVIE_FIELDS
                .iter()
                .map(|field| (field.name, String::new()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Replaces one field's raw text, leaving every other field as it was.
    /// Names outside the schema are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = MOVIE_FIELDS.iter().find(|f| f.name == name) {
            self.values.insert(field.name, value.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    /// Required fields whose raw text is still empty. Presence is the only
    /// thing checked here; numeric text that fails to parse is left for the
    /// backend to judge.
    pub fn missing_required(&self) -> Vec<&'static FieldSpec> {
        MOVIE_FIELDS
            .iter()
            .filter(|field| field.required && self.get(field.name).is_empty())
            .collect()
    }

    /// Builds the create payload the schema way: blank optional text becomes
    /// null, numeric text parses leniently (unparseable input becomes null),
    /// list input splits on commas with trimmed segments and empties dropped.
    pub fn to_payload(&self) -> Value {
        let mut payload = serde_json::Map::new();
        for field in MOVIE_FIELDS {
            let raw = self.get(field.name);
            let value = match field.kind {
                FieldKind::Text => {
                    if raw.is_empty() {
                        Value::Null
                    } else {
                        json!(raw)
                    }
                }
                FieldKind::Integer => match raw.parse::<i64>() {
                    Ok(n) => json!(n),
                    Err(_) => Value::Null,
                },
                FieldKind::Decimal => match raw.parse::<f64>() {
                    Ok(n) => json!(n),
                    Err(_) => Value::Null,
                },
                FieldKind::List => json!(split_list(raw)),
            };
            payload.insert(field.name.to_string(), value);
        }
        Value::Object(payload)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_field_blank() {
        let draft = Draft::empty();
        assert!(draft.is_empty());
        assert_eq!(draft.get("title"), "");
        assert_eq!(draft.get("rating"), "");
    }

    #[test]
    fn set_touches_only_the_named_field() {
        let mut draft = Draft::empty();
        draft.set("title", "Alien");
        draft.set("rating", "8.5");
        draft.set("no_such_field", "ignored");

        assert_eq!(draft.get("title"), "Alien");
        assert_eq!(draft.get("rating"), "8.5");
        assert_eq!(draft.get("director"), "");
    }

    #[test]
    fn reports_blank_required_fields() {
        let mut draft = Draft::empty();
        let missing: Vec<&str> = draft.missing_required().iter().map(|f| f.name).collect();
        assert_eq!(missing, vec!["title", "rating"]);

        draft.set("title", "Alien");
        let missing: Vec<&str> = draft.missing_required().iter().map(|f| f.name).collect();
        assert_eq!(missing, vec!["rating"]);
    }

    #[test]
    fn payload_nulls_blank_text_and_splits_lists() {
        let mut draft = Draft::empty();
        draft.set("title", "Alien");
        draft.set("genre", " Horror , Sci-Fi ,, ");
        draft.set("rating", "8.5");

        let payload = draft.to_payload();
        assert_eq!(payload["title"], json!("Alien"));
        assert_eq!(payload["genre"], json!(["Horror", "Sci-Fi"]));
        assert_eq!(payload["actors"], json!([]));
        assert_eq!(payload["director"], Value::Null);
        assert_eq!(payload["runtime_min"], Value::Null);
        assert_eq!(payload["rating"], json!(8.5));
        assert!(payload.get("movie_id").is_none());
    }

    #[test]
    fn unparseable_numeric_text_becomes_null() {
        let mut draft = Draft::empty();
        draft.set("runtime_min", "two hours");
        draft.set("rating", "great");

        let payload = draft.to_payload();
        assert_eq!(payload["runtime_min"], Value::Null);
        assert_eq!(payload["rating"], Value::Null);
    }
}
