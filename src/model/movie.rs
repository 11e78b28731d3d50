use serde::{Deserialize, Serialize};

use crate::model::schema::{FieldSpec, MOVIE_FIELDS};

/// One catalog record, exactly as the backend serializes it. Instances are
/// only ever built from backend responses; the client never assigns a
/// `movie_id` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub movie_id: Option<i64>,
    pub title: String,
    #[serde(rename = "genre", default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub runtime_min: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A borrowed view of one field's value, keyed by the schema's wire name.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    List(&'a [String]),
    Missing,
}

impl Movie {
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "genre" => FieldValue::List(&self.genres),
            "actors" => FieldValue::List(&self.actors),
            "director" => match &self.director {
                Some(d) => FieldValue::Text(d),
                None => FieldValue::Missing,
            },
            "runtime_min" => match self.runtime_min {
                Some(m) => FieldValue::Number(m as f64),
                None => FieldValue::Missing,
            },
            "rating" => match self.rating {
                Some(r) => FieldValue::Number(r),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }

    pub fn display_value(&self, field: &FieldSpec) -> String {
        match self.field(field.name) {
            FieldValue::Text(t) => t.to_string(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", n as i64)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::List(items) => items.join(", "),
            FieldValue::Missing => String::new(),
        }
    }

    pub fn to_csvable_array(&self) -> Vec<String> {
        MOVIE_FIELDS
            .iter()
            .map(|field| self.display_value(field))
            .collect()
    }

    pub fn csv_titles() -> Vec<&'static str> {
        MOVIE_FIELDS.iter().map(|field| field.label).collect()
    }
}
