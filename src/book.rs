// Record model: the fixed shape of a book, the catalogue of editable
// fields and the value a field slot can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed field value. A slot holding `None` is the explicit "null"
/// state, which is distinct from `Text(String::new())`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Wrapper used for printing a slot, rendering the absent state as `null`.
pub struct Slot<'a>(pub Option<&'a FieldValue>);

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("null"),
        }
    }
}

/// Every field of a book except `id`, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Author,
    Title,
    Series,
    NumberInSeries,
    SubSeries,
    NumberInSubSeries,
    Format,
    Language,
    Year,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Author,
        Field::Title,
        Field::Series,
        Field::NumberInSeries,
        Field::SubSeries,
        Field::NumberInSubSeries,
        Field::Format,
        Field::Language,
        Field::Year,
    ];

    /// The key used in the backing file and shown in prompts.
    pub fn key(self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::Title => "title",
            Field::Series => "series",
            Field::NumberInSeries => "numberInSeries",
            Field::SubSeries => "subSeries",
            Field::NumberInSubSeries => "numberInSubSeries",
            Field::Format => "format",
            Field::Language => "language",
            Field::Year => "year",
        }
    }

    /// Fields declared as integers. Creation parses their input as a number.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::NumberInSeries | Field::NumberInSubSeries | Field::Year
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One book record as stored in the backing file.
///
/// Missing keys in an existing file load as absent, and absent slots are
/// always written back as `null` so the file keeps every key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    #[serde(default)]
    pub author: Option<FieldValue>,
    #[serde(default)]
    pub title: Option<FieldValue>,
    #[serde(default)]
    pub series: Option<FieldValue>,
    #[serde(default)]
    pub number_in_series: Option<FieldValue>,
    #[serde(default)]
    pub sub_series: Option<FieldValue>,
    #[serde(default)]
    pub number_in_sub_series: Option<FieldValue>,
    #[serde(default)]
    pub format: Option<FieldValue>,
    #[serde(default)]
    pub language: Option<FieldValue>,
    #[serde(default)]
    pub year: Option<FieldValue>,
}

impl Book {
    /// A record with the given id and every other field absent.
    pub fn empty(id: u64) -> Self {
        Book {
            id,
            author: None,
            title: None,
            series: None,
            number_in_series: None,
            sub_series: None,
            number_in_sub_series: None,
            format: None,
            language: None,
            year: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        match field {
            Field::Author => self.author.as_ref(),
            Field::Title => self.title.as_ref(),
            Field::Series => self.series.as_ref(),
            Field::NumberInSeries => self.number_in_series.as_ref(),
            Field::SubSeries => self.sub_series.as_ref(),
            Field::NumberInSubSeries => self.number_in_sub_series.as_ref(),
            Field::Format => self.format.as_ref(),
            Field::Language => self.language.as_ref(),
            Field::Year => self.year.as_ref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<FieldValue>) {
        let slot = match field {
            Field::Author => &mut self.author,
            Field::Title => &mut self.title,
            Field::Series => &mut self.series,
            Field::NumberInSeries => &mut self.number_in_series,
            Field::SubSeries => &mut self.sub_series,
            Field::NumberInSubSeries => &mut self.number_in_sub_series,
            Field::Format => &mut self.format,
            Field::Language => &mut self.language,
            Field::Year => &mut self.year,
        };
        *slot = value;
    }

    /// Single-line summary used by the list view.
    pub fn summary(&self) -> String {
        format!(
            "{}. {} - {} / {} - {} / {} - {} / {} / {} / {}",
            self.id,
            Slot(self.author.as_ref()),
            Slot(self.title.as_ref()),
            Slot(self.series.as_ref()),
            Slot(self.number_in_series.as_ref()),
            Slot(self.sub_series.as_ref()),
            Slot(self.number_in_sub_series.as_ref()),
            Slot(self.format.as_ref()),
            Slot(self.language.as_ref()),
            Slot(self.year.as_ref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_serializes_every_key_in_order_with_nulls() {
        let mut book = Book::empty(3);
        book.author = Some(FieldValue::text("Orwell"));
        book.number_in_series = Some(FieldValue::Int(2));

        let text = serde_json::to_string(&book).unwrap();
        assert_eq!(
            text,
            r#"{"id":3,"author":"Orwell","title":null,"series":null,"numberInSeries":2,"subSeries":null,"numberInSubSeries":null,"format":null,"language":null,"year":null}"#
        );
    }

    #[test]
    fn test_missing_keys_load_as_absent() {
        let book: Book = serde_json::from_value(json!({
            "id": 7,
            "author": "Le Guin",
            "numberInSeries": 1
        }))
        .unwrap();

        assert_eq!(book.get(Field::Author), Some(&FieldValue::text("Le Guin")));
        assert_eq!(book.get(Field::NumberInSeries), Some(&FieldValue::Int(1)));
        assert_eq!(book.get(Field::Title), None);
        assert_eq!(book.get(Field::Year), None);
    }

    #[test]
    fn test_empty_text_is_not_null() {
        let book: Book = serde_json::from_value(json!({"id": 1, "series": ""})).unwrap();
        assert_eq!(book.series, Some(FieldValue::text("")));
        assert_eq!(book.sub_series, None);
    }

    #[test]
    fn test_set_and_get_every_field() {
        let mut book = Book::empty(1);
        for (i, field) in Field::ALL.iter().enumerate() {
            book.set(*field, Some(FieldValue::Int(i as i64)));
        }
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(book.get(*field), Some(&FieldValue::Int(i as i64)));
        }
        book.set(Field::Format, None);
        assert_eq!(book.get(Field::Format), None);
    }

    #[test]
    fn test_summary_renders_absent_as_null() {
        let mut book = Book::empty(1);
        book.author = Some(FieldValue::text("Orwell"));
        book.title = Some(FieldValue::text("1984"));
        assert_eq!(
            book.summary(),
            "1. Orwell - 1984 / null - null / null - null / null / null / null"
        );
    }
}
