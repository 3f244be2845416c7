//! Filtering, ordering and paging over documents

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use super::document::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals(Value),
    /// Also true when the field is absent.
    NotEquals(Value),
    /// Substring of a string field, or an element of an array of strings.
    Contains(String),
    Present(bool),
}

/// One field condition. `_id` addresses the document ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: String,
    condition: Condition,
}

impl Filter {
    pub fn new(field: &str, condition: Condition) -> Self {
        Self { field: field.to_string(), condition }
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, Condition::Equals(value.into()))
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, Condition::NotEquals(value.into()))
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Self::new(field, Condition::Contains(needle.to_string()))
    }

    pub fn exists(field: &str, present: bool) -> Self {
        Self::new(field, Condition::Present(present))
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let found = field_value(doc, &self.field);
        match (&self.condition, found.as_deref()) {
            (Condition::Present(wanted), value) => value.is_some() == *wanted,
            (Condition::NotEquals(_), None) => true,
            (_, None) => false,
            (Condition::Equals(expected), Some(value)) => value == expected,
            (Condition::NotEquals(expected), Some(value)) => value != expected,
            (Condition::Contains(needle), Some(Value::String(s))) => s.contains(needle.as_str()),
            (Condition::Contains(needle), Some(Value::Array(items))) => {
                items.iter().filter_map(Value::as_str).any(|item| item == needle)
            }
            (Condition::Contains(_), Some(_)) => false,
        }
    }
}

fn field_value<'d>(doc: &'d Document, field: &str) -> Option<Cow<'d, Value>> {
    if field == "_id" {
        return Some(Cow::Owned(Value::String(doc.id.clone())));
    }
    doc.get(field).map(Cow::Borrowed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
struct SortKey {
    field: String,
    direction: Direction,
}

impl SortKey {
    /// Documents lacking the field sort after the rest in both directions.
    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match (field_value(a, &self.field), field_value(b, &self.field)) {
            (Some(x), Some(y)) => {
                let ord = compare_json(&x, &y);
                match self.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Numbers compare numerically and strings lexically; mixed kinds tie.
fn compare_json(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// A conjunction of filters plus optional ordering and paging.
///
/// An empty query matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    sort: Option<SortKey>,
    skip: usize,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, field: &str, direction: Direction) -> Self {
        self.sort = Some(SortKey { field: field.to_string(), direction });
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip = n;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }

    /// Run over `docs`, which must already be in insertion order. The sort is
    /// stable, so equal keys keep that order.
    pub fn execute(&self, docs: Vec<Document>) -> Vec<Document> {
        let mut hits: Vec<Document> = docs.into_iter().filter(|d| self.matches(d)).collect();
        if let Some(key) = &self.sort {
            hits.sort_by(|a, b| key.compare(a, b));
        }
        hits.into_iter()
            .skip(self.skip)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
