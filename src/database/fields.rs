use chrono::{NaiveDate, NaiveDateTime};
use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

/// A single column value on its way into SQLite
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

/// Ordered column -> value pairs for an insert or update.
///
/// Column names are `'static` so they always come from code (rule sets and
/// handlers), never from request input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `column`
    pub fn set(&mut self, column: &'static str, value: FieldValue) {
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn with(mut self, column: &'static str, value: FieldValue) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        match self.get(column) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.get(column) {
            Some(FieldValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn remove(&mut self, column: &str) -> Option<FieldValue> {
        let idx = self.0.iter().position(|(c, _)| *c == column)?;
        Some(self.0.remove(idx).1)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_values(self) -> impl Iterator<Item = FieldValue> {
        self.0.into_iter().map(|(_, v)| v)
    }
}

pub(crate) fn bind_value<'q, O>(
    q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    v: FieldValue,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    match v {
        FieldValue::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        FieldValue::Text(s) => q.bind(s),
        FieldValue::Integer(i) => q.bind(i),
        FieldValue::Real(f) => q.bind(f),
        FieldValue::Bool(b) => q.bind(b),
        FieldValue::Timestamp(ts) => q.bind(ts),
        FieldValue::Date(d) => q.bind(d),
    }
}
