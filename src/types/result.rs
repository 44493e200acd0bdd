use crate::error::{DriverError, Result};
use crate::types::{Row, Rows};

/// Outcome of executing a query.
///
/// Row-returning statements produce [`QueryResult::Rows`], which is empty
/// rather than absent when nothing matched. Other statements produce a
/// scalar (typically an affected-row count) or [`QueryResult::Empty`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Text(String),
    Int(i64),
    Float(f64),
    Rows(Rows),
    Row(Row),
    Empty,
}

impl QueryResult {
    /// Name of the active variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryResult::Text(_) => "text",
            QueryResult::Int(_) => "int",
            QueryResult::Float(_) => "float",
            QueryResult::Rows(_) => "rows",
            QueryResult::Row(_) => "row",
            QueryResult::Empty => "empty",
        }
    }

    /// Returns true for `Empty` and for an empty row set.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryResult::Empty => true,
            QueryResult::Rows(rows) => rows.is_empty(),
            _ => false,
        }
    }

    /// Returns all rows. A single `Row` becomes a one-element set.
    pub fn into_rows(self) -> Result<Rows> {
        match self {
            QueryResult::Rows(rows) => Ok(rows),
            QueryResult::Row(row) => Ok(vec![row]),
            other => Err(DriverError::UnexpectedResult {
                expected: "rows",
                actual: other.kind(),
            }),
        }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let rows = self.into_rows()?;
        if rows.len() != 1 {
            return Err(DriverError::UnexpectedRowCount {
                expected: 1,
                actual: rows.len(),
            });
        }
        rows.into_iter().next().ok_or(DriverError::UnexpectedRowCount {
            expected: 1,
            actual: 0,
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryResult::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryResult::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<Rows> for QueryResult {
    fn from(rows: Rows) -> Self {
        QueryResult::Rows(rows)
    }
}

impl From<Row> for QueryResult {
    fn from(row: Row) -> Self {
        QueryResult::Row(row)
    }
}
