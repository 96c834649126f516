//! Column assignments produced by partial updates
//!
//! Patches translate their camelCase fields into `(column, value)` pairs so
//! repositories can build an `UPDATE` without knowing the patch shape.

/// A value written to one storage column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(Option<String>),
    Bool(bool),
    Integer(Option<i64>),
}

impl ColumnValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }
}

/// Ordered list of column writes
pub type Assignments = Vec<(&'static str, ColumnValue)>;
