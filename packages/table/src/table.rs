//! The record table container.

use crate::{TableError, Value};

/// One table row.
pub type Row = Vec<Value>;

/// An ordered collection of ad records with name-addressable columns.
///
/// Operations never mutate in place; each returns a fresh table so a
/// pipeline stage can be reasoned about as a pure `Table -> Table`
/// function.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given column names.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// The column names, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a column name to its position.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingColumn`] if the column does not exist.
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn {
                name: name.to_owned(),
            })
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if the row width does not
    /// match the column count.
    pub fn push_row(&mut self, row: Row) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::LengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns a new table keeping only the rows the predicate accepts.
    #[must_use]
    pub fn retain_rows(&self, mut keep: impl FnMut(&Row) -> bool) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Returns a new table with every row replaced by `f(row)`.
    ///
    /// The mapper must preserve row width; this is enforced with a
    /// debug assertion since all callers are in-crate pipeline stages.
    #[must_use]
    pub fn map_rows(&self, mut f: impl FnMut(Row) -> Row) -> Self {
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let mapped = f(r.clone());
                debug_assert_eq!(mapped.len(), self.columns.len());
                mapped
            })
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Returns a new table with an extra column appended.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if the name is taken, or
    /// [`TableError::LengthMismatch`] if `values` does not have one
    /// entry per row.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Self, TableError> {
        if self.columns.iter().any(|c| c == name) {
            return Err(TableError::DuplicateColumn {
                name: name.to_owned(),
            });
        }
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_owned());
        let rows = self
            .rows
            .iter()
            .cloned()
            .zip(values)
            .map(|(mut row, value)| {
                row.push(value);
                row
            })
            .collect();
        Ok(Self { columns, rows })
    }

    /// Returns a new table without the named columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingColumn`] if any name does not exist.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Self, TableError> {
        let mut dropped = Vec::with_capacity(names.len());
        for name in names {
            dropped.push(self.column_index(name)?);
        }
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, c)| c.clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| !dropped.contains(i))
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect();
        Ok(Self { columns, rows })
    }

    /// Returns a new table with at most the first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
