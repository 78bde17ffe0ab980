//! Column-oriented table model for the raw and cleaned dataset.
//!
//! Cells are optional strings straight from the delimited file; a `None` cell
//! is a missing value. Typed extraction happens later, once the cleaner has
//! guaranteed the retained columns are complete.

/// A single named column of optional cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_fully_missing(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// All present cells parsed as `f64`, or `None` if any present cell
    /// fails to parse. A column with no present cells is not numeric.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        let mut values = Vec::new();
        for cell in self.cells.iter().flatten() {
            values.push(cell.trim().parse::<f64>().ok()?);
        }
        if values.is_empty() { None } else { Some(values) }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_values().is_some()
    }
}

/// A set of equally-long columns in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].cells.len() == w[1].cells.len()),
            "ragged table"
        );
        Self { columns }
    }

    /// Builds a table from row-major records, as read from a delimited file.
    /// Short rows are padded with missing cells.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().flatten());
            }
        }
        Self { columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Cell accessor for row-wise extraction over a known column.
    pub fn cell<'a>(&'a self, name: &str, row: usize) -> Option<&'a str> {
        self.column(name)?.cells.get(row)?.as_deref()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}
