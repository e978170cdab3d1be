use std::cmp::Ordering;

use crate::{Record, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Which column the table is ordered by. Starts unsorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    column: Option<String>,
    direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self { column: None, direction: SortDirection::Ascending }
    }
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reselecting the current column flips the direction; a new column
    /// resets to ascending.
    pub fn select(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn indicator(&self, column: &str) -> Option<SortDirection> {
        (self.column.as_deref() == Some(column)).then_some(self.direction)
    }

    /// Stable ordering of `rows` by the selected column. Unsorted state keeps
    /// the original order.
    pub fn apply<'a>(&self, rows: &'a [Record]) -> Vec<&'a Record> {
        let mut out: Vec<&Record> = rows.iter().collect();
        if let Some(col) = &self.column {
            out.sort_by(|a, b| compare_cells(a.get(col), b.get(col), self.direction));
        }
        out
    }
}

/// Nulls and missing cells go last when ascending, first when descending.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, dir: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let asc = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.compare(y),
    };
    match dir {
        SortDirection::Ascending => asc,
        SortDirection::Descending => asc.reverse(),
    }
}
