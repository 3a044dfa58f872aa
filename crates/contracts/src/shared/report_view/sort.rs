//! Sort engine and header-click controller

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::collation::locale_compare;
use super::column::{ColumnKind, ColumnSchema};
use super::error::ReportViewError;
use super::value::{CellValue, Row};

/// Active column plus direction. One column is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub ascending: bool,
}

/// Per-header arrow shown next to the column label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Neutral,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::Neutral => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

impl SortState {
    pub fn new(key: impl Into<String>, ascending: bool) -> Self {
        Self {
            key: key.into(),
            ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }

    /// Checked constructor: the key has to name a column of `schema`
    pub fn for_schema(
        report: &str,
        schema: &ColumnSchema,
        key: &str,
        ascending: bool,
    ) -> Result<Self, ReportViewError> {
        if !schema.contains(key) {
            return Err(ReportViewError::UnknownColumn {
                report: report.to_string(),
                key: key.to_string(),
            });
        }
        Ok(Self::new(key, ascending))
    }

    /// Same column flips the direction; a new column starts descending
    pub fn on_header_click(&mut self, key: &str) {
        if self.key == key {
            self.ascending = !self.ascending;
        } else {
            self.key = key.to_string();
            self.ascending = false;
        }
    }

    pub fn indicator(&self, key: &str) -> SortIndicator {
        match (self.key == key, self.ascending) {
            (false, _) => SortIndicator::Neutral,
            (true, true) => SortIndicator::Ascending,
            (true, false) => SortIndicator::Descending,
        }
    }
}

/// Comparable form of a non-null cell.
///
/// Keys of different variants order by rank (dates, then numbers, then
/// text), so a column mixing parseable and unparseable values still
/// yields a total order.
#[derive(Debug, PartialEq)]
enum SortKey {
    Date(NaiveDate),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(cell: &CellValue, kind: ColumnKind) -> Self {
        let date = match kind {
            ColumnKind::Date => date_value(cell),
            ColumnKind::Text | ColumnKind::Number => None,
        };
        let number = match kind {
            ColumnKind::Number => cell.as_f64_lenient(),
            ColumnKind::Text | ColumnKind::Date => cell.as_f64(),
        };
        match (date, number) {
            (Some(d), _) => SortKey::Date(d),
            (None, Some(n)) => SortKey::Number(n),
            (None, None) => SortKey::Text(cell.to_plain_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Date(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => locale_compare(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn date_value(cell: &CellValue) -> Option<NaiveDate> {
    let s = cell.as_str()?.trim();
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Ascending comparison of two non-null cells
fn compare_values(a: &CellValue, b: &CellValue, kind: ColumnKind) -> Ordering {
    SortKey::of(a, kind).cmp(&SortKey::of(b, kind))
}

/// Full comparison for one direction. Nulls go last whichever way the column runs.
pub fn compare_cells(a: &CellValue, b: &CellValue, kind: ColumnKind, ascending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b, kind);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

/// Positions of `rows` in sorted order. Stable: ties keep input order.
pub fn sorted_indices(rows: &[Row], state: &SortState, schema: &ColumnSchema) -> Vec<usize> {
    let kind = schema.kind_of(&state.key).unwrap_or(ColumnKind::Text);
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.sort_by(|&i, &j| {
        compare_cells(
            rows[i].get(&state.key),
            rows[j].get(&state.key),
            kind,
            state.ascending,
        )
    });
    indices
}

/// Sorted copy of `rows`; the input is left untouched
pub fn sort_rows(rows: &[Row], state: &SortState, schema: &ColumnSchema) -> Vec<Row> {
    sorted_indices(rows, state, schema)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect()
}
