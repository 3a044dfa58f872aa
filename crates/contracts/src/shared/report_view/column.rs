use serde::{Deserialize, Serialize};

use super::format::{format_currency, format_integer};
use super::value::CellValue;

/// Value kind of a report column; drives comparison and alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
        }
    }
}

/// Where a column shows up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Everywhere,
    /// Only in the CSV export (e.g. bin location)
    ExportOnly,
    /// Only in the on-screen table
    TableOnly,
}

/// How a cell is rendered on screen. CSV export always uses the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayFormat {
    #[default]
    Plain,
    Integer,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    /// Header text in the CSV export when it differs from the on-screen label
    pub export_label: Option<String>,
    pub sortable: bool,
    pub visibility: Visibility,
    pub display: DisplayFormat,
    /// Literal written to CSV for null/missing values; the exporter default applies when unset
    pub null_label: Option<String>,
}

impl ColumnDescriptor {
    fn with_kind(key: &str, label: &str, kind: ColumnKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            export_label: None,
            sortable: true,
            visibility: Visibility::Everywhere,
            display: DisplayFormat::Plain,
            null_label: None,
        }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::with_kind(key, label, ColumnKind::Text)
    }

    pub fn number(key: &str, label: &str) -> Self {
        Self::with_kind(key, label, ColumnKind::Number)
    }

    pub fn date(key: &str, label: &str) -> Self {
        Self::with_kind(key, label, ColumnKind::Date)
    }

    pub fn export_as(mut self, label: &str) -> Self {
        self.export_label = Some(label.to_string());
        self
    }

    pub fn export_only(mut self) -> Self {
        self.visibility = Visibility::ExportOnly;
        self
    }

    pub fn table_only(mut self) -> Self {
        self.visibility = Visibility::TableOnly;
        self
    }

    pub fn unsorted(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn integer(mut self) -> Self {
        self.display = DisplayFormat::Integer;
        self
    }

    pub fn currency(mut self) -> Self {
        self.display = DisplayFormat::Currency;
        self
    }

    pub fn null_as(mut self, literal: &str) -> Self {
        self.null_label = Some(literal.to_string());
        self
    }

    pub fn align(&self) -> Align {
        match self.kind {
            ColumnKind::Number => Align::Right,
            ColumnKind::Text | ColumnKind::Date => Align::Left,
        }
    }

    pub fn csv_header(&self) -> &str {
        self.export_label.as_deref().unwrap_or(&self.label)
    }

    pub fn in_table(&self) -> bool {
        self.visibility != Visibility::ExportOnly
    }

    pub fn in_export(&self) -> bool {
        self.visibility != Visibility::TableOnly
    }

    /// On-screen text for a cell of this column
    pub fn display_value(&self, cell: &CellValue) -> String {
        if cell.is_null() {
            return "—".to_string();
        }
        match (self.display, cell.as_f64_lenient()) {
            (DisplayFormat::Currency, Some(n)) => format_currency(n),
            (DisplayFormat::Integer, Some(n)) => format_integer(n),
            _ => cell.to_plain_string(),
        }
    }
}

/// Ordered, static column set of one report table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnSchema {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn kind_of(&self, key: &str) -> Option<ColumnKind> {
        self.get(key).map(|c| c.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn table_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.in_table())
    }

    pub fn export_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.in_export())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<ColumnDescriptor> for ColumnSchema {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnDescriptor::text("SKU", "SKU"),
            ColumnDescriptor::text("Location", "Location").export_only(),
            ColumnDescriptor::number("StockValue", "Value").currency(),
            ColumnDescriptor::text("AgeBracket", "Age")
                .export_as("Age Bracket")
                .unsorted(),
        ])
    }

    #[test]
    fn test_alignment_follows_kind() {
        let s = schema();
        assert_eq!(s.get("SKU").unwrap().align(), Align::Left);
        assert_eq!(s.get("StockValue").unwrap().align(), Align::Right);
        assert_eq!(ColumnDescriptor::date("LastSaleDate", "Last Sale").align(), Align::Left);
    }

    #[test]
    fn test_table_and_export_projections() {
        let s = schema();
        let table: Vec<&str> = s.table_columns().map(|c| c.key.as_str()).collect();
        let export: Vec<&str> = s.export_columns().map(|c| c.csv_header()).collect();
        assert_eq!(table, vec!["SKU", "StockValue", "AgeBracket"]);
        assert_eq!(export, vec!["SKU", "Location", "Value", "Age Bracket"]);
    }

    #[test]
    fn test_display_value_formats() {
        let s = schema();
        let value = s.get("StockValue").unwrap();
        assert_eq!(value.display_value(&CellValue::Number(1234.5)), "$1,234.50");
        assert_eq!(value.display_value(&CellValue::Null), "—");
        assert_eq!(s.get("SKU").unwrap().display_value(&"A1".into()), "A1");
    }
}
