//! Stat card aggregates over the full, unsorted row set

use serde::{Deserialize, Serialize};

use super::format::{format_currency, format_integer};
use super::value::Row;

pub fn count(rows: &[Row]) -> usize {
    rows.len()
}

/// Sum of a numeric field; non-numeric and null fields count as zero
pub fn sum(rows: &[Row], key: &str) -> f64 {
    rows.iter()
        .filter_map(|r| r.get(key).as_f64_lenient())
        .fold(0.0, |acc, v| acc + v)
}

pub fn count_where<F>(rows: &[Row], predicate: F) -> usize
where
    F: Fn(&Row) -> bool,
{
    rows.iter().filter(|r| predicate(r)).count()
}

pub fn count_null(rows: &[Row], key: &str) -> usize {
    count_where(rows, |r| r.get(key).is_null())
}

/// Where a stat card takes its number from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Metric {
    /// Number of rows in the list dataset
    Count,
    Sum(String),
    CountNull(String),
    /// Field of the summary provider's object, passed through untouched
    Provided(String),
}

impl Metric {
    pub fn evaluate(&self, rows: &[Row], provided: Option<&Row>) -> Option<f64> {
        match self {
            Metric::Count => Some(count(rows) as f64),
            Metric::Sum(key) => Some(sum(rows, key)),
            Metric::CountNull(key) => Some(count_null(rows, key) as f64),
            Metric::Provided(key) => provided.and_then(|r| r.get(key).as_f64_lenient()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueFormat {
    #[default]
    Integer,
    Currency,
}

impl ValueFormat {
    pub fn apply(&self, value: f64) -> String {
        match self {
            ValueFormat::Integer => format_integer(value),
            ValueFormat::Currency => format_currency(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub metric: Metric,
    pub format: ValueFormat,
    /// CSS colour of the value, e.g. `#dc2626`
    pub accent: Option<String>,
}

impl StatCard {
    pub fn new(label: &str, metric: Metric) -> Self {
        Self {
            label: label.to_string(),
            metric,
            format: ValueFormat::Integer,
            accent: None,
        }
    }

    pub fn count(label: &str) -> Self {
        Self::new(label, Metric::Count)
    }

    pub fn sum(label: &str, key: &str) -> Self {
        Self::new(label, Metric::Sum(key.to_string()))
    }

    pub fn count_null(label: &str, key: &str) -> Self {
        Self::new(label, Metric::CountNull(key.to_string()))
    }

    pub fn provided(label: &str, key: &str) -> Self {
        Self::new(label, Metric::Provided(key.to_string()))
    }

    pub fn currency(mut self) -> Self {
        self.format = ValueFormat::Currency;
        self
    }

    pub fn accent(mut self, colour: &str) -> Self {
        self.accent = Some(colour.to_string());
        self
    }

    /// Formatted value; `—` until data is available
    pub fn render(&self, rows: &[Row], provided: Option<&Row>) -> String {
        self.metric
            .evaluate(rows, provided)
            .map(|v| self.format.apply(v))
            .unwrap_or_else(|| "—".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_view::value::CellValue;
    use crate::shared::report_view::column::{ColumnDescriptor, ColumnSchema};
    use crate::shared::report_view::sort::{sort_rows, SortState};

    fn rows() -> Vec<Row> {
        vec![
            Row::from_pairs([
                ("SKU", CellValue::from("A")),
                ("StockValue", CellValue::Number(10.5)),
                ("LastSaleDate", CellValue::Null),
            ]),
            Row::from_pairs([
                ("SKU", CellValue::from("B")),
                ("StockValue", CellValue::from("4.5")),
                ("LastSaleDate", CellValue::from("2024-01-01")),
            ]),
            Row::from_pairs([("SKU", CellValue::from("C")), ("StockValue", CellValue::Null)]),
        ]
    }

    #[test]
    fn test_aggregates() {
        let rows = rows();
        assert_eq!(count(&rows), 3);
        assert_eq!(sum(&rows, "StockValue"), 15.0);
        assert_eq!(count_null(&rows, "LastSaleDate"), 2);
        assert_eq!(count_where(&rows, |r| r.get("SKU").as_str() == Some("B")), 1);
        assert_eq!(sum(&[], "StockValue"), 0.0);
    }

    #[test]
    fn test_empty_sum_renders_as_zero() {
        let empty: Vec<Row> = Vec::new();
        assert!(sum(&empty, "StockValue").is_sign_positive());
        assert_eq!(StatCard::sum("Total QOH", "Total_QOH").render(&empty, None), "0");
        assert_eq!(StatCard::sum("Value", "StockValue").currency().render(&empty, None), "$0.00");

        let all_null = vec![Row::from_pairs([("StockValue", CellValue::Null)])];
        assert_eq!(StatCard::sum("Value", "StockValue").render(&all_null, None), "0");
    }

    #[test]
    fn test_sum_is_independent_of_sort() {
        let rows = rows();
        let schema = ColumnSchema::new(vec![
            ColumnDescriptor::text("SKU", "SKU"),
            ColumnDescriptor::number("StockValue", "Value"),
        ]);
        for state in [SortState::descending("StockValue"), SortState::ascending("SKU")] {
            let sorted = sort_rows(&rows, &state, &schema);
            assert_eq!(sum(&sorted, "StockValue"), sum(&rows, "StockValue"));
        }
    }

    #[test]
    fn test_provided_metric_passes_through() {
        let summary = Row::from_pairs([("TotalValue", CellValue::Number(99999.0))]);
        let card = StatCard::provided("Total Value", "TotalValue").currency();
        // the list rows are ignored for provided metrics
        assert_eq!(card.render(&rows(), Some(&summary)), "$99,999.00");
        assert_eq!(card.render(&rows(), None), "—");
    }
}
