//! CSV export of the sorted projection

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::column::{ColumnDescriptor, ColumnSchema};
use super::error::ReportViewError;
use super::value::Row;

/// Quoting flavour of the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvMode {
    /// Every field wrapped in `"`, no escaping, `\n` between lines, no trailing newline.
    /// Fields that contain `"` produce malformed CSV.
    #[default]
    Legacy,
    /// RFC 4180: quotes doubled, CRLF line endings
    Rfc4180,
}

/// A finished export ready to be handed to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub filename: String,
    pub content: String,
}

impl CsvArtifact {
    pub const MIME: &'static str = "text/csv";
}

/// `<slug>-<YYYY-MM-DD>.csv`
pub fn export_filename(slug: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", slug, date.format("%Y-%m-%d"))
}

pub struct CsvExporter<'a> {
    schema: &'a ColumnSchema,
    mode: CsvMode,
    null_label: String,
}

impl<'a> CsvExporter<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self {
            schema,
            mode: CsvMode::default(),
            null_label: String::new(),
        }
    }

    pub fn mode(mut self, mode: CsvMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fallback literal for null fields in columns without their own label
    pub fn null_label(mut self, label: impl Into<String>) -> Self {
        self.null_label = label.into();
        self
    }

    fn field(&self, column: &ColumnDescriptor, row: &Row) -> String {
        let cell = row.get(&column.key);
        if cell.is_null() {
            column
                .null_label
                .clone()
                .unwrap_or_else(|| self.null_label.clone())
        } else {
            cell.to_plain_string()
        }
    }

    fn records(&self, rows: &[Row]) -> Vec<Vec<String>> {
        let columns: Vec<&ColumnDescriptor> = self.schema.export_columns().collect();
        let header = columns.iter().map(|c| c.csv_header().to_string()).collect();

        std::iter::once(header)
            .chain(
                rows.iter()
                    .map(|row| columns.iter().map(|c| self.field(c, row)).collect()),
            )
            .collect()
    }

    /// Renders `rows` in the order given; callers pass the sorted projection
    pub fn to_csv(&self, rows: &[Row]) -> Result<String, ReportViewError> {
        let records = self.records(rows);
        match self.mode {
            CsvMode::Legacy => Ok(records
                .iter()
                .map(|fields| {
                    fields
                        .iter()
                        .map(|f| format!("\"{}\"", f))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect::<Vec<_>>()
                .join("\n")),
            CsvMode::Rfc4180 => {
                let mut writer = WriterBuilder::new()
                    .quote_style(QuoteStyle::Always)
                    .terminator(Terminator::CRLF)
                    .from_writer(Vec::new());
                for fields in &records {
                    writer.write_record(fields)?;
                }
                let bytes = writer
                    .into_inner()
                    .map_err(|e| ReportViewError::Csv(e.to_string()))?;
                String::from_utf8(bytes).map_err(|e| ReportViewError::Csv(e.to_string()))
            }
        }
    }

    pub fn export(
        &self,
        slug: &str,
        rows: &[Row],
        date: NaiveDate,
    ) -> Result<CsvArtifact, ReportViewError> {
        Ok(CsvArtifact {
            filename: export_filename(slug, date),
            content: self.to_csv(rows)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_view::value::CellValue;

    fn sku_title() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnDescriptor::text("SKU", "SKU"),
            ColumnDescriptor::text("Title", "Title"),
        ])
    }

    #[test]
    fn test_legacy_output_is_exact() {
        let schema = sku_title();
        let rows = vec![Row::from_pairs([("SKU", "A1"), ("Title", "Widget")])];
        let csv = CsvExporter::new(&schema).to_csv(&rows).unwrap();
        assert_eq!(csv, "\"SKU\",\"Title\"\n\"A1\",\"Widget\"");
    }

    #[test]
    fn test_legacy_does_not_escape_quotes() {
        let schema = sku_title();
        let rows = vec![Row::from_pairs([("SKU", "A1"), ("Title", "12\" rotor")])];
        let csv = CsvExporter::new(&schema).to_csv(&rows).unwrap();
        assert_eq!(csv, "\"SKU\",\"Title\"\n\"A1\",\"12\" rotor\"");
    }

    #[test]
    fn test_rfc4180_escapes_quotes() {
        let schema = sku_title();
        let rows = vec![Row::from_pairs([("SKU", "A1"), ("Title", "12\" rotor")])];
        let csv = CsvExporter::new(&schema)
            .mode(CsvMode::Rfc4180)
            .to_csv(&rows)
            .unwrap();
        assert_eq!(csv, "\"SKU\",\"Title\"\r\n\"A1\",\"12\"\" rotor\"\r\n");
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let schema = sku_title();
        assert_eq!(
            CsvExporter::new(&schema).to_csv(&[]).unwrap(),
            "\"SKU\",\"Title\""
        );
    }

    #[test]
    fn test_null_literals_and_export_columns() {
        let schema = ColumnSchema::new(vec![
            ColumnDescriptor::text("SKU", "SKU"),
            ColumnDescriptor::text("Location", "Location").export_only(),
            ColumnDescriptor::number("Stock", "Stock"),
            ColumnDescriptor::date("LastSaleDate", "Last Sale").null_as("Never"),
            ColumnDescriptor::number("Days", "Days").table_only(),
        ]);
        let rows = vec![Row::from_pairs([
            ("SKU", CellValue::from("A1")),
            ("Stock", CellValue::Number(4.0)),
            ("LastSaleDate", CellValue::Null),
            ("Days", CellValue::Number(400.0)),
        ])];

        let csv = CsvExporter::new(&schema).to_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "\"SKU\",\"Location\",\"Stock\",\"Last Sale\"\n\"A1\",\"\",\"4\",\"Never\""
        );

        let csv = CsvExporter::new(&schema).null_label("-").to_csv(&rows).unwrap();
        assert!(csv.ends_with("\"A1\",\"-\",\"4\",\"Never\""));
    }

    #[test]
    fn test_filename_uses_slug_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_filename("dead-stock", date), "dead-stock-2024-03-07.csv");

        let schema = sku_title();
        let artifact = CsvExporter::new(&schema)
            .export("brand-stock", &[], date)
            .unwrap();
        assert_eq!(artifact.filename, "brand-stock-2024-03-07.csv");
    }
}
