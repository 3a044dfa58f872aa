//! Report definitions: the configuration object a generic report page is
//! built from.

pub mod catalog;

use serde::{Deserialize, Serialize};

use crate::shared::report_view::{ColumnSchema, CsvMode, ReportViewError, SortState, StatCard};

/// Shape of a provider's JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderShape {
    /// `Row[]`
    List,
    /// One `Row` object
    Single,
}

/// Home page card of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub accent: String,
}

/// One provider call of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub endpoint: String,
    pub shape: ProviderShape,
}

/// Secondary aggregate table shown as a tab, rendered in provider order
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSpec {
    pub tab_label: String,
    pub endpoint: String,
    pub columns: ColumnSchema,
    /// File stem of the tab's own CSV export; `None` when the tab has no export
    pub export_as: Option<String>,
}

/// The main sortable, exportable table
#[derive(Debug, Clone, PartialEq)]
pub struct ListSpec {
    pub endpoint: String,
    pub heading: String,
    pub columns: ColumnSchema,
    pub default_sort: SortState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDefinition {
    pub entry: CatalogEntry,
    /// Provider whose single object feeds `Metric::Provided` cards
    pub summary_endpoint: Option<String>,
    pub cards: Vec<StatCard>,
    pub breakdowns: Vec<BreakdownSpec>,
    pub list: ListSpec,
    pub csv_mode: CsvMode,
}

impl ReportDefinition {
    pub fn builder(slug: &str, title: &str) -> ReportBuilder {
        ReportBuilder::new(slug, title)
    }

    pub fn slug(&self) -> &str {
        &self.entry.slug
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }

    /// Provider calls in dataset order: summary, breakdowns, list
    pub fn requests(&self) -> Vec<ProviderRequest> {
        let summary = self.summary_endpoint.iter().map(|endpoint| ProviderRequest {
            endpoint: endpoint.clone(),
            shape: ProviderShape::Single,
        });
        let lists = self
            .breakdowns
            .iter()
            .map(|b| b.endpoint.clone())
            .chain(std::iter::once(self.list.endpoint.clone()))
            .map(|endpoint| ProviderRequest {
                endpoint,
                shape: ProviderShape::List,
            });
        summary.chain(lists).collect()
    }

    /// Dataset index of breakdown `i`
    pub fn breakdown_index(&self, i: usize) -> usize {
        usize::from(self.summary_endpoint.is_some()) + i
    }

    /// Dataset index of the main list
    pub fn list_index(&self) -> usize {
        self.breakdown_index(self.breakdowns.len())
    }
}

pub struct ReportBuilder {
    entry: CatalogEntry,
    summary_endpoint: Option<String>,
    cards: Vec<StatCard>,
    breakdowns: Vec<BreakdownSpec>,
    list: Option<(String, String, ColumnSchema)>,
    default_sort: Option<(String, bool)>,
    csv_mode: CsvMode,
}

impl ReportBuilder {
    fn new(slug: &str, title: &str) -> Self {
        Self {
            entry: CatalogEntry {
                slug: slug.to_string(),
                title: title.to_string(),
                description: String::new(),
                accent: "#6b7280".to_string(),
            },
            summary_endpoint: None,
            cards: Vec::new(),
            breakdowns: Vec::new(),
            list: None,
            default_sort: None,
            csv_mode: CsvMode::Legacy,
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.entry.description = text.to_string();
        self
    }

    pub fn accent(mut self, colour: &str) -> Self {
        self.entry.accent = colour.to_string();
        self
    }

    pub fn summary_provider(mut self, endpoint: &str) -> Self {
        self.summary_endpoint = Some(endpoint.to_string());
        self
    }

    pub fn card(mut self, card: StatCard) -> Self {
        self.cards.push(card);
        self
    }

    pub fn breakdown(mut self, tab_label: &str, endpoint: &str, columns: ColumnSchema) -> Self {
        self.breakdowns.push(BreakdownSpec {
            tab_label: tab_label.to_string(),
            endpoint: endpoint.to_string(),
            columns,
            export_as: None,
        });
        self
    }

    /// Gives the breakdown added last an Export CSV button of its own
    pub fn breakdown_export(mut self, file_stem: &str) -> Self {
        if let Some(last) = self.breakdowns.last_mut() {
            last.export_as = Some(file_stem.to_string());
        }
        self
    }

    pub fn list(mut self, endpoint: &str, heading: &str, columns: ColumnSchema) -> Self {
        self.list = Some((endpoint.to_string(), heading.to_string(), columns));
        self
    }

    pub fn default_sort(mut self, key: &str, ascending: bool) -> Self {
        self.default_sort = Some((key.to_string(), ascending));
        self
    }

    pub fn csv_mode(mut self, mode: CsvMode) -> Self {
        self.csv_mode = mode;
        self
    }

    /// Fails when the list is missing or the default sort key is not one of its columns
    pub fn build(self) -> Result<ReportDefinition, ReportViewError> {
        let slug = self.entry.slug.clone();
        let (endpoint, heading, columns) = self
            .list
            .ok_or_else(|| ReportViewError::MissingList(slug.clone()))?;

        let (key, ascending) = match self.default_sort {
            Some(sort) => sort,
            None => {
                let first = columns
                    .iter()
                    .find(|c| c.sortable)
                    .ok_or_else(|| ReportViewError::MissingList(slug.clone()))?;
                (first.key.clone(), false)
            }
        };
        let default_sort = SortState::for_schema(&slug, &columns, &key, ascending)?;

        Ok(ReportDefinition {
            entry: self.entry,
            summary_endpoint: self.summary_endpoint,
            cards: self.cards,
            breakdowns: self.breakdowns,
            list: ListSpec {
                endpoint,
                heading,
                columns,
                default_sort,
            },
            csv_mode: self.csv_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::report_view::ColumnDescriptor;

    fn columns() -> ColumnSchema {
        ColumnSchema::new(vec![
            ColumnDescriptor::text("Brand", "Brand"),
            ColumnDescriptor::number("SKUCount", "SKUs"),
        ])
    }

    #[test]
    fn test_requests_follow_dataset_order() {
        let def = ReportDefinition::builder("dead-stock", "Dead Stock")
            .summary_provider("/api/dead-stock/summary")
            .breakdown("By Brand", "/api/dead-stock/by-brand", columns())
            .list("/api/dead-stock/list", "Items", columns())
            .default_sort("SKUCount", false)
            .build()
            .unwrap();

        let endpoints: Vec<_> = def.requests().into_iter().map(|r| (r.endpoint, r.shape)).collect();
        assert_eq!(
            endpoints,
            vec![
                ("/api/dead-stock/summary".to_string(), ProviderShape::Single),
                ("/api/dead-stock/by-brand".to_string(), ProviderShape::List),
                ("/api/dead-stock/list".to_string(), ProviderShape::List),
            ]
        );
        assert_eq!(def.breakdown_index(0), 1);
        assert_eq!(def.list_index(), 2);
    }

    #[test]
    fn test_build_rejects_unknown_default_sort() {
        let err = ReportDefinition::builder("brand-stock", "Brand Stock")
            .list("/api/brand-stock", "Brands", columns())
            .default_sort("SKU_Count", false)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ReportViewError::UnknownColumn {
                report: "brand-stock".into(),
                key: "SKU_Count".into()
            }
        );
    }

    #[test]
    fn test_build_requires_list() {
        let err = ReportDefinition::builder("empty", "Empty").build().unwrap_err();
        assert_eq!(err, ReportViewError::MissingList("empty".into()));
    }

    #[test]
    fn test_breakdown_export_marks_only_the_last_breakdown() {
        let def = ReportDefinition::builder("vml-fitment", "VML Fitment")
            .breakdown_export("ignored")
            .breakdown("Fitment", "/api/vml-fitment/fitment-missing-vml", columns())
            .breakdown("Incomplete", "/api/vml-fitment/vml-incomplete", columns())
            .breakdown_export("vml-incomplete")
            .list("/api/vml-fitment/products-no-fitref", "Items", columns())
            .build()
            .unwrap();

        let stems: Vec<_> = def.breakdowns.iter().map(|b| b.export_as.as_deref()).collect();
        assert_eq!(stems, vec![None, Some("vml-incomplete")]);
    }
}
