use chrono::{DateTime, Utc};

use super::csv_export::{CsvArtifact, CsvExporter};
use super::error::ReportViewError;
use super::fetch_state::{BatchOutcome, PageState, RefreshTicket};
use super::sort::{sort_rows, SortIndicator, SortState};
use super::value::Row;
use crate::reports::{ProviderRequest, ReportDefinition};

const NO_VALUE: &str = "—";

/// View model of one mounted report page.
///
/// Owns the report definition, the sort state and the fetch state. Sort
/// state survives refreshes; everything else is replaced by each outcome.
#[derive(Debug, Clone)]
pub struct TabularReportView {
    definition: ReportDefinition,
    sort: SortState,
    state: PageState,
    active_breakdown: usize,
}

impl TabularReportView {
    pub fn new(definition: ReportDefinition) -> Self {
        let sort = definition.list.default_sort.clone();
        Self {
            definition,
            sort,
            state: PageState::new(),
            active_breakdown: 0,
        }
    }

    pub fn definition(&self) -> &ReportDefinition {
        &self.definition
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.definition.requests()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.state.begin_refresh()
    }

    pub fn finish(&mut self, ticket: RefreshTicket, outcome: BatchOutcome, now: DateTime<Utc>) -> bool {
        self.state.finish(ticket, outcome, now)
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Raw list rows, in received order
    pub fn list_rows(&self) -> &[Row] {
        self.state
            .dataset(self.definition.list_index())
            .map(|p| p.rows())
            .unwrap_or(&[])
    }

    pub fn sorted_rows(&self) -> Vec<Row> {
        sort_rows(self.list_rows(), &self.sort, &self.definition.list.columns)
    }

    pub fn summary_row(&self) -> Option<&Row> {
        self.definition.summary_endpoint.as_ref()?;
        self.state.dataset(0).and_then(|p| p.single())
    }

    /// Formatted value of every stat card, in definition order. Cards read
    /// `—` until a refresh has succeeded, and again after an error.
    pub fn stat_values(&self) -> Vec<String> {
        if !self.state.has_data() {
            return vec![NO_VALUE.to_string(); self.definition.cards.len()];
        }
        let rows = self.list_rows();
        let provided = self.summary_row();
        self.definition
            .cards
            .iter()
            .map(|card| card.render(rows, provided))
            .collect()
    }

    pub fn breakdown_rows(&self, i: usize) -> &[Row] {
        if i >= self.definition.breakdowns.len() {
            return &[];
        }
        self.state
            .dataset(self.definition.breakdown_index(i))
            .map(|p| p.rows())
            .unwrap_or(&[])
    }

    pub fn active_breakdown(&self) -> usize {
        self.active_breakdown
    }

    pub fn select_breakdown(&mut self, i: usize) {
        if i < self.definition.breakdowns.len() {
            self.active_breakdown = i;
        }
    }

    /// Header click on the main list; unknown or unsortable columns are ignored
    pub fn on_header_click(&mut self, key: &str) {
        let sortable = self
            .definition
            .list
            .columns
            .get(key)
            .is_some_and(|c| c.sortable);
        if sortable {
            self.sort.on_header_click(key);
        }
    }

    pub fn indicator(&self, key: &str) -> SortIndicator {
        self.sort.indicator(key)
    }

    pub fn can_export(&self) -> bool {
        !self.is_loading() && !self.list_rows().is_empty()
    }

    /// CSV of the current sorted projection; `None` when export is disabled.
    /// The filename carries the UTC date of `at`.
    pub fn export_csv(&self, at: DateTime<Utc>) -> Result<Option<CsvArtifact>, ReportViewError> {
        if !self.can_export() {
            return Ok(None);
        }
        let artifact = CsvExporter::new(&self.definition.list.columns)
            .mode(self.definition.csv_mode)
            .export(self.definition.slug(), &self.sorted_rows(), at.date_naive())?;
        Ok(Some(artifact))
    }

    pub fn can_export_breakdown(&self, i: usize) -> bool {
        let exportable = self
            .definition
            .breakdowns
            .get(i)
            .is_some_and(|b| b.export_as.is_some());
        exportable && !self.is_loading() && !self.breakdown_rows(i).is_empty()
    }

    /// CSV of breakdown `i` in provider order, named after its export stem
    pub fn export_breakdown_csv(
        &self,
        i: usize,
        at: DateTime<Utc>,
    ) -> Result<Option<CsvArtifact>, ReportViewError> {
        if !self.can_export_breakdown(i) {
            return Ok(None);
        }
        let Some((spec, stem)) = self
            .definition
            .breakdowns
            .get(i)
            .and_then(|b| b.export_as.as_deref().map(|stem| (b, stem)))
        else {
            return Ok(None);
        };
        let artifact = CsvExporter::new(&spec.columns)
            .mode(self.definition.csv_mode)
            .export(stem, self.breakdown_rows(i), at.date_naive())?;
        Ok(Some(artifact))
    }
}
