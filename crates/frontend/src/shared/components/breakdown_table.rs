use contracts::shared::report_view::{ColumnSchema, Row};
use leptos::prelude::*;
use thaw::{Table, TableBody, TableHeader, TableHeaderCell, TableRow};

use super::table::report_table::render_row;

/// Aggregate table under a breakdown tab. Rows keep provider order.
#[component]
pub fn BreakdownTable(
    columns: ColumnSchema,
    #[prop(into)]
    rows: Signal<Vec<Row>>,
) -> impl IntoView {
    let headers = columns
        .table_columns()
        .map(|col| {
            let label = col.label.clone();
            view! { <TableHeaderCell>{label}</TableHeaderCell> }
        })
        .collect_view();

    view! {
        <Table class="breakdown-table">
            <TableHeader>
                <TableRow>{headers}</TableRow>
            </TableHeader>
            <TableBody>
                {move || {
                    rows.get()
                        .iter()
                        .map(|row| render_row(&columns, row))
                        .collect_view()
                }}
            </TableBody>
        </Table>
    }
}
