use contracts::shared::report_view::{Align, ColumnSchema, Row, SortIndicator};
use leptos::prelude::*;
use thaw::{Table, TableBody, TableCell, TableCellLayout, TableHeader, TableHeaderCell, TableRow};

use super::SortableHeaderCell;

/// Report list with sortable headers. Rows arrive already sorted.
#[component]
pub fn ReportTable(
    columns: ColumnSchema,
    #[prop(into)]
    rows: Signal<Vec<Row>>,
    /// Current indicator of a column key
    indicator: Callback<String, SortIndicator>,
    on_sort: Callback<String>,
) -> impl IntoView {
    let header_columns = columns.clone();

    view! {
        <Table class="report-table">
            <TableHeader>
                <TableRow>
                    {header_columns
                        .table_columns()
                        .map(|col| {
                            let label = col.label.clone();
                            if col.sortable {
                                let key = col.key.clone();
                                view! {
                                    <SortableHeaderCell
                                        label=label
                                        sort_field=key.clone()
                                        align=col.align()
                                        indicator=Signal::derive(move || indicator.run(key.clone()))
                                        on_sort=on_sort
                                    />
                                }
                                .into_any()
                            } else {
                                view! { <TableHeaderCell>{label}</TableHeaderCell> }.into_any()
                            }
                        })
                        .collect_view()}
                </TableRow>
            </TableHeader>
            <TableBody>
                {move || {
                    let rows = rows.get();
                    if rows.is_empty() {
                        return view! {
                            <TableRow>
                                <TableCell>
                                    <div class="report-table__empty">"No rows"</div>
                                </TableCell>
                            </TableRow>
                        }
                        .into_any();
                    }
                    rows.iter()
                        .map(|row| render_row(&columns, row))
                        .collect_view()
                        .into_any()
                }}
            </TableBody>
        </Table>
    }
}

/// One body row over the on-screen columns of `columns`
pub fn render_row(columns: &ColumnSchema, row: &Row) -> impl IntoView {
    let cells = columns
        .table_columns()
        .map(|col| {
            let text = col.display_value(row.get(&col.key));
            let class = match col.align() {
                Align::Right => "text-right",
                Align::Left => "",
            };
            view! {
                <TableCell class=class>
                    <TableCellLayout truncate=true>{text}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    view! { <TableRow>{cells}</TableRow> }
}
