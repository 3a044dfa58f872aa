//! Clickable header cell of a sortable report column
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Stock"
//!     sort_field="Stock"
//!     align=Align::Right
//!     indicator=Signal::derive(move || view.with(|v| v.indicator("Stock")))
//!     on_sort=Callback::new(move |key: String| view.update(|v| v.on_header_click(&key)))
//! />
//! ```

use contracts::shared::report_view::{Align, SortIndicator};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Row key the column sorts by
    #[prop(into)]
    sort_field: String,

    #[prop(into)]
    indicator: Signal<SortIndicator>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    #[prop(optional, default = Align::Left)]
    align: Align,
) -> impl IntoView {
    let handle_click = move |_| on_sort.run(sort_field.clone());

    let header_style = match align {
        Align::Right => "cursor: pointer; justify-content: flex-end; padding-right: 12px;",
        Align::Left => "cursor: pointer; padding-right: 12px;",
    };

    let indicator_class = move || match indicator.get() {
        SortIndicator::Neutral => "table__sort-indicator",
        SortIndicator::Ascending | SortIndicator::Descending => {
            "table__sort-indicator table__sort-indicator--active"
        }
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width>
            <div class="table__sortable-header" style=header_style on:click=handle_click>
                {label}
                <span class=indicator_class>
                    {move || format!(" {}", indicator.get().symbol())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
