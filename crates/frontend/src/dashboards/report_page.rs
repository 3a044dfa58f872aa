//! Generic report page.
//!
//! Every report in the catalog is rendered by [`ReportPage`] from its
//! definition: stat cards, optional breakdown tabs and the sortable,
//! exportable main list. All page state lives in one
//! [`TabularReportView`] signal owned by the mounted page.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, Utc};
use contracts::reports::{catalog, ReportDefinition};
use contracts::shared::report_view::{BatchOutcome, FetchBatch, TabularReportView};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::{Button, ButtonAppearance, Tab, TabList};

use crate::shared::api_utils::fetch_payload;
use crate::shared::components::table::ReportTable;
use crate::shared::components::{BreakdownTable, PageHeader, StatCard};
use crate::shared::export::download_csv;

/// `/reports/:slug`
#[component]
pub fn ReportRoute() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.read().get("slug").unwrap_or_default();

    move || match catalog::find(&slug()) {
        Ok(definition) => view! { <ReportPage definition=definition /> }.into_any(),
        Err(e) => {
            log::warn!("{}", e);
            view! {
                <div class="page page__empty">
                    <p>"Unknown report"</p>
                    <A href="/">"Back to reports"</A>
                </div>
            }
            .into_any()
        }
    }
}

/// Fire every provider of the page at once and join the responses.
///
/// The first failure settles the batch; a result for a refresh that has
/// since been superseded is dropped by the view.
fn refresh(view: RwSignal<TabularReportView>) {
    let Some((ticket, requests)) = view.try_update(|v| (v.begin_refresh(), v.requests())) else {
        return;
    };

    if requests.is_empty() {
        view.update(|v| {
            v.finish(ticket, BatchOutcome::Complete(Vec::new()), Utc::now());
        });
        return;
    }

    let batch = Rc::new(RefCell::new(FetchBatch::new(requests.len())));
    for (index, request) in requests.into_iter().enumerate() {
        let batch = Rc::clone(&batch);
        spawn_local(async move {
            let result = fetch_payload(&request.endpoint, request.shape).await;
            if let Err(e) = &result {
                log::error!("Provider {} failed: {}", request.endpoint, e);
            }

            let settled = batch.borrow_mut().settle(index, result);
            let Some(outcome) = settled else {
                return;
            };
            match view.try_update(|v| v.finish(ticket, outcome, Utc::now())) {
                Some(true) => {}
                Some(false) => log::debug!("Dropped result of a superseded refresh"),
                None => log::debug!("Report page unmounted before data arrived"),
            }
        });
    }
}

fn export(view: RwSignal<TabularReportView>, breakdown: Option<usize>) {
    let now = Utc::now();
    let artifact = view.with_untracked(|v| match breakdown {
        Some(i) => v.export_breakdown_csv(i, now),
        None => v.export_csv(now),
    });
    match artifact {
        Ok(Some(artifact)) => {
            if let Err(e) = download_csv(&artifact) {
                log::error!("CSV download failed: {}", e);
            }
        }
        Ok(None) => {}
        Err(e) => log::error!("CSV export failed: {}", e),
    }
}

#[component]
pub fn ReportPage(definition: ReportDefinition) -> impl IntoView {
    let view = RwSignal::new(TabularReportView::new(definition.clone()));
    refresh(view);

    let is_loading = Signal::derive(move || view.with(|v| v.is_loading()));
    let export_disabled = Signal::derive(move || !view.with(|v| v.can_export()));

    let last_updated = move || {
        view.with(|v| v.state().last_updated()).map(|at| {
            let local = at.with_timezone(&Local);
            view! {
                <span class="report-page__updated">
                    {format!("Last updated {}", local.format("%H:%M:%S"))}
                </span>
            }
        })
    };

    let error_banner = move || {
        view.with(|v| v.state().error().map(str::to_string)).map(|message| {
            view! { <div class="report-page__error">{message}</div> }
        })
    };

    let cards = definition
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let value = Signal::derive(move || {
                view.with(|v| v.stat_values().get(i).cloned().unwrap_or_else(|| "—".to_string()))
            });
            view! { <StatCard label=card.label.clone() value=value accent=card.accent.clone() /> }
        })
        .collect_view();

    let breakdowns = (!definition.breakdowns.is_empty()).then(|| {
        let selected_tab = RwSignal::new("0".to_string());
        Effect::new(move |_| {
            if let Ok(i) = selected_tab.get().parse::<usize>() {
                view.update(|v| v.select_breakdown(i));
            }
        });

        let tabs = definition
            .breakdowns
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let label = b.tab_label.clone();
                view! { <Tab value=i.to_string()>{label}</Tab> }
            })
            .collect_view();

        let specs = definition.breakdowns.clone();
        let active_table = move || {
            let i = view.with(|v| v.active_breakdown());
            specs.get(i).map(|spec| {
                let rows = Signal::derive(move || view.with(|v| v.breakdown_rows(i).to_vec()));
                let export_button = spec.export_as.is_some().then(|| {
                    let disabled = Signal::derive(move || !view.with(|v| v.can_export_breakdown(i)));
                    view! {
                        <div class="report-page__breakdown-actions">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| export(view, Some(i))
                                disabled=disabled
                            >
                                "Export CSV"
                            </Button>
                        </div>
                    }
                });
                view! {
                    {export_button}
                    <BreakdownTable columns=spec.columns.clone() rows=rows />
                }
            })
        };

        view! {
            <section class="report-page__breakdowns">
                <TabList selected_value=selected_tab>{tabs}</TabList>
                <div class="tab-content">{active_table}</div>
            </section>
        }
    });

    let sorted_rows = Signal::derive(move || view.with(|v| v.sorted_rows()));
    let indicator = Callback::new(move |key: String| view.with(|v| v.indicator(&key)));
    let on_sort = Callback::new(move |key: String| view.update(|v| v.on_header_click(&key)));

    view! {
        <div class="page report-page" data-report=definition.slug().to_string()>
            <PageHeader
                title=definition.title().to_string()
                subtitle=definition.entry.description.clone()
                accent=definition.entry.accent.clone()
            >
                {last_updated}
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| refresh(view)
                    disabled=is_loading
                >
                    "Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| export(view, None)
                    disabled=export_disabled
                >
                    "Export CSV"
                </Button>
                <A href="/">"All reports"</A>
            </PageHeader>

            {error_banner}
            <Show when=move || is_loading.get()>
                <div class="report-page__loading">"Loading..."</div>
            </Show>

            <div class="report-page__cards">{cards}</div>
            {breakdowns}

            <section class="report-page__list">
                <h2 class="report-page__heading">{definition.list.heading.clone()}</h2>
                <ReportTable
                    columns=definition.list.columns.clone()
                    rows=sorted_rows
                    indicator=indicator
                    on_sort=on_sort
                />
            </section>
        </div>
    }
}
