use contracts::reports::catalog;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::components::PageHeader;

/// Dashboard landing page: one card per report
#[component]
pub fn ReportsHome() -> impl IntoView {
    let entries = catalog::entries();

    view! {
        <div class="page reports-home">
            <PageHeader title="Stock Reports" subtitle="Inventory health at a glance".to_string()>
                {()}
            </PageHeader>
            <div class="reports-home__grid">
                {entries
                    .into_iter()
                    .map(|entry| {
                        let href = format!("/reports/{}", entry.slug);
                        let style = format!("border-top-color: {};", entry.accent);
                        view! {
                            <A href=href attr:class="report-card" attr:style=style>
                                <div class="report-card__title">{entry.title}</div>
                                <div class="report-card__description">{entry.description}</div>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
