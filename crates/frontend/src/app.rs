use crate::dashboards::home::ReportsHome;
use crate::dashboards::report_page::ReportRoute;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use thaw::{ConfigProvider, Theme};

#[component]
pub fn App() -> impl IntoView {
    let theme = RwSignal::new(Theme::light());

    view! {
        <ConfigProvider theme>
            <Router>
                <main class="app">
                    <Routes fallback=|| view! { <div class="page__empty">"Page not found"</div> }>
                        <Route path=path!("/") view=ReportsHome />
                        <Route path=path!("/reports/:slug") view=ReportRoute />
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
