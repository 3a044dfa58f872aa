use leptos::prelude::*;

/// Summary figure above a report table
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Already formatted value ("—" while unknown)
    #[prop(into)]
    value: Signal<String>,
    /// Text colour of the value
    #[prop(optional_no_strip, into)]
    accent: Option<String>,
) -> impl IntoView {
    let value_style = accent.map(|c| format!("color: {};", c));

    view! {
        <div class="stat-card">
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value" style=value_style>{move || value.get()}</div>
            </div>
        </div>
    }
}
