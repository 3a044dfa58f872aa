use leptos::prelude::*;

/// Title bar of a page, with an actions slot on the right
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Accent colour of the title underline
    #[prop(optional, into)]
    accent: Option<String>,

    children: Children,
) -> impl IntoView {
    let style = accent.map(|c| format!("border-bottom-color: {};", c));

    view! {
        <div class="page-header" style=style>
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children()}
            </div>
        </div>
    }
}
