use crate::layout::header::SiteHeader;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <SiteHeader />
        <main class="page-content">
            <section class="hero">
                <h1>"Welcome"</h1>
                <p>"Scroll to see the header compact itself; resize below 768 px for the burger menu."</p>
            </section>
            <section class="gallery">
                <img loading="lazy" data-src="/static/img/showcase-1.jpg" alt="Showcase" />
                <img loading="lazy" data-src="/static/img/showcase-2.jpg" alt="Showcase" />
            </section>
        </main>
    }
}
