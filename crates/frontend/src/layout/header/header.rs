use crate::bootstrap;
use crate::layout::header::mega_menu::MegaMenu;
use leptos::prelude::*;

/// The site header: logo, burger toggle and the mega-menu.
///
/// The controller binds to the ids below, so it is installed from an
/// effect that runs once the markup is in the DOM, and disposed when the
/// component unmounts.
#[component]
pub fn SiteHeader() -> impl IntoView {
    Effect::new(move |_| {
        bootstrap::init();
    });
    on_cleanup(bootstrap::dispose);

    view! {
        <header id="siteHeader" class="header">
            <a class="header__logo" href="/" aria-label="Home">
                <img src="/static/img/logo.svg" alt="" aria-hidden="true" />
                <span class="header__title">"Brand"</span>
            </a>
            <button id="burgerMenu" class="header__burger" aria-label="Menu">
                <span class="header__burger-line"></span>
                <span class="header__burger-line"></span>
                <span class="header__burger-line"></span>
            </button>
            <MegaMenu />
        </header>
    }
}
