use leptos::prelude::*;

#[derive(Debug, Clone)]
pub struct MenuLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone)]
pub struct MenuSection {
    /// Id of the submenu panel; the trigger references it via
    /// `data-submenu`, the controller wires the pair at install time.
    pub id: &'static str,
    pub label: &'static str,
    pub links: Vec<MenuLink>,
}

#[component]
pub fn MegaMenuSection(section: MenuSection) -> impl IntoView {
    view! {
        <div class="mega-menu__section">
            <button
                class="mega-menu__trigger"
                data-submenu=section.id
                aria-expanded="false"
            >
                <span>{section.label}</span>
                <span class="mega-menu__chevron" aria-hidden="true">"▾"</span>
            </button>
            <div id=section.id class="submenu">
                {section.links.into_iter().map(|link| {
                    view! {
                        <a class="submenu__link" href=link.href>{link.label}</a>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn MegaMenu() -> impl IntoView {
    let products = MenuSection {
        id: "submenu-products",
        label: "Products",
        links: vec![
            MenuLink { label: "Catalog", href: "/catalog" },
            MenuLink { label: "New arrivals", href: "/catalog/new" },
            MenuLink { label: "Best sellers", href: "/catalog/best" },
        ],
    };
    let services = MenuSection {
        id: "submenu-services",
        label: "Services",
        links: vec![
            MenuLink { label: "Delivery", href: "/services/delivery" },
            MenuLink { label: "Installation", href: "/services/installation" },
            MenuLink { label: "Support", href: "/services/support" },
        ],
    };
    let company = MenuSection {
        id: "submenu-company",
        label: "Company",
        links: vec![
            MenuLink { label: "About us", href: "/about" },
            MenuLink { label: "Contact", href: "/contact" },
        ],
    };

    view! {
        <nav id="megaMenu" class="mega-menu" aria-label="Main menu">
            <MegaMenuSection section=products />
            <MegaMenuSection section=services />
            <MegaMenuSection section=company />
        </nav>
    }
}
