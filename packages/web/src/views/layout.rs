use dioxus::prelude::*;
use ui::{Footer, Navbar};

use crate::Route;

/// Navbar, routed page, footer.
#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Home" }
            a { href: "/#projects", "Projects" }
            Link { to: Route::Blog {}, "Blog" }
            Link { to: Route::Resume {}, "Resume help" }
            a { href: "/#contact", "Contact" }
        }
        main {
            Outlet::<Route> {}
        }
        Footer {}
    }
}
