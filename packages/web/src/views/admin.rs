use dioxus::prelude::*;
use ui::{use_admin, AdminDashboardPanel, AdminLogin, LogoutButton};

/// Login form until the session is admin, then the dashboard.
#[component]
pub fn Admin() -> Element {
    let state = use_admin();

    if state().loading {
        return rsx! { p { class: "muted", "Loading..." } };
    }

    rsx! {
        document::Title { "Admin" }
        if state().admin {
            section {
                class: "section",
                div {
                    class: "admin__header",
                    h1 { "Dashboard" }
                    LogoutButton {}
                }
                AdminDashboardPanel {}
            }
        } else {
            AdminLogin {}
        }
    }
}
