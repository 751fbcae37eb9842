//! Admin session context, login form and dashboard.

use dioxus::prelude::*;

use crate::icons::{FaLock, FaRightFromBracket};
use crate::Icon;

/// Whether the current browser session is logged in as the site operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminState {
    pub admin: bool,
    pub loading: bool,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            admin: false,
            loading: true,
        }
    }
}

pub fn use_admin() -> Signal<AdminState> {
    use_context::<Signal<AdminState>>()
}

/// Provides [`AdminState`] to its children, checking the session once on mount.
#[component]
pub fn AdminProvider(children: Element) -> Element {
    let mut state = use_signal(AdminState::default);

    let _ = use_resource(move || async move {
        let admin = match api::is_admin().await {
            Ok(admin) => admin,
            Err(e) => {
                tracing::warn!("Admin check failed: {}", e);
                false
            }
        };
        state.set(AdminState {
            admin,
            loading: false,
        });
    });

    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

#[component]
pub fn AdminLogin() -> Element {
    let mut state = use_admin();
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match api::admin_login(password()).await {
                Ok(()) => {
                    password.set(String::new());
                    state.set(AdminState {
                        admin: true,
                        loading: false,
                    });
                }
                Err(_) => error.set(Some("Invalid password".to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        form {
            class: "form form--narrow",
            onsubmit: handle_login,
            h2 {
                Icon { icon: FaLock, width: 16, height: 16 }
                " Admin"
            }
            if let Some(err) = error() {
                div { class: "alert", "{err}" }
            }
            input {
                r#type: "password",
                placeholder: "Password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                class: "btn btn--primary",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}

#[component]
pub fn AdminDashboardPanel() -> Element {
    let dashboard = use_resource(move || api::admin_dashboard());

    let view = match &*dashboard.read() {
        None => rsx! { p { class: "muted", "Loading dashboard..." } },
        Some(Err(e)) => rsx! { div { class: "alert", "Could not load dashboard: {e}" } },
        Some(Ok(data)) => {
            let stats = &data.stats;
            let subscribers = data.subscribers;
            rsx! {
                div {
                    class: "stats",
                    div { class: "stats__item", strong { "{subscribers.active}" } span { "active subscribers" } }
                    div { class: "stats__item", strong { "{subscribers.unsubscribed}" } span { "unsubscribed" } }
                    div { class: "stats__item", strong { "{stats.contacts.unread}" } span { "unread messages" } }
                    div { class: "stats__item", strong { "{stats.contacts.total}" } span { "messages" } }
                }
                p { class: "muted", "Counts as of {stats.generated_at}" }

                h3 { "Recent messages" }
                if data.recent_contacts.is_empty() {
                    p { class: "muted", "No messages yet." }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Received" }
                                th { "From" }
                                th { "Subject" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for contact in data.recent_contacts.iter().cloned() {
                                tr {
                                    key: "{contact.id}",
                                    td { "{contact.created_at}" }
                                    td { {format!("{} <{}>", contact.name, contact.email)} }
                                    td { title: "{contact.message}", "{contact.subject}" }
                                    td { {contact.status.label()} }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    view
}

#[component]
pub fn LogoutButton(#[props(default = "Log out".to_string())] label: String) -> Element {
    let mut state = use_admin();

    let onclick = move |_| async move {
        match api::admin_logout().await {
            Ok(()) => state.set(AdminState {
                admin: false,
                loading: false,
            }),
            Err(e) => tracing::error!("Logout failed: {}", e),
        }
    };

    rsx! {
        button {
            class: "btn",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            " {label}"
        }
    }
}
