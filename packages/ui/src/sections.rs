//! Landing-page sections.

use dioxus::prelude::*;

use crate::icons::{FaArrowRight, FaCode};
use crate::profile::{PROFILE, SKILLS};
use crate::Icon;

#[component]
pub fn Hero() -> Element {
    rsx! {
        section {
            id: "hero",
            class: "hero",
            p { class: "hero__role", "{PROFILE.role}" }
            h1 { class: "hero__name", "{PROFILE.name}" }
            p { class: "hero__tagline", "{PROFILE.tagline}" }
            div {
                class: "hero__actions",
                a { class: "btn btn--primary", href: "#projects", "See my work" }
                a {
                    class: "btn",
                    href: "#contact",
                    "Get in touch "
                    Icon { icon: FaArrowRight, width: 12, height: 12 }
                }
            }
        }
    }
}

#[component]
pub fn About() -> Element {
    rsx! {
        section {
            id: "about",
            class: "section",
            h2 { "About" }
            for paragraph in PROFILE.about.iter() {
                p { "{paragraph}" }
            }
        }
    }
}

#[component]
pub fn Skills() -> Element {
    rsx! {
        section {
            id: "skills",
            class: "section",
            h2 { "Skills" }
            div {
                class: "skills",
                for group in SKILLS.iter() {
                    div {
                        key: "{group.title}",
                        class: "card",
                        h3 { "{group.title}" }
                        ul {
                            class: "tags",
                            for skill in group.skills.iter() {
                                li { class: "tag", "{skill}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Projects from the database, featured first.
#[component]
pub fn Projects() -> Element {
    let projects = use_resource(move || api::list_projects());

    let body = match &*projects.read() {
        None => rsx! { p { class: "muted", "Loading projects..." } },
        Some(Err(e)) => {
            tracing::error!("Failed to load projects: {}", e);
            rsx! { p { class: "error", "Projects are unavailable right now." } }
        }
        Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "Nothing here yet." } },
        Some(Ok(list)) => rsx! {
            div {
                class: "projects",
                for project in list.iter().cloned() {
                    article {
                        key: "{project.id}",
                        class: if project.featured { "card card--featured" } else { "card" },
                        h3 {
                            Icon { icon: FaCode, width: 14, height: 14 }
                            " {project.title}"
                        }
                        p { "{project.description}" }
                        ul {
                            class: "tags",
                            for tech in project.tech_stack.iter() {
                                li { class: "tag", "{tech}" }
                            }
                        }
                        div {
                            class: "card__links",
                            if let Some(url) = project.repo_url.clone() {
                                a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "Source" }
                            }
                            if let Some(url) = project.live_url.clone() {
                                a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "Live" }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        section {
            id: "projects",
            class: "section",
            h2 { "Projects" }
            {body}
        }
    }
}

/// Subscriber, contact, project and post counts from the cached stats endpoint.
#[component]
pub fn StatsStrip() -> Element {
    let stats = use_resource(move || api::site_stats());

    let view = match &*stats.read() {
        Some(Ok(response)) => {
            let stats = &response.stats;
            rsx! {
                div {
                    class: "stats",
                    div { class: "stats__item", strong { "{stats.projects}" } span { "projects" } }
                    div { class: "stats__item", strong { "{stats.posts}" } span { "articles" } }
                    div { class: "stats__item", strong { "{stats.subscribers.active}" } span { "subscribers" } }
                    div { class: "stats__item", strong { "{stats.contacts.total}" } span { "conversations" } }
                }
            }
        }
        Some(Err(e)) => {
            tracing::warn!("Stats unavailable: {}", e);
            rsx! {}
        }
        None => rsx! {},
    };
    view
}
