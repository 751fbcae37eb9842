use dioxus::prelude::*;

use crate::icons::{FaGithub, FaLinkedin};
use crate::profile::PROFILE;
use crate::{Icon, UI_CSS};

/// Top bar. Route links are passed in as children so this crate stays router-agnostic.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: UI_CSS }
        nav {
            class: "navbar",
            span { class: "navbar__brand", "{PROFILE.name}" }
            div { class: "navbar__links", {children} }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: "footer",
            span { "© {PROFILE.name}" }
            div {
                class: "footer__social",
                a {
                    href: PROFILE.github_url,
                    target: "_blank",
                    rel: "noopener noreferrer",
                    title: "GitHub",
                    Icon { icon: FaGithub, width: 18, height: 18 }
                }
                a {
                    href: PROFILE.linkedin_url,
                    target: "_blank",
                    rel: "noopener noreferrer",
                    title: "LinkedIn",
                    Icon { icon: FaLinkedin, width: 18, height: 18 }
                }
            }
        }
    }
}
