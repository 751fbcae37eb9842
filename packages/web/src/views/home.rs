use dioxus::prelude::*;
use ui::{About, ContactForm, Hero, NewsletterForm, Projects, Skills, StatsStrip};

#[component]
pub fn Home() -> Element {
    rsx! {
        document::Title { "Portfolio" }
        Hero {}
        StatsStrip {}
        About {}
        Skills {}
        Projects {}
        ContactForm {}
        NewsletterForm {}
    }
}
