use dioxus::prelude::*;
use ui::BlogList;

#[component]
pub fn Blog() -> Element {
    rsx! {
        document::Title { "Blog" }
        section {
            class: "section",
            h1 { "Writing" }
            BlogList {}
        }
    }
}
