//! Resume help: the chat assistant plus the one-shot analyzer.

use dioxus::prelude::*;
use ui::{ResumeAnalyzer, ResumeAssistant};

#[component]
pub fn Resume() -> Element {
    rsx! {
        document::Title { "Resume help" }
        ResumeAssistant {}
        ResumeAnalyzer {}
    }
}
