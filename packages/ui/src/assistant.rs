//! Resume assistant chat and the one-shot resume analyzer.

use api::validation::MIN_RESUME_CHARS;
use api::ChatMessage;
use dioxus::prelude::*;

use crate::blog::render_markdown;
use crate::icons::FaRobot;
use crate::Icon;

/// Multi-turn chat. The server assigns a session id on the first reply and the
/// transcript is resent in full on every turn.
#[component]
pub fn ResumeAssistant() -> Element {
    let mut messages = use_signal(Vec::<ChatMessage>::new);
    let mut session_id = use_signal(|| Option::<String>::None);
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_send = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft().trim().to_string();
        if text.is_empty() || loading() {
            return;
        }
        spawn(async move {
            error.set(None);
            messages.write().push(ChatMessage::user(text));
            draft.set(String::new());
            loading.set(true);

            match api::ask_assistant(messages(), session_id()).await {
                Ok(reply) => {
                    session_id.set(Some(reply.session_id));
                    messages.write().push(ChatMessage::assistant(reply.reply));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        section {
            class: "section assistant",
            h2 {
                Icon { icon: FaRobot, width: 18, height: 18 }
                " Resume assistant"
            }
            div {
                class: "chat",
                if messages().is_empty() {
                    p { class: "muted", "Ask about my experience, or paste a bullet point from your resume for feedback." }
                }
                for (i, message) in messages().into_iter().enumerate() {
                    div {
                        key: "{i}",
                        class: "chat__message chat__message--{message.role}",
                        if message.role == "assistant" {
                            div { dangerous_inner_html: render_markdown(&message.content) }
                        } else {
                            p { "{message.content}" }
                        }
                    }
                }
                if loading() {
                    div { class: "chat__message chat__message--assistant muted", "Thinking..." }
                }
            }
            if let Some(err) = error() {
                div { class: "alert", "{err}" }
            }
            form {
                class: "chat__input",
                onsubmit: handle_send,
                input {
                    r#type: "text",
                    placeholder: "Type a message",
                    value: draft(),
                    oninput: move |evt: FormEvent| draft.set(evt.value()),
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: loading(),
                    "Send"
                }
            }
        }
    }
}

/// Paste a full resume and get a stored list of suggestions back.
#[component]
pub fn ResumeAnalyzer() -> Element {
    let mut resume = use_signal(String::new);
    let mut result = use_signal(|| Option::<api::ResumeAnalysisInfo>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let chars = resume().trim().chars().count();
    let too_short = chars < MIN_RESUME_CHARS;

    let handle_analyze = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match api::analyze_resume(resume()).await {
                Ok(analysis) => result.set(Some(analysis)),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        section {
            class: "section",
            h2 { "Resume review" }
            form {
                class: "form",
                onsubmit: handle_analyze,
                textarea {
                    rows: 12,
                    placeholder: "Paste your resume here",
                    value: resume(),
                    oninput: move |evt: FormEvent| resume.set(evt.value()),
                }
                span {
                    class: "muted",
                    "{chars} characters"
                    if too_short { " (at least {MIN_RESUME_CHARS} needed)" }
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: loading() || too_short,
                    if loading() { "Analyzing..." } else { "Analyze" }
                }
            }
            if let Some(err) = error() {
                div { class: "alert", "{err}" }
            }
            if let Some(analysis) = result() {
                article {
                    class: "card",
                    h3 { "Suggestions" }
                    div { dangerous_inner_html: render_markdown(&analysis.suggestions.summary) }
                    p { class: "muted", "Reviewed by {analysis.suggestions.provider}" }
                }
            }
        }
    }
}
