use api::validation::{is_valid_email, normalize_email};
use dioxus::prelude::*;

use crate::icons::FaEnvelope;
use crate::profile::NEWSLETTER_TOPICS;
use crate::Icon;

/// Browser-side email check, applied to the address as the server will store it.
fn accepts_email(raw: &str) -> bool {
    is_valid_email(&normalize_email(raw))
}

/// Newsletter signup with optional name and topic checkboxes.
#[component]
pub fn NewsletterForm() -> Element {
    let mut email = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut interests = use_signal(Vec::<String>::new);
    let mut notice = use_signal(|| Option::<(bool, String)>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            if !accepts_email(&email()) {
                notice.set(Some((false, "Invalid email address".to_string())));
                return;
            }

            loading.set(true);
            let form = api::SubscribeForm {
                email: email(),
                name: Some(name()),
                interests: Some(interests()),
            };
            match api::subscribe_newsletter(form).await {
                Ok(receipt) => {
                    notice.set(Some((true, receipt.message)));
                    email.set(String::new());
                }
                Err(e) => notice.set(Some((false, e.to_string()))),
            }
            loading.set(false);
        });
    };

    rsx! {
        section {
            id: "newsletter",
            class: "section newsletter",
            h2 {
                Icon { icon: FaEnvelope, width: 18, height: 18 }
                " Newsletter"
            }
            p { class: "muted", "A short monthly note on what I'm building and reading." }

            form {
                class: "form",
                onsubmit: handle_submit,

                if let Some((ok, text)) = notice() {
                    div { class: if ok { "success" } else { "alert" }, "{text}" }
                }

                div {
                    class: "form__row",
                    input {
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    input {
                        r#type: "text",
                        placeholder: "Name (optional)",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }

                div {
                    class: "topics",
                    for topic in NEWSLETTER_TOPICS.iter().copied() {
                        label {
                            key: "{topic}",
                            input {
                                r#type: "checkbox",
                                checked: interests().iter().any(|i| i == topic),
                                onchange: move |_| {
                                    let mut selected = interests.write();
                                    if let Some(pos) = selected.iter().position(|i| i == topic) {
                                        selected.remove(pos);
                                    } else {
                                        selected.push(topic.to_string());
                                    }
                                },
                            }
                            " {topic}"
                        }
                    }
                }

                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Subscribing..." } else { "Subscribe" }
                }
            }
        }
    }
}
