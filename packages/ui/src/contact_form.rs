//! Contact form. Runs the shared validation rules in the browser before submitting;
//! the server checks again.

use api::validation::{validate_contact, FieldError};
use dioxus::prelude::*;

use crate::icons::FaPaperPlane;
use crate::Icon;

fn error_for(errors: &[FieldError], field: &str) -> Option<String> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.clone())
}

#[component]
pub fn ContactForm() -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut subject = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut budget = use_signal(String::new);
    let mut timeline = use_signal(String::new);

    let mut errors = use_signal(Vec::<FieldError>::new);
    let mut failure = use_signal(|| Option::<String>::None);
    let mut sent = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            failure.set(None);

            let form = api::ContactForm {
                name: name(),
                email: email(),
                subject: subject(),
                message: message(),
                budget: Some(budget()),
                timeline: Some(timeline()),
            };
            if let Err(field_errors) = validate_contact(&form) {
                errors.set(field_errors);
                return;
            }
            errors.set(Vec::new());

            loading.set(true);
            match api::send_contact(form).await {
                Ok(receipt) => {
                    tracing::info!("Contact submitted: {}", receipt.id);
                    sent.set(true);
                }
                Err(e) => failure.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    if sent() {
        return rsx! {
            section {
                id: "contact",
                class: "section",
                h2 { "Contact" }
                p { class: "success", "Thanks! Your message is on its way; I usually reply within two days." }
            }
        };
    }

    let field_errors = errors();

    rsx! {
        section {
            id: "contact",
            class: "section",
            h2 { "Contact" }
            form {
                class: "form",
                onsubmit: handle_submit,

                if let Some(err) = failure() {
                    div { class: "alert", "{err}" }
                }

                label { "Name"
                    input {
                        r#type: "text",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                if let Some(msg) = error_for(&field_errors, "name") {
                    span { class: "field-error", "{msg}" }
                }

                label { "Email"
                    input {
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                if let Some(msg) = error_for(&field_errors, "email") {
                    span { class: "field-error", "{msg}" }
                }

                label { "Subject"
                    input {
                        r#type: "text",
                        value: subject(),
                        oninput: move |evt: FormEvent| subject.set(evt.value()),
                    }
                }
                if let Some(msg) = error_for(&field_errors, "subject") {
                    span { class: "field-error", "{msg}" }
                }

                label { "Message"
                    textarea {
                        rows: 6,
                        value: message(),
                        oninput: move |evt: FormEvent| message.set(evt.value()),
                    }
                }
                if let Some(msg) = error_for(&field_errors, "message") {
                    span { class: "field-error", "{msg}" }
                }

                div {
                    class: "form__row",
                    label { "Budget (optional)"
                        input {
                            r#type: "text",
                            value: budget(),
                            oninput: move |evt: FormEvent| budget.set(evt.value()),
                        }
                    }
                    label { "Timeline (optional)"
                        input {
                            r#type: "text",
                            value: timeline(),
                            oninput: move |evt: FormEvent| timeline.set(evt.value()),
                        }
                    }
                }

                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: loading(),
                    Icon { icon: FaPaperPlane, width: 14, height: 14 }
                    if loading() { " Sending..." } else { " Send message" }
                }
            }
        }
    }
}
