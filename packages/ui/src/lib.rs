//! Components shared by the portfolio's pages.

use dioxus::prelude::*;

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::{FaGithub, FaLinkedin};
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

pub mod profile;

mod navbar;
pub use navbar::{Footer, Navbar};

mod sections;
pub use sections::{About, Hero, Projects, Skills, StatsStrip};

mod contact_form;
pub use contact_form::ContactForm;

mod newsletter_form;
pub use newsletter_form::NewsletterForm;

mod assistant;
pub use assistant::{ResumeAnalyzer, ResumeAssistant};

mod admin;
pub use admin::{use_admin, AdminDashboardPanel, AdminLogin, AdminProvider, AdminState, LogoutButton};

mod blog;
pub use blog::{render_markdown, BlogList};
