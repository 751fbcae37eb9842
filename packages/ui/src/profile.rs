//! Static copy for the hero, about and skills sections.

pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub tagline: &'static str,
    pub about: &'static [&'static str],
    pub github_url: &'static str,
    pub linkedin_url: &'static str,
}

pub struct SkillGroup {
    pub title: &'static str,
    pub skills: &'static [&'static str],
}

pub const PROFILE: Profile = Profile {
    name: "Alex Morgan",
    role: "Software Engineer",
    tagline: "I build fast, reliable web services and the tools around them.",
    about: &[
        "I have spent the last eight years shipping backend systems and developer tooling, \
         from payment pipelines to internal platforms used by hundreds of engineers.",
        "These days I work mostly in Rust and TypeScript, with a soft spot for databases, \
         streaming and anything that makes a deploy boring.",
    ],
    github_url: "https://github.com/",
    linkedin_url: "https://www.linkedin.com/",
};

pub const SKILLS: &[SkillGroup] = &[
    SkillGroup {
        title: "Languages",
        skills: &["Rust", "TypeScript", "Python", "SQL"],
    },
    SkillGroup {
        title: "Backend",
        skills: &["axum", "PostgreSQL", "Redis", "gRPC", "Kafka"],
    },
    SkillGroup {
        title: "Frontend",
        skills: &["Dioxus", "React", "Tailwind CSS"],
    },
    SkillGroup {
        title: "Operations",
        skills: &["Docker", "Kubernetes", "Terraform", "GitHub Actions"],
    },
];

/// Topics offered on the newsletter form.
pub const NEWSLETTER_TOPICS: &[&str] = &["Rust", "Web development", "AI tooling", "Career"];
