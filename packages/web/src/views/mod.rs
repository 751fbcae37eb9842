mod layout;
pub use layout::SiteLayout;

mod home;
pub use home::Home;

mod blog;
pub use blog::Blog;

mod resume;
pub use resume::Resume;

mod admin;
pub use admin::Admin;
