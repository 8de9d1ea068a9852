//! Record shapes stored in the document store and served over the API.
//!
//! Field names serialize in camelCase because that is how the stored
//! documents spell them (`subProjects`, `videoUrl`, `heroVideoUrl`).

pub mod profile;
pub mod project;

pub use profile::{Profile, Socials};
pub use project::{Project, SubProject};
