pub mod ai;
pub mod auth;
pub mod profile;
pub mod projects;
