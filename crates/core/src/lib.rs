//! Domain types and pure logic for the portfolio CMS.
//!
//! Nothing in this crate performs I/O: records, seed data, identifier
//! generation, video-link handling, the credential gate state machine and
//! the admin state reducer are all plain values and functions.

pub mod admin;
pub mod error;
pub mod gate;
pub mod ids;
pub mod models;
pub mod seed;
pub mod types;
pub mod validation;
pub mod video;
