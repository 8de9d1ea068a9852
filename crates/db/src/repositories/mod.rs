//! Typed access to the portfolio collections.
//!
//! Reads never fail: an empty or unreachable store yields seed data.
//! Writes report their outcome so callers can reconcile local state.

pub mod profile_repo;
pub mod project_repo;

pub use profile_repo::ProfileRepo;
pub use project_repo::{ProjectListing, ProjectRepo, ProjectSource, SaveFailure, SaveReport};
