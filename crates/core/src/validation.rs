//! Identifier invariants checked before records are written.
//!
//! Reads never validate; a stored document is accepted as it is.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::models::Project;

/// A project needs a non-empty id and sub-project ids unique within it.
pub fn validate_project(project: &Project) -> Result<(), CoreError> {
    if project.id.trim().is_empty() {
        return Err(CoreError::Validation("Project id must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for sub in &project.sub_projects {
        if !seen.insert(sub.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate sub-project id '{}' in project '{}'",
                sub.id, project.id
            )));
        }
    }
    Ok(())
}

/// Validate every project and require ids to be unique across the list.
pub fn validate_projects(projects: &[Project]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for project in projects {
        validate_project(project)?;
        if !seen.insert(project.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate project id '{}'",
                project.id
            )));
        }
    }
    Ok(())
}
