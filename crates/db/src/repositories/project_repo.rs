//! Repository for the `projects` collection.

use folio_core::models::project::sort_by_year_desc;
use folio_core::models::Project;
use folio_core::seed::initial_projects;
use folio_core::types::DocId;
use futures::future::join_all;
use serde::Serialize;

use crate::store::{Document, DocumentStore, StoreError, PROJECTS_COLLECTION};

/// Where a project listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSource {
    /// Read from the store and sorted by year.
    Store,
    /// The store answered with an empty collection.
    SeedEmpty,
    /// The store could not be read.
    SeedFallback,
}

#[derive(Debug, Clone)]
pub struct ProjectListing {
    pub projects: Vec<Project>,
    pub source: ProjectSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFailure {
    pub id: DocId,
    pub error: String,
}

/// Per-record outcome of a bulk save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub saved: Vec<DocId>,
    pub failed: Vec<SaveFailure>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Flatten into `(id, result)` pairs for the admin reducer.
    pub fn into_outcomes(self) -> Vec<(DocId, Result<(), String>)> {
        self.saved
            .into_iter()
            .map(|id| (id, Ok(())))
            .chain(self.failed.into_iter().map(|f| (f.id, Err(f.error))))
            .collect()
    }
}

/// Provides read/write operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Read the whole collection.
    ///
    /// An empty collection or any store error yields the seed list
    /// (unsorted); otherwise projects are sorted newest year first, ties in
    /// store order. Fields of the wrong type are read as their defaults and a
    /// document that is not an object at all becomes an empty project under
    /// its key, so stored data is never mistaken for an empty collection.
    pub async fn list(store: &dyn DocumentStore) -> ProjectListing {
        let documents = match store.list(PROJECTS_COLLECTION).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching projects, serving seed data");
                return ProjectListing {
                    projects: initial_projects(),
                    source: ProjectSource::SeedFallback,
                };
            }
        };

        let mut projects: Vec<Project> = documents.into_iter().map(decode).collect();
        if projects.is_empty() {
            return ProjectListing {
                projects: initial_projects(),
                source: ProjectSource::SeedEmpty,
            };
        }

        sort_by_year_desc(&mut projects);
        ProjectListing {
            projects,
            source: ProjectSource::Store,
        }
    }

    /// Same as [`ProjectRepo::list`] without telling the cases apart.
    pub async fn list_projects(store: &dyn DocumentStore) -> Vec<Project> {
        Self::list(store).await.projects
    }

    /// Find a project in the listing the gallery shows (seed data included).
    pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Option<Project> {
        Self::list_projects(store)
            .await
            .into_iter()
            .find(|p| p.id == id)
    }

    /// Upsert one project under its own id.
    pub async fn save(store: &dyn DocumentStore, project: &Project) -> Result<(), StoreError> {
        let data = serde_json::to_value(project)?;
        store.set(PROJECTS_COLLECTION, &project.id, data).await
    }

    /// Upsert every project concurrently and report each outcome.
    ///
    /// There is no transaction: records that succeeded stay written when
    /// others fail.
    pub async fn save_all(store: &dyn DocumentStore, projects: &[Project]) -> SaveReport {
        let results = join_all(projects.iter().map(|p| Self::save(store, p))).await;

        let mut report = SaveReport::default();
        for (project, result) in projects.iter().zip(results) {
            match result {
                Ok(()) => report.saved.push(project.id.clone()),
                Err(e) => {
                    tracing::error!(project_id = %project.id, error = %e, "Error saving project");
                    report.failed.push(SaveFailure {
                        id: project.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            "Bulk project save finished"
        );
        report
    }

    /// Delete one project. Deleting a missing id succeeds.
    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store
            .delete(PROJECTS_COLLECTION, id)
            .await
            .inspect_err(|e| tracing::error!(project_id = %id, error = %e, "Error deleting project"))
    }
}

/// Read a stored document as a project, filling a missing id from the key.
fn decode(document: Document) -> Project {
    let mut project = serde_json::from_value::<Project>(document.data).unwrap_or_else(|e| {
        tracing::warn!(doc_id = %document.id, error = %e, "Unreadable project document, using defaults");
        Project::default()
    });
    if project.id.is_empty() {
        project.id = document.id;
    }
    project
}
