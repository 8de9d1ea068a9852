//! Two-phase admin writes against a document store.
//!
//! Each operation applies the change through [`folio_core::admin::reduce`]
//! first, performs the remote write, then feeds the outcome back so the
//! state either confirms the change or rolls it back.

use folio_core::admin::{reduce, AdminAction, AdminState};
use folio_core::models::Profile;
use folio_core::types::DocId;

use crate::repositories::{ProfileRepo, ProjectRepo};
use crate::store::DocumentStore;

pub struct SyncEngine<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SyncEngine<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Fresh admin state populated from the data-access layer.
    pub async fn load(&self) -> AdminState {
        let projects = ProjectRepo::list_projects(self.store).await;
        let profile = ProfileRepo::get(self.store).await;
        reduce(
            AdminState::default(),
            AdminAction::Loaded { projects, profile },
        )
    }

    /// Commit the current draft and persist the full project list.
    pub async fn commit_draft(&self, state: AdminState) -> AdminState {
        if state.editing.is_none() {
            return state;
        }
        let state = reduce(state, AdminAction::CommitDraft);
        let report = ProjectRepo::save_all(self.store, &state.projects).await;
        reduce(
            state,
            AdminAction::SaveSettled {
                outcomes: report.into_outcomes(),
            },
        )
    }

    /// Remove a project locally, delete it remotely, restore it on failure.
    pub async fn delete_project(&self, state: AdminState, id: DocId) -> AdminState {
        let state = reduce(state, AdminAction::DeleteRequested(id.clone()));
        let result = ProjectRepo::delete(self.store, &id)
            .await
            .map_err(|e| e.to_string());
        reduce(state, AdminAction::DeleteSettled { id, result })
    }

    pub async fn save_profile(&self, state: AdminState, profile: Profile) -> AdminState {
        let state = reduce(state, AdminAction::ProfileEdited(profile.clone()));
        let result = ProfileRepo::save(self.store, &profile)
            .await
            .map_err(|e| e.to_string());
        reduce(state, AdminAction::ProfileSaveSettled(result))
    }
}
