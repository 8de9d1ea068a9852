//! Admin panel state and its reducer.
//!
//! All admin state lives in one [`AdminState`] value. The only way to change
//! it is [`reduce`], a pure function of the current state and an
//! [`AdminAction`].
//!
//! Writes are two-phase. `CommitDraft`, `DeleteRequested` and
//! `ProfileEdited` apply the change locally and mark the record
//! [`SyncStatus::Pending`], remembering what it looked like before. The
//! matching `*Settled` action then either confirms the change or rolls the
//! record back to that snapshot and marks it [`SyncStatus::Failed`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Profile, Project, SubProject};
use crate::types::DocId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    #[default]
    Projects,
    Profile,
}

/// Remote state of one locally changed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    Pending,
    Confirmed,
    Failed { error: String },
}

/// What to restore if a pending change is rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rollback {
    /// The record replaced this earlier version.
    Replaced(Project),
    /// The record did not exist before.
    Inserted,
    /// The record was removed from `index`.
    Deleted { index: usize, project: Project },
}

/// A single field edit on the project draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Title(String),
    Client(String),
    Year(String),
    Category(String),
    Thumbnail(String),
    Description(String),
    /// Raw comma-separated tag input.
    Tags(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubProjectField {
    Title,
    VideoUrl,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Initial data arrived from the data-access layer.
    Loaded {
        projects: Vec<Project>,
        profile: Profile,
    },
    SelectTab(AdminTab),
    /// Start a draft from the new-project template.
    CreateProject { id: DocId, year: i32 },
    /// Start a draft copied from an existing project.
    EditProject(DocId),
    EditDraft(DraftEdit),
    AddSubProject { id: DocId },
    UpdateSubProject {
        id: DocId,
        field: SubProjectField,
        value: String,
    },
    RemoveSubProject(DocId),
    /// A description was requested from the text generator.
    DescriptionRequested,
    /// The generator answered (possibly with fallback text).
    SetDescription(String),
    CancelEdit,
    /// Apply the draft to the list: replace in place, or prepend if new.
    CommitDraft,
    /// Per-record results of a save. `Err` carries the failure message.
    SaveSettled {
        outcomes: Vec<(DocId, Result<(), String>)>,
    },
    DeleteRequested(DocId),
    DeleteSettled {
        id: DocId,
        result: Result<(), String>,
    },
    ProfileEdited(Profile),
    ProfileSaveSettled(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    pub tab: AdminTab,
    pub loading: bool,
    pub projects: Vec<Project>,
    pub profile: Option<Profile>,
    /// Project being edited, not yet part of `projects`.
    pub editing: Option<Project>,
    pub generating: bool,
    pub sync: BTreeMap<DocId, SyncStatus>,
    pub profile_sync: Option<SyncStatus>,
    rollbacks: BTreeMap<DocId, Rollback>,
    profile_rollback: Option<Profile>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            tab: AdminTab::default(),
            loading: true,
            projects: Vec::new(),
            profile: None,
            editing: None,
            generating: false,
            sync: BTreeMap::new(),
            profile_sync: None,
            rollbacks: BTreeMap::new(),
            profile_rollback: None,
        }
    }
}

impl AdminState {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn status(&self, id: &str) -> Option<&SyncStatus> {
        self.sync.get(id)
    }

    /// Ids whose remote write has not settled yet.
    pub fn pending_ids(&self) -> Vec<DocId> {
        self.sync
            .iter()
            .filter(|(_, s)| **s == SyncStatus::Pending)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    fn edit_draft(&mut self, f: impl FnOnce(&mut Project)) {
        if let Some(draft) = self.editing.as_mut() {
            f(draft);
        }
    }

    fn commit_draft(&mut self) {
        let Some(draft) = self.editing.take() else {
            return;
        };
        let id = draft.id.clone();
        let rollback = match self.position(&id) {
            Some(index) => Rollback::Replaced(std::mem::replace(&mut self.projects[index], draft)),
            None => {
                self.projects.insert(0, draft);
                Rollback::Inserted
            }
        };
        // Keep the oldest snapshot so a failure restores the last confirmed state.
        self.rollbacks.entry(id.clone()).or_insert(rollback);
        self.sync.insert(id, SyncStatus::Pending);
    }

    fn settle_save(&mut self, id: DocId, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.rollbacks.remove(&id);
                self.sync.insert(id, SyncStatus::Confirmed);
            }
            Err(error) => {
                match self.rollbacks.remove(&id) {
                    Some(Rollback::Replaced(previous)) => {
                        if let Some(index) = self.position(&id) {
                            self.projects[index] = previous;
                        }
                    }
                    Some(Rollback::Inserted) => self.projects.retain(|p| p.id != id),
                    Some(Rollback::Deleted { .. }) | None => {}
                }
                self.sync.insert(id, SyncStatus::Failed { error });
            }
        }
    }

    fn request_delete(&mut self, id: DocId) {
        let Some(index) = self.position(&id) else {
            return;
        };
        let project = self.projects.remove(index);
        self.rollbacks
            .insert(id.clone(), Rollback::Deleted { index, project });
        self.sync.insert(id, SyncStatus::Pending);
    }

    fn settle_delete(&mut self, id: DocId, result: Result<(), String>) {
        let rollback = self.rollbacks.remove(&id);
        match result {
            Ok(()) => {
                self.sync.remove(&id);
            }
            Err(error) => {
                if let Some(Rollback::Deleted { index, project }) = rollback {
                    let index = index.min(self.projects.len());
                    self.projects.insert(index, project);
                    self.sync.insert(id, SyncStatus::Failed { error });
                } else {
                    self.sync.remove(&id);
                }
            }
        }
    }
}

/// Split raw tag input on commas, trimming each tag and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply one action to the admin state.
pub fn reduce(mut state: AdminState, action: AdminAction) -> AdminState {
    match action {
        AdminAction::Loaded { projects, profile } => {
            state.projects = projects;
            state.profile = Some(profile);
            state.loading = false;
            state.sync.clear();
            state.rollbacks.clear();
            state.profile_sync = None;
            state.profile_rollback = None;
        }
        AdminAction::SelectTab(tab) => state.tab = tab,
        AdminAction::CreateProject { id, year } => {
            state.editing = Some(Project::template(id, year));
        }
        AdminAction::EditProject(id) => {
            if let Some(project) = state.project(&id).cloned() {
                state.editing = Some(project);
            }
        }
        AdminAction::EditDraft(edit) => state.edit_draft(|draft| match edit {
            DraftEdit::Title(v) => draft.title = v,
            DraftEdit::Client(v) => draft.client = v,
            DraftEdit::Year(v) => draft.year = v,
            DraftEdit::Category(v) => draft.category = v,
            DraftEdit::Thumbnail(v) => draft.thumbnail = v,
            DraftEdit::Description(v) => draft.description = v,
            DraftEdit::Tags(raw) => draft.tags = parse_tags(&raw),
        }),
        AdminAction::AddSubProject { id } => {
            state.edit_draft(|draft| draft.sub_projects.push(SubProject::template(id)));
        }
        AdminAction::UpdateSubProject { id, field, value } => state.edit_draft(|draft| {
            if let Some(sub) = draft.sub_projects.iter_mut().find(|s| s.id == id) {
                match field {
                    SubProjectField::Title => sub.title = value,
                    SubProjectField::VideoUrl => sub.video_url = value,
                    SubProjectField::Description => {
                        sub.description = (!value.is_empty()).then_some(value);
                    }
                }
            }
        }),
        AdminAction::RemoveSubProject(id) => {
            state.edit_draft(|draft| draft.sub_projects.retain(|s| s.id != id));
        }
        AdminAction::DescriptionRequested => {
            if state.editing.as_ref().is_some_and(|d| !d.title.trim().is_empty()) {
                state.generating = true;
            }
        }
        AdminAction::SetDescription(text) => {
            state.generating = false;
            state.edit_draft(|draft| draft.description = text);
        }
        AdminAction::CancelEdit => {
            state.editing = None;
            state.generating = false;
        }
        AdminAction::CommitDraft => state.commit_draft(),
        AdminAction::SaveSettled { outcomes } => {
            for (id, result) in outcomes {
                state.settle_save(id, result);
            }
        }
        AdminAction::DeleteRequested(id) => state.request_delete(id),
        AdminAction::DeleteSettled { id, result } => state.settle_delete(id, result),
        AdminAction::ProfileEdited(profile) => {
            let previous = state.profile.replace(profile);
            if state.profile_rollback.is_none() {
                state.profile_rollback = previous;
            }
            state.profile_sync = Some(SyncStatus::Pending);
        }
        AdminAction::ProfileSaveSettled(result) => match result {
            Ok(()) => {
                state.profile_rollback = None;
                state.profile_sync = Some(SyncStatus::Confirmed);
            }
            Err(error) => {
                if let Some(previous) = state.profile_rollback.take() {
                    state.profile = Some(previous);
                }
                state.profile_sync = Some(SyncStatus::Failed { error });
            }
        },
    }
    state
}
