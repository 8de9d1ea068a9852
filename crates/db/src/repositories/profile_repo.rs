//! Repository for the profile singleton (`settings/user_profile`).

use folio_core::models::Profile;
use folio_core::seed::initial_profile;

use crate::store::{DocumentStore, StoreError, PROFILE_DOC_ID, SETTINGS_COLLECTION};

pub struct ProfileRepo;

impl ProfileRepo {
    /// Stored profile merged over the seed profile.
    ///
    /// A missing document, a read error or an unreadable document all
    /// yield the seed profile.
    pub async fn get(store: &dyn DocumentStore) -> Profile {
        let seed = initial_profile();
        let document = match store.get(SETTINGS_COLLECTION, PROFILE_DOC_ID).await {
            Ok(Some(doc)) => doc,
            Ok(None) => return seed,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching profile, serving seed data");
                return seed;
            }
        };

        match Profile::merge_document(&seed, document) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Stored profile is unreadable, serving seed data");
                seed
            }
        }
    }

    /// Overwrite the stored profile.
    pub async fn save(store: &dyn DocumentStore, profile: &Profile) -> Result<(), StoreError> {
        let data = serde_json::to_value(profile)?;
        store
            .set(SETTINGS_COLLECTION, PROFILE_DOC_ID, data)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error saving profile"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryDocumentStore;

    #[tokio::test]
    async fn missing_document_returns_seed() {
        let store = MemoryDocumentStore::new();
        assert_eq!(ProfileRepo::get(&store).await, initial_profile());
    }

    #[tokio::test]
    async fn partial_document_is_backfilled() {
        let store = MemoryDocumentStore::new();
        store
            .set(SETTINGS_COLLECTION, PROFILE_DOC_ID, json!({ "name": "Lê Văn C" }))
            .await
            .unwrap();

        let profile = ProfileRepo::get(&store).await;
        let seed = initial_profile();
        assert_eq!(profile.name, "Lê Văn C");
        assert_eq!(profile.role, seed.role);
        assert_eq!(profile.socials, seed.socials);
    }

    #[tokio::test]
    async fn read_error_returns_seed() {
        let store = MemoryDocumentStore::new();
        store.fail_reads(true).await;
        assert_eq!(ProfileRepo::get(&store).await, initial_profile());
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = MemoryDocumentStore::new();
        let mut profile = initial_profile();
        profile.bio = "Editor based in Hà Nội.".into();
        profile.hero_video_url = Some(String::new());

        ProfileRepo::save(&store, &profile).await.unwrap();
        let loaded = ProfileRepo::get(&store).await;
        assert_eq!(loaded, profile);
    }
}
