//! Collaborator traits
//!
//! The remote store, score records and leaderboard are reached through these
//! traits. The frontend implements them over the Tauri bridge; tests use fakes.
//! Futures are `?Send` because everything runs on the single UI thread.

use async_trait::async_trait;
use log::info;

use crate::catalog::ItemsRequest;
use crate::error::AppResult;
use crate::models::{Category, Identity, Item, ScoreEntry, UserProfile};

#[async_trait(?Send)]
pub trait CatalogSource {
    /// All categories, sorted by name ascending
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Items whose `category_id` equals the given id
    async fn list_items(&self, category_id: &str) -> AppResult<Vec<Item>>;
}

#[async_trait(?Send)]
pub trait ScoreStore {
    async fn read_user_record(&self, uid: &str) -> AppResult<Option<UserProfile>>;

    /// Create a record with score 0
    async fn create_user_record(&self, identity: &Identity) -> AppResult<UserProfile>;

    async fn write_score(&self, uid: &str, score: u64) -> AppResult<()>;
}

#[async_trait(?Send)]
pub trait LeaderboardSource {
    /// Highest scores first, positive scores only
    async fn top_scores(&self, limit: u32) -> AppResult<Vec<ScoreEntry>>;
}

/// Load the stored profile for a freshly signed-in identity, creating an
/// empty record when the user has none yet.
pub async fn resolve_profile<S>(store: &S, identity: &Identity) -> AppResult<UserProfile>
where
    S: ScoreStore + ?Sized,
{
    let mut profile = match store.read_user_record(&identity.uid).await? {
        Some(profile) => profile,
        None => {
            info!("no score record for {}, creating one", identity.uid);
            store.create_user_record(identity).await?
        }
    };
    profile.is_admin = identity.is_admin;
    Ok(profile)
}

/// Run the fetch for `request`, handing the token back with the result so the
/// caller can settle it against the catalog.
pub async fn load_items<S>(source: &S, request: ItemsRequest) -> (ItemsRequest, AppResult<Vec<Item>>)
where
    S: CatalogSource + ?Sized,
{
    let result = source.list_items(&request.category_id).await;
    (request, result)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use tokio::sync::oneshot;

    use super::*;
    use crate::catalog::tests::item;
    use crate::catalog::{CatalogState, Settled};
    use crate::error::{AppError, Resource};

    #[derive(Default)]
    struct MemoryScores {
        records: RefCell<HashMap<String, UserProfile>>,
        created: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ScoreStore for MemoryScores {
        async fn read_user_record(&self, uid: &str) -> AppResult<Option<UserProfile>> {
            Ok(self.records.borrow().get(uid).cloned())
        }

        async fn create_user_record(&self, identity: &Identity) -> AppResult<UserProfile> {
            let profile = UserProfile {
                uid: identity.uid.clone(),
                display_name: identity.display_name.clone(),
                avatar: identity.avatar.clone(),
                score: 0,
                is_admin: false,
            };
            self.records.borrow_mut().insert(identity.uid.clone(), profile.clone());
            self.created.borrow_mut().push(identity.uid.clone());
            Ok(profile)
        }

        async fn write_score(&self, uid: &str, score: u64) -> AppResult<()> {
            let mut records = self.records.borrow_mut();
            let record = records
                .get_mut(uid)
                .ok_or_else(|| AppError::NotFound(uid.to_string()))?;
            record.score = score;
            Ok(())
        }
    }

    fn identity(uid: &str) -> Identity {
        Identity {
            uid: uid.to_string(),
            display_name: "Ada".to_string(),
            avatar: "/avatars/ada.png".to_string(),
            is_admin: true,
        }
    }

    #[tokio::test]
    async fn test_resolve_profile_creates_missing_record() {
        let store = MemoryScores::default();
        let profile = resolve_profile(&store, &identity("ada")).await.unwrap();

        assert_eq!(profile.score, 0);
        assert!(profile.is_admin);
        assert_eq!(store.created.borrow().as_slice(), ["ada".to_string()]);
        assert!(store.records.borrow().contains_key("ada"));
    }

    #[tokio::test]
    async fn test_resolve_profile_reads_existing_score() {
        let store = MemoryScores::default();
        store.create_user_record(&identity("ada")).await.unwrap();
        store.write_score("ada", 7).await.unwrap();
        store.created.borrow_mut().clear();

        let profile = resolve_profile(&store, &identity("ada")).await.unwrap();
        assert_eq!(profile.score, 7);
        assert!(store.created.borrow().is_empty());
    }

    /// Item source whose responses are released by the test
    struct GatedSource {
        gates: RefCell<HashMap<String, oneshot::Receiver<Vec<Item>>>>,
    }

    #[async_trait(?Send)]
    impl CatalogSource for GatedSource {
        async fn list_categories(&self) -> AppResult<Vec<Category>> {
            Ok(vec![])
        }

        async fn list_items(&self, category_id: &str) -> AppResult<Vec<Item>> {
            let gate = self
                .gates
                .borrow_mut()
                .remove(category_id)
                .ok_or_else(|| AppError::fetch(Resource::Items, "no gate"))?;
            gate.await.map_err(|e| AppError::fetch(Resource::Items, e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_late_response_for_earlier_selection_is_discarded() {
        let (release_glass, glass_gate) = oneshot::channel();
        let (release_plastic, plastic_gate) = oneshot::channel();
        let source = GatedSource {
            gates: RefCell::new(HashMap::from([
                ("glass".to_string(), glass_gate),
                ("plastic".to_string(), plastic_gate),
            ])),
        };
        let catalog = RefCell::new(CatalogState::new());

        let glass = catalog.borrow_mut().select_category(Some("glass".to_string())).unwrap();
        let plastic = catalog.borrow_mut().select_category(Some("plastic".to_string())).unwrap();

        let fetch_glass = async {
            let (request, result) = load_items(&source, glass).await;
            catalog.borrow_mut().settle_items(&request, result)
        };
        let fetch_plastic = async {
            let (request, result) = load_items(&source, plastic).await;
            catalog.borrow_mut().settle_items(&request, result)
        };
        let release = async {
            let _ = release_plastic.send(vec![item("bottle", "plastic", "Bottle")]);
            tokio::task::yield_now().await;
            let _ = release_glass.send(vec![item("jar", "glass", "Jar"), item("cup", "glass", "Cup")]);
        };

        let (glass_settled, plastic_settled, ()) = tokio::join!(fetch_glass, fetch_plastic, release);

        assert_eq!(glass_settled, Settled::Stale);
        assert_eq!(plastic_settled, Settled::Applied(1));

        let catalog = catalog.borrow();
        let items = catalog.loaded_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category_id, "plastic");
    }
}
