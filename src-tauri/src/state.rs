//! Application State
//!
//! Shared across commands: repositories over one SQLite connection, the
//! loaded configuration, the image store and the signed-in identity.

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::domain::{DomainError, DomainResult, Identity};
use crate::images::ImageStore;
use crate::repository::{CategoryRepository, DbState, ItemRepository, Repository, UserRepository};

pub struct AppState {
    pub db_state: DbState,
    pub category_repo: CategoryRepository,
    pub item_repo: ItemRepository,
    pub user_repo: UserRepository,
    pub config: AppConfig,
    pub images: ImageStore,
    session: Mutex<Option<Identity>>,
}

impl AppState {
    pub fn new(db_state: DbState, config: AppConfig, images: ImageStore) -> Self {
        Self {
            category_repo: CategoryRepository::new(db_state.conn.clone()),
            item_repo: ItemRepository::new(db_state.conn.clone()),
            user_repo: UserRepository::new(db_state.conn.clone()),
            db_state,
            config,
            images,
            session: Mutex::new(None),
        }
    }

    pub async fn current_user(&self) -> Option<Identity> {
        self.session.lock().await.clone()
    }

    pub async fn set_current_user(&self, identity: Option<Identity>) {
        *self.session.lock().await = identity;
    }

    /// The signed-in identity, if it is on the admin allow-list
    pub async fn require_admin(&self) -> DomainResult<Identity> {
        match self.current_user().await {
            Some(identity) if self.config.is_admin(&identity.uid) => Ok(identity),
            Some(identity) => {
                log::warn!("Rejected catalog edit from {}", identity.uid);
                Err(DomainError::Forbidden("catalog edits need an admin account".to_string()))
            }
            None => Err(DomainError::Forbidden("sign in to edit the catalog".to_string())),
        }
    }

    /// Score records may only be touched by their owner
    pub async fn require_user(&self, uid: &str) -> DomainResult<Identity> {
        match self.current_user().await {
            Some(identity) if identity.uid == uid => Ok(identity),
            _ => Err(DomainError::Forbidden(format!("not signed in as {}", uid))),
        }
    }

    /// Remove stored images no category or item refers to any more
    pub async fn release_images(&self, images: Vec<String>) -> DomainResult<()> {
        if images.is_empty() {
            return Ok(());
        }

        let categories = self.category_repo.list().await?;
        let items = self.item_repo.list().await?;
        for image in images {
            let in_use = categories.iter().any(|c| c.image == image) || items.iter().any(|i| i.image == image);
            if in_use {
                continue;
            }
            if let Err(e) = self.images.remove(&image) {
                log::warn!("Failed to remove image {}: {}", image, e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Item};
    use crate::repository::init_db;
    use std::path::Path;

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    async fn setup(admins: Vec<String>) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let db_state = init_db(Path::new(":memory:")).await.unwrap();
        let images = ImageStore::open(dir.path().join("images")).unwrap();
        let config = AppConfig { admin_uids: admins, ..AppConfig::default() };
        (dir, AppState::new(db_state, config, images))
    }

    #[tokio::test]
    async fn test_admin_guard() {
        let admin = Identity::sign_in("Ada", None, &[Identity::uid_for("Ada")]).unwrap();
        let (_dir, state) = setup(vec![admin.uid.clone()]).await;

        assert!(matches!(state.require_admin().await, Err(DomainError::Forbidden(_))));

        state.set_current_user(Some(Identity::sign_in("Bob", None, &[]).unwrap())).await;
        assert!(matches!(state.require_admin().await, Err(DomainError::Forbidden(_))));

        state.set_current_user(Some(admin.clone())).await;
        assert_eq!(state.require_admin().await.unwrap().uid, admin.uid);
    }

    #[tokio::test]
    async fn test_user_guard() {
        let (_dir, state) = setup(Vec::new()).await;
        let ada = Identity::sign_in("Ada", None, &[]).unwrap();
        state.set_current_user(Some(ada.clone())).await;

        assert!(state.require_user(&ada.uid).await.is_ok());
        assert!(state.require_user("someone-else").await.is_err());

        state.set_current_user(None).await;
        assert!(state.require_user(&ada.uid).await.is_err());
    }

    #[tokio::test]
    async fn test_release_keeps_shared_images() {
        let (_dir, state) = setup(Vec::new()).await;
        let url = state.images.save_data_url(PIXEL).unwrap();

        let plastic = state.category_repo.create(&Category::new("Plastic".to_string(), url.clone())).await.unwrap();
        let item = Item::new(plastic.id.clone(), "Bottle".to_string(), url.clone(), "450 years".to_string());
        state.item_repo.create(&item).await.unwrap();

        state.item_repo.delete(item.id.clone()).await.unwrap();
        state.release_images(vec![url.clone()]).await.unwrap();
        assert!(state.images.resolve(&url).unwrap().exists());

        state.category_repo.delete(plastic.id.clone()).await.unwrap();
        state.release_images(vec![url.clone()]).await.unwrap();
        assert!(!state.images.resolve(&url).unwrap().exists());
    }
}
