//! Repository Integration Tests
//!
//! Tests for the repositories with an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{Category, DomainError, Item, UserRecord};
    use crate::repository::{init_db, CategoryRepository, ItemRepository, Repository, UserRepository};
    use std::path::PathBuf;

    struct Repos {
        categories: CategoryRepository,
        items: ItemRepository,
        users: UserRepository,
    }

    async fn setup_test_db() -> Repos {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        Repos {
            categories: CategoryRepository::new(db_state.conn.clone()),
            items: ItemRepository::new(db_state.conn.clone()),
            users: UserRepository::new(db_state.conn.clone()),
        }
    }

    async fn add_category(repos: &Repos, name: &str) -> Category {
        let category = Category::new(name.to_string(), format!("/images/{}.png", name.to_lowercase()));
        repos.categories.create(&category).await.expect("Failed to create category")
    }

    async fn add_item(repos: &Repos, category: &Category, name: &str) -> Item {
        let item = Item::new(category.id.clone(), name.to_string(), "/images/item.png".to_string(), "20 years".to_string());
        repos.items.create(&item).await.expect("Failed to create item")
    }

    #[tokio::test]
    async fn test_categories_listed_by_name() {
        let repos = setup_test_db().await;
        add_category(&repos, "Plastic").await;
        add_category(&repos, "glass").await;
        add_category(&repos, "Organic").await;

        let names: Vec<String> = repos.categories.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["glass", "Organic", "Plastic"]);
    }

    #[tokio::test]
    async fn test_update_category() {
        let repos = setup_test_db().await;
        let mut category = add_category(&repos, "Plastc").await;

        category.name = "Plastic".to_string();
        repos.categories.update(&category).await.expect("Update failed");

        let found = repos.categories.find_by_id(category.id.clone()).await.unwrap().unwrap();
        assert_eq!(found.name, "Plastic");
    }

    #[tokio::test]
    async fn test_items_filtered_by_category() {
        let repos = setup_test_db().await;
        let plastic = add_category(&repos, "Plastic").await;
        let glass = add_category(&repos, "Glass").await;
        add_item(&repos, &plastic, "Straw").await;
        add_item(&repos, &plastic, "Bottle").await;
        add_item(&repos, &glass, "Jar").await;

        let items = repos.items.list_by_category(&plastic.id).await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bottle", "Straw"]);
        assert!(items.iter().all(|i| i.category_id == plastic.id));
    }

    #[tokio::test]
    async fn test_item_requires_existing_category() {
        let repos = setup_test_db().await;
        let item = Item::new("missing".to_string(), "Can".to_string(), "/c.png".to_string(), "200 years".to_string());

        let err = repos.items.create(&item).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_item_details_persist_in_order() {
        let repos = setup_test_db().await;
        let plastic = add_category(&repos, "Plastic").await;
        let item = Item::new(plastic.id.clone(), "Bag".to_string(), "/bag.png".to_string(), "20 years".to_string())
            .with_details(
                vec!["Chokes wildlife".to_string(), "Clogs drains".to_string()],
                vec!["Saves oil".to_string()],
            );
        repos.items.create(&item).await.unwrap();

        let found = repos.items.find_by_id(item.id.clone()).await.unwrap().unwrap();
        assert_eq!(found.results, Some(vec!["Chokes wildlife".to_string(), "Clogs drains".to_string()]));
        assert_eq!(found.benefits, Some(vec!["Saves oil".to_string()]));
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_items() {
        let repos = setup_test_db().await;
        let plastic = add_category(&repos, "Plastic").await;
        add_item(&repos, &plastic, "Bottle").await;

        repos.categories.delete(plastic.id.clone()).await.expect("Delete failed");

        assert!(repos.categories.find_by_id(plastic.id.clone()).await.unwrap().is_none());
        assert!(repos.items.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let repos = setup_test_db().await;
        let err = repos.items.delete("nope".to_string()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_user_record_starts_at_zero() {
        let repos = setup_test_db().await;
        let record = UserRecord::new("ada".to_string(), "Ada".to_string(), String::new());
        repos.users.create(&record).await.unwrap();

        let found = repos.users.find_by_id("ada".to_string()).await.unwrap().unwrap();
        assert_eq!(found.score, 0);
        assert!(repos.users.find_by_id("bob".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_score() {
        let repos = setup_test_db().await;
        repos.users.create(&UserRecord::new("ada".to_string(), "Ada".to_string(), String::new())).await.unwrap();

        repos.users.update_score("ada", 7).await.unwrap();
        assert_eq!(repos.users.find_by_id("ada".to_string()).await.unwrap().unwrap().score, 7);

        let err = repos.users.update_score("bob", 1).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_leaderboard_positive_sorted_and_capped() {
        let repos = setup_test_db().await;
        for n in 0..13u64 {
            let uid = format!("user-{}", n);
            repos.users.create(&UserRecord::new(uid.clone(), uid.clone(), String::new())).await.unwrap();
            repos.users.update_score(&uid, n).await.unwrap();
        }

        let top = repos.users.top_scores(50).await.unwrap();
        assert_eq!(top.len(), 10);
        assert!(top.iter().all(|r| r.score > 0));
        assert!(top.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(top[0].score, 12);
    }

    #[tokio::test]
    async fn test_leaderboard_empty_when_nobody_scored() {
        let repos = setup_test_db().await;
        repos.users.create(&UserRecord::new("ada".to_string(), "Ada".to_string(), String::new())).await.unwrap();
        assert!(repos.users.top_scores(10).await.unwrap().is_empty());
    }
}
