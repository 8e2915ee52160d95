//! Tauri Commands for the Catalog
//!
//! Reads are public. Writes need an admin identity.

use tauri::State;
use crate::domain::{Category, DomainError, Item};
use crate::repository::Repository;
use crate::AppState;

/// List all categories, sorted by name
#[tauri::command]
pub async fn list_categories(state: State<'_, AppState>) -> Result<Vec<Category>, String> {
    state.category_repo.list().await.map_err(|e| e.to_string())
}

/// List the items of one category
#[tauri::command]
pub async fn list_items(state: State<'_, AppState>, category_id: String) -> Result<Vec<Item>, String> {
    state.item_repo.list_by_category(&category_id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_category(
    state: State<'_, AppState>,
    name: String,
    image: String,
) -> Result<Category, String> {
    let admin = state.require_admin().await.map_err(|e| e.to_string())?;
    let category = Category::new(name.trim().to_string(), image);
    let created = state.category_repo.create(&category).await.map_err(|e| e.to_string())?;
    log::info!("{} created category {}", admin.uid, created.id);
    Ok(created)
}

#[tauri::command]
pub async fn update_category(
    state: State<'_, AppState>,
    id: String,
    name: Option<String>,
    image: Option<String>,
) -> Result<Category, String> {
    state.require_admin().await.map_err(|e| e.to_string())?;

    let mut category = state.category_repo.find_by_id(id.clone()).await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("category {}", id)).to_string())?;
    let old_image = category.image.clone();

    if let Some(name) = name {
        category.name = name.trim().to_string();
    }
    if let Some(image) = image {
        category.image = image;
    }

    let updated = state.category_repo.update(&category).await.map_err(|e| e.to_string())?;
    if old_image != updated.image {
        state.release_images(vec![old_image]).await.map_err(|e| e.to_string())?;
    }
    Ok(updated)
}

/// Delete a category together with its items and their images
#[tauri::command]
pub async fn delete_category(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let admin = state.require_admin().await.map_err(|e| e.to_string())?;

    let category = state.category_repo.find_by_id(id.clone()).await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("category {}", id)).to_string())?;
    let items = state.item_repo.list_by_category(&id).await.map_err(|e| e.to_string())?;

    let mut images: Vec<String> = items.into_iter().map(|item| item.image).collect();
    images.push(category.image);

    state.category_repo.delete(id.clone()).await.map_err(|e| e.to_string())?;
    log::info!("{} deleted category {}", admin.uid, id);
    state.release_images(images).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_item(
    state: State<'_, AppState>,
    category_id: String,
    name: String,
    image: String,
    decompose_time: String,
    results: Vec<String>,
    benefits: Vec<String>,
) -> Result<Item, String> {
    let admin = state.require_admin().await.map_err(|e| e.to_string())?;

    let item = Item::new(category_id, name.trim().to_string(), image, decompose_time)
        .with_details(results, benefits);
    let created = state.item_repo.create(&item).await.map_err(|e| e.to_string())?;
    log::info!("{} created item {} in {}", admin.uid, created.id, created.category_id);
    Ok(created)
}

#[tauri::command]
pub async fn update_item(
    state: State<'_, AppState>,
    id: String,
    category_id: Option<String>,
    name: Option<String>,
    image: Option<String>,
    decompose_time: Option<String>,
    results: Option<Vec<String>>,
    benefits: Option<Vec<String>>,
) -> Result<Item, String> {
    state.require_admin().await.map_err(|e| e.to_string())?;

    let existing = state.item_repo.find_by_id(id.clone()).await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("item {}", id)).to_string())?;
    let old_image = existing.image.clone();

    let mut item = Item {
        category_id: category_id.unwrap_or(existing.category_id),
        name: name.map(|n| n.trim().to_string()).unwrap_or(existing.name),
        image: image.unwrap_or(existing.image),
        decompose_time: decompose_time.unwrap_or(existing.decompose_time),
        ..existing
    };
    if results.is_some() || benefits.is_some() {
        let results = results.or(item.results.take()).unwrap_or_default();
        let benefits = benefits.or(item.benefits.take()).unwrap_or_default();
        item = item.with_details(results, benefits);
    }

    let updated = state.item_repo.update(&item).await.map_err(|e| e.to_string())?;
    if old_image != updated.image {
        state.release_images(vec![old_image]).await.map_err(|e| e.to_string())?;
    }
    Ok(updated)
}

#[tauri::command]
pub async fn delete_item(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let admin = state.require_admin().await.map_err(|e| e.to_string())?;

    let item = state.item_repo.find_by_id(id.clone()).await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| DomainError::NotFound(format!("item {}", id)).to_string())?;

    state.item_repo.delete(id.clone()).await.map_err(|e| e.to_string())?;
    log::info!("{} deleted item {}", admin.uid, id);
    state.release_images(vec![item.image]).await.map_err(|e| e.to_string())
}
