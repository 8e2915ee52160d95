//! Catalog Commands
//!
//! Frontend bindings for categories, items and image uploads.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use recycle_core::{Category, Item};
use super::{call, call_unit, call_with};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryIdArgs<'a> {
    category_id: &'a str,
}

#[derive(Serialize)]
pub struct CategoryArgs<'a> {
    pub name: &'a str,
    pub image: &'a str,
}

#[derive(Serialize)]
struct UpdateCategoryArgs<'a> {
    id: &'a str,
    name: Option<&'a str>,
    image: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemArgs<'a> {
    pub category_id: &'a str,
    pub name: &'a str,
    pub image: &'a str,
    pub decompose_time: &'a str,
    pub results: Vec<String>,
    pub benefits: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateItemArgs<'a> {
    id: &'a str,
    category_id: Option<&'a str>,
    name: Option<&'a str>,
    image: Option<&'a str>,
    decompose_time: Option<&'a str>,
    results: Option<Vec<String>>,
    benefits: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ImageArgs<'a> {
    data: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_categories() -> Result<Vec<Category>, String> {
    call("list_categories", JsValue::NULL).await
}

pub async fn list_items(category_id: &str) -> Result<Vec<Item>, String> {
    call_with("list_items", &CategoryIdArgs { category_id }).await
}

pub async fn create_category(args: &CategoryArgs<'_>) -> Result<Category, String> {
    call_with("create_category", args).await
}

pub async fn update_category(id: &str, args: &CategoryArgs<'_>) -> Result<Category, String> {
    let args = UpdateCategoryArgs {
        id,
        name: Some(args.name),
        image: (!args.image.is_empty()).then_some(args.image),
    };
    call_with("update_category", &args).await
}

pub async fn delete_category(id: &str) -> Result<(), String> {
    call_unit("delete_category", &IdArgs { id }).await
}

pub async fn create_item(args: &ItemArgs<'_>) -> Result<Item, String> {
    call_with("create_item", args).await
}

pub async fn update_item(id: &str, args: ItemArgs<'_>) -> Result<Item, String> {
    let args = UpdateItemArgs {
        id,
        category_id: Some(args.category_id),
        name: Some(args.name),
        image: (!args.image.is_empty()).then_some(args.image),
        decompose_time: Some(args.decompose_time),
        results: Some(args.results),
        benefits: Some(args.benefits),
    };
    call_with("update_item", &args).await
}

pub async fn delete_item(id: &str) -> Result<(), String> {
    call_unit("delete_item", &IdArgs { id }).await
}

/// Upload a base64 data URL; returns the URL to reference it by
pub async fn save_image(data: &str) -> Result<String, String> {
    call_with("save_image", &ImageArgs { data }).await
}
