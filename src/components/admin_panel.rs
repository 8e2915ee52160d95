//! Admin Panel Component
//!
//! Catalog editing for allow-listed users: categories, items and their images.
//! The backend re-checks the allow-list on every write.

use leptos::prelude::*;
use leptos::task::spawn_local;
use recycle_core::{AppError, NoticeLevel};

use crate::backend::classify;
use crate::commands::{self, CategoryArgs, ItemArgs};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_push_error, store_push_notice, use_app_store};
use crate::upload::{picked_file, read_data_url};

fn lines_of(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    view! {
        <section class="admin-panel">
            <h2>"Manage catalog"</h2>
            <CategoryAdmin />
            <ItemAdmin />
        </section>
    }
}

/// Image URL field with an upload button and a preview
#[component]
fn ImagePicker(image: RwSignal<String>) -> impl IntoView {
    let store = use_app_store();
    let (uploading, set_uploading) = signal(false);

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        set_uploading.set(true);
        spawn_local(async move {
            let uploaded = match read_data_url(file).await {
                Ok(data) => commands::save_image(&data).await.map_err(classify),
                Err(e) => Err(AppError::Invalid(e)),
            };
            match uploaded {
                Ok(url) => image.set(url),
                Err(err) => store_push_error(&store, &err),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="image-picker">
            <input
                type="text"
                placeholder="Image URL"
                prop:value=move || image.get()
                on:input=move |ev| image.set(event_target_value(&ev))
            />
            <input type="file" accept="image/*" on:change=on_file disabled=move || uploading.get() />
            <Show when=move || !image.get().is_empty()>
                <img class="image-preview" src=move || image.get() alt="" />
            </Show>
        </div>
    }
}

#[component]
fn CategoryAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing = RwSignal::new(None::<String>);
    let name = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());

    let reset = move || {
        editing.set(None);
        name.set(String::new());
        image.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (id, new_name, new_image) = (editing.get(), name.get(), image.get());
        if new_name.trim().is_empty() || (id.is_none() && new_image.trim().is_empty()) {
            store_push_notice(&store, NoticeLevel::Info, "A category needs a name and an image");
            return;
        }
        spawn_local(async move {
            let args = CategoryArgs { name: &new_name, image: &new_image };
            let result = match id.as_deref() {
                Some(id) => commands::update_category(id, &args).await,
                None => commands::create_category(&args).await,
            };
            match result {
                Ok(category) => {
                    store_push_notice(&store, NoticeLevel::Success, format!("Saved {}", category.name));
                    reset();
                    ctx.load_categories();
                }
                Err(e) => store_push_error(&store, &classify(e)),
            }
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match commands::delete_category(&id).await {
                Ok(()) => {
                    ctx.catalog.update(|c| c.remove_category(&id));
                    if editing.get_untracked().as_deref() == Some(id.as_str()) {
                        reset();
                    }
                    store_push_notice(&store, NoticeLevel::Success, "Category deleted");
                }
                Err(e) => store_push_error(&store, &classify(e)),
            }
        });
    };

    view! {
        <div class="admin-section">
            <h3>"Categories"</h3>
            <ul class="admin-list">
                <For
                    each=move || ctx.catalog.with(|c| c.categories().to_vec())
                    key=|category| (category.id.clone(), category.name.clone(), category.image.clone())
                    children=move |category| {
                        let id = category.id.clone();
                        let edit_id = category.id.clone();
                        view! {
                            <li class="admin-row">
                                <img class="sidebar-thumb" src=category.image.clone() alt="" />
                                <span>{category.name.clone()}</span>
                                <button class="edit-btn" on:click=move |_| {
                                    let current = ctx.catalog.with_untracked(|c| {
                                        c.categories().iter().find(|cat| cat.id == edit_id).cloned()
                                    });
                                    if let Some(current) = current {
                                        editing.set(Some(current.id));
                                        name.set(current.name);
                                        image.set(current.image);
                                    }
                                }>"Edit"</button>
                                <DeleteConfirmButton
                                    what=category.name.clone()
                                    on_confirm=Callback::new(move |_| delete(id.clone()))
                                />
                            </li>
                        }
                    }
                />
            </ul>

            <form class="admin-form" on:submit=submit>
                <input
                    type="text"
                    placeholder="Category name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <ImagePicker image=image />
                <div class="admin-actions">
                    <button type="submit">
                        {move || if editing.get().is_some() { "Save category" } else { "Add category" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" on:click=move |_| reset()>"Cancel"</button>
                    </Show>
                </div>
            </form>
        </div>
    }
}

#[component]
fn ItemAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let editing = RwSignal::new(None::<String>);
    let name = RwSignal::new(String::new());
    let image = RwSignal::new(String::new());
    let decompose_time = RwSignal::new(String::new());
    let results = RwSignal::new(String::new());
    let benefits = RwSignal::new(String::new());

    let category = move || ctx.catalog.with(|c| c.selected_category_id().map(str::to_string));

    let reset = move || {
        editing.set(None);
        for field in [name, image, decompose_time, results, benefits] {
            field.set(String::new());
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(category_id) = category() else {
            store_push_notice(&store, NoticeLevel::Info, "Pick a category first");
            return;
        };
        let id = editing.get();
        let (new_name, new_image, new_time) = (name.get(), image.get(), decompose_time.get());
        if new_name.trim().is_empty() || new_time.trim().is_empty() || (id.is_none() && new_image.trim().is_empty()) {
            store_push_notice(&store, NoticeLevel::Info, "An item needs a name, an image and a decomposition time");
            return;
        }
        let (new_results, new_benefits) = (lines_of(&results.get()), lines_of(&benefits.get()));

        spawn_local(async move {
            let args = ItemArgs {
                category_id: &category_id,
                name: &new_name,
                image: &new_image,
                decompose_time: &new_time,
                results: new_results,
                benefits: new_benefits,
            };
            let result = match id.as_deref() {
                Some(id) => commands::update_item(id, args).await,
                None => commands::create_item(&args).await,
            };
            match result {
                Ok(item) => {
                    store_push_notice(&store, NoticeLevel::Success, format!("Saved {}", item.name));
                    reset();
                    ctx.reload_items();
                }
                Err(e) => store_push_error(&store, &classify(e)),
            }
        });
    };

    let delete = move |id: String| {
        spawn_local(async move {
            match commands::delete_item(&id).await {
                Ok(()) => {
                    ctx.catalog.update(|c| c.remove_item(&id));
                    if editing.get_untracked().as_deref() == Some(id.as_str()) {
                        reset();
                    }
                    store_push_notice(&store, NoticeLevel::Success, "Item deleted");
                }
                Err(e) => store_push_error(&store, &classify(e)),
            }
        });
    };

    view! {
        <div class="admin-section">
            <h3>"Items"</h3>
            <select
                prop:value=move || category().unwrap_or_default()
                on:change=move |ev| {
                    let id = event_target_value(&ev);
                    reset();
                    ctx.select_category((!id.is_empty()).then_some(id));
                }
            >
                <option value="">"Choose a category"</option>
                {move || ctx.catalog.with(|c| {
                    c.categories()
                        .iter()
                        .map(|category| view! { <option value=category.id.clone()>{category.name.clone()}</option> })
                        .collect_view()
                })}
            </select>

            <ul class="admin-list">
                <For
                    each=move || ctx.catalog.with(|c| c.loaded_items().map(<[_]>::to_vec).unwrap_or_default())
                    key=|item| (item.id.clone(), item.name.clone(), item.image.clone())
                    children=move |item| {
                        let id = item.id.clone();
                        let edit_id = item.id.clone();
                        view! {
                            <li class="admin-row">
                                <img class="sidebar-thumb" src=item.image.clone() alt="" />
                                <span>{item.name.clone()}</span>
                                <button class="edit-btn" on:click=move |_| {
                                    let current = ctx.catalog.with_untracked(|c| {
                                        c.loaded_items()
                                            .and_then(|items| items.iter().find(|i| i.id == edit_id))
                                            .cloned()
                                    });
                                    if let Some(current) = current {
                                        editing.set(Some(current.id));
                                        name.set(current.name);
                                        image.set(current.image);
                                        decompose_time.set(current.decompose_time);
                                        results.set(current.results.unwrap_or_default().join("\n"));
                                        benefits.set(current.benefits.unwrap_or_default().join("\n"));
                                    }
                                }>"Edit"</button>
                                <DeleteConfirmButton
                                    what=item.name.clone()
                                    on_confirm=Callback::new(move |_| delete(id.clone()))
                                />
                            </li>
                        }
                    }
                />
            </ul>

            <Show when=move || category().is_some()>
                <form class="admin-form" on:submit=submit>
                    <input
                        type="text"
                        placeholder="Item name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Decomposition time, e.g. 450 years"
                        prop:value=move || decompose_time.get()
                        on:input=move |ev| decompose_time.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Damage if thrown away, one per line"
                        prop:value=move || results.get()
                        on:input=move |ev| results.set(event_target_value(&ev))
                    ></textarea>
                    <textarea
                        placeholder="Benefits if recycled, one per line"
                        prop:value=move || benefits.get()
                        on:input=move |ev| benefits.set(event_target_value(&ev))
                    ></textarea>
                    <ImagePicker image=image />
                    <div class="admin-actions">
                        <button type="submit">
                            {move || if editing.get().is_some() { "Save item" } else { "Add item" }}
                        </button>
                        <Show when=move || editing.get().is_some()>
                            <button type="button" on:click=move |_| reset()>"Cancel"</button>
                        </Show>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_of_drops_blanks() {
        assert_eq!(lines_of(" Saves oil \n\n  \nLess landfill"), vec!["Saves oil", "Less landfill"]);
        assert!(lines_of("").is_empty());
    }
}
