//! RPC method handler for the navpanel JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be tested without stdio.
//! `handle_method` maps each method name onto an `AppStore` operation.

use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::services::icon_upload::{guess_mime_type, IconFile};
use crate::types::group::{GroupDraft, GroupPatch};
use crate::types::search_engine::{SearchEngineDraft, SearchEnginePatch};
use crate::types::settings::PartialSettings;
use crate::types::transfer::DataBundle;
use crate::types::website::{Website, WebsiteDraft};

/// Decode a base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    BASE64
        .decode(input)
        .map_err(|e| format!("base64 decode error: {}", e))
}

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

fn opt_str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn index_param(params: &Value, key: &str) -> Result<usize, String> {
    params
        .get(key)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .ok_or_else(|| format!("missing {}", key))
}

/// Deserializes `params[key]`, or the whole params object when `key` is `None`.
fn typed_param<T: DeserializeOwned>(params: &Value, key: Option<&str>) -> Result<T, String> {
    let value = match key {
        Some(key) => params
            .get(key)
            .cloned()
            .ok_or_else(|| format!("missing {}", key))?,
        None => params.clone(),
    };
    serde_json::from_value(value).map_err(|e| format!("invalid params: {}", e))
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Reads the optional `icon` param: `{"path": ...}` or `{"fileName", "mimeType"?, "data"}`
/// with base64 `data`.
async fn icon_param(params: &Value) -> Result<Option<IconFile>, String> {
    let Some(icon) = params.get("icon").filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    if let Some(path) = opt_str_param(icon, "path") {
        let file = IconFile::from_path(&PathBuf::from(path))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(Some(file));
    }
    let file_name = opt_str_param(icon, "fileName").unwrap_or("icon");
    let mime_type = opt_str_param(icon, "mimeType").unwrap_or_else(|| guess_mime_type(file_name));
    let bytes = base64_decode(str_param(icon, "data")?)?;
    Ok(Some(IconFile::new(file_name, mime_type, bytes)))
}

/// Snapshot of everything a UI renders.
pub fn state_snapshot(app: &App) -> Result<Value, String> {
    let store = &app.store;
    Ok(json!({
        "sites": to_value(&store.sites())?,
        "filteredSites": to_value(&store.filtered_sites())?,
        "groups": to_value(&store.groups())?,
        "groupsWithWebsites": to_value(&store.groups_with_websites())?,
        "settings": to_value(store.settings())?,
        "currentEngineId": store.current_engine_id(),
        "defaultEngineId": store.default_search_engine().map(|e| e.id.clone()),
        "searchQuery": store.search_query(),
        "loading": store.is_loading(),
        "error": store.last_error(),
        "ui": to_value(store.ui())?,
    }))
}

/// Dispatch a JSON-RPC method call to the matching store operation.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    let store = &mut app.store;
    match method {
        // ─── Data ───
        "data.load" => {
            store.load_data().await.map_err(|e| e.to_string())?;
            state_snapshot(app)
        }
        "state.get" => state_snapshot(app),
        "notifications.take" => to_value(&store.take_notifications()),
        "error.clear" => {
            store.clear_error();
            Ok(json!({"ok": true}))
        }
        "data.export" => {
            let dir = opt_str_param(params, "dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| app.config.export_dir());
            let path = app
                .store
                .export_data(&dir)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "data.import" => {
            if let Some(path) = opt_str_param(params, "path") {
                store
                    .import_file(&PathBuf::from(path))
                    .await
                    .map_err(|e| e.to_string())?;
            } else {
                let bundle: DataBundle = typed_param(params, Some("bundle"))?;
                store.import_data(bundle).await.map_err(|e| e.to_string())?;
            }
            Ok(json!({"ok": true}))
        }

        // ─── Websites ───
        "website.add" => {
            let draft: WebsiteDraft = typed_param(params, None)?;
            if draft.name.trim().is_empty() || draft.url.trim().is_empty() {
                return Err("name and url are required".to_string());
            }
            let site = store.add_site(draft).await.map_err(|e| e.to_string())?;
            to_value(&site)
        }
        "website.update" => {
            let site: Website = typed_param(params, None)?;
            let site = store.update_site(site).await.map_err(|e| e.to_string())?;
            to_value(&site)
        }
        "website.delete" => {
            let id = str_param(params, "id")?;
            store.delete_site(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "website.reorder" => {
            let from = index_param(params, "from")?;
            let to = index_param(params, "to")?;
            store
                .reorder_sites(from, to)
                .await
                .map_err(|e| e.to_string())?;
            to_value(&store.sites())
        }
        "website.filter" => {
            store.set_search_query(opt_str_param(params, "query").unwrap_or(""));
            to_value(&store.filtered_sites())
        }

        // ─── Groups ───
        "group.load" => {
            store.load_groups().await.map_err(|e| e.to_string())?;
            to_value(&store.groups_with_websites())
        }
        "group.create" => {
            let draft: GroupDraft = typed_param(params, None)?;
            let group = store.create_group(draft).await.map_err(|e| e.to_string())?;
            to_value(&group)
        }
        "group.update" => {
            let id = str_param(params, "id")?.to_string();
            let patch: GroupPatch = typed_param(params, Some("patch"))?;
            let group = store
                .update_group(&id, patch)
                .await
                .map_err(|e| e.to_string())?;
            to_value(&group)
        }
        "group.delete" => {
            let id = str_param(params, "id")?;
            store.delete_group(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "group.toggleCollapse" => {
            let id = str_param(params, "id")?;
            let collapsed = store.toggle_group_collapse(id).map_err(|e| e.to_string())?;
            Ok(json!({"id": id, "isCollapsed": collapsed}))
        }
        "group.moveWebsite" => {
            let website_id = str_param(params, "websiteId")?;
            let group_id = opt_str_param(params, "groupId");
            let position = params.get("position").and_then(Value::as_i64);
            store
                .move_website_to_group(website_id, group_id, position)
                .await
                .map_err(|e| e.to_string())?;
            to_value(&store.groups_with_websites())
        }
        "group.reorder" => {
            let ids: Vec<String> = typed_param(params, Some("groupIds"))?;
            store.reorder_groups(&ids).await.map_err(|e| e.to_string())?;
            to_value(&store.groups())
        }

        // ─── Search engines ───
        "engine.add" => {
            let draft: SearchEngineDraft = typed_param(params, Some("engine"))?;
            let engine = match icon_param(params).await? {
                Some(icon) => store.add_search_engine_with_icon(draft, Some(icon)).await,
                None => store.add_search_engine(draft).await,
            }
            .map_err(|e| e.to_string())?;
            to_value(&engine)
        }
        "engine.update" => {
            let id = str_param(params, "id")?.to_string();
            let patch: SearchEnginePatch = typed_param(params, Some("patch"))?;
            let engine = match icon_param(params).await? {
                Some(icon) => {
                    store
                        .update_search_engine_with_icon(&id, patch, Some(icon))
                        .await
                }
                None => store.update_search_engine(&id, patch).await,
            }
            .map_err(|e| e.to_string())?;
            to_value(&engine)
        }
        "engine.delete" => {
            let id = str_param(params, "id")?;
            store
                .delete_search_engine(id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "engine.select" => {
            let id = str_param(params, "id")?;
            store.select_search_engine(id).map_err(|e| e.to_string())?;
            Ok(json!({"currentEngineId": id}))
        }
        "engine.setCurrent" => {
            let id = str_param(params, "id")?;
            store
                .set_current_search_engine(id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"currentEngineId": store.current_engine_id()}))
        }

        // ─── Settings ───
        "settings.get" => to_value(store.settings()),
        "settings.update" => {
            let patch: PartialSettings = typed_param(params, None)?;
            store.update_settings(patch).await.map_err(|e| e.to_string())?;
            to_value(store.settings())
        }
        "settings.reset" => {
            store.reset_settings().await.map_err(|e| e.to_string())?;
            to_value(store.settings())
        }

        // ─── Search ───
        "search.perform" => {
            let query = str_param(params, "query")?;
            let url = store.perform_search(query, opt_str_param(params, "engineId"));
            Ok(json!({"url": url}))
        }

        // ─── UI flags ───
        "ui.openAddCard" => {
            store.open_add_card_modal();
            to_value(store.ui())
        }
        "ui.openEditCard" => {
            let id = str_param(params, "id")?;
            let site = store
                .site(id)
                .cloned()
                .ok_or_else(|| format!("website not found: {}", id))?;
            store.open_edit_card_modal(site);
            to_value(store.ui())
        }
        "ui.closeAddCard" => {
            store.close_add_card_modal();
            to_value(store.ui())
        }
        "ui.openSettings" => {
            store.open_settings_modal();
            to_value(store.ui())
        }
        "ui.closeSettings" => {
            store.close_settings_modal();
            to_value(store.ui())
        }
        "ui.openGroup" => {
            let group = match opt_str_param(params, "id") {
                Some(id) => Some(
                    store
                        .group(id)
                        .cloned()
                        .ok_or_else(|| format!("group not found: {}", id))?,
                ),
                None => None,
            };
            store.open_group_modal(group);
            to_value(store.ui())
        }
        "ui.closeGroup" => {
            store.close_group_modal();
            to_value(store.ui())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
