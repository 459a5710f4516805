//! Backend API client.
//!
//! `ApiClient` is the seam between the store and the REST backend: one method per
//! backend operation, each resolving to the unwrapped payload. `HttpApiClient`
//! speaks JSON over HTTP with `reqwest`; `InMemoryBackend` (see `memory_backend`)
//! implements the same trait in-process.

use async_trait::async_trait;
use reqwest::{multipart, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use crate::services::envelope;
use crate::services::icon_upload::{generate_engine_id_now, IconFile, IconTransport};
use crate::types::errors::ApiError;
use crate::types::group::{Group, GroupDraft, GroupPatch, GroupWithWebsites, MoveWebsiteRequest};
use crate::types::search_engine::{SearchEngine, SearchEngineDraft, SearchEnginePatch};
use crate::types::settings::PartialSettings;
use crate::types::transfer::DataBundle;
use crate::types::website::{Website, WebsiteDraft};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Typed operations offered by the backend.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Health check.
    async fn ping(&self) -> Result<(), ApiError>;

    async fn get_websites(&self) -> Result<Vec<Website>, ApiError>;
    async fn create_website(&self, draft: &WebsiteDraft) -> Result<Website, ApiError>;
    async fn update_website(&self, id: &str, website: &Website) -> Result<Website, ApiError>;
    async fn delete_website(&self, id: &str) -> Result<(), ApiError>;
    /// Persists the full website order. The response body is ignored.
    async fn reorder_websites(&self, website_ids: &[String]) -> Result<(), ApiError>;

    async fn get_search_engines(&self) -> Result<Vec<SearchEngine>, ApiError>;
    async fn create_search_engine(&self, draft: &SearchEngineDraft) -> Result<SearchEngine, ApiError>;
    /// Creates an engine with an uploaded icon. A missing `draft.id` is generated
    /// from the name and the current timestamp.
    async fn create_search_engine_with_icon(
        &self,
        draft: &SearchEngineDraft,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError>;
    async fn update_search_engine(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
    ) -> Result<SearchEngine, ApiError>;
    async fn update_search_engine_with_icon(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError>;
    async fn delete_search_engine(&self, id: &str) -> Result<(), ApiError>;

    async fn get_settings(&self) -> Result<PartialSettings, ApiError>;
    async fn update_settings(&self, patch: &PartialSettings) -> Result<PartialSettings, ApiError>;

    async fn export_data(&self) -> Result<DataBundle, ApiError>;
    async fn import_data(&self, bundle: &DataBundle) -> Result<(), ApiError>;

    async fn get_groups(&self) -> Result<Vec<Group>, ApiError>;
    async fn get_groups_with_websites(&self) -> Result<Vec<GroupWithWebsites>, ApiError>;
    async fn create_group(&self, draft: &GroupDraft) -> Result<Group, ApiError>;
    async fn update_group(&self, id: &str, patch: &GroupPatch) -> Result<Group, ApiError>;
    async fn delete_group(&self, id: &str) -> Result<(), ApiError>;
    async fn move_website_to_group(&self, request: &MoveWebsiteRequest) -> Result<(), ApiError>;
    async fn reorder_groups(&self, group_ids: &[String]) -> Result<(), ApiError>;
}

/// `ApiClient` over HTTP.
///
/// No retries and no timeouts: the store decides how to degrade.
pub struct HttpApiClient {
    base_url: String,
    http: reqwest::Client,
    icon_transport: IconTransport,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            icon_transport: IconTransport::default(),
        }
    }

    pub fn with_icon_transport(mut self, transport: IconTransport) -> Self {
        self.icon_transport = transport;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/websites`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn builder(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint_url(endpoint))
    }

    /// Sends the request and returns the raw body of a successful response.
    async fn execute(&self, request: RequestBuilder, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        debug!(endpoint, "API request");
        let response = request.send().await.map_err(|e| {
            error!(endpoint, error = %e, "API request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(endpoint, status = status.as_u16(), "API request failed");
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let body = self.execute(self.builder(Method::GET, endpoint), endpoint).await?;
        envelope::decode(&body)
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let body = self.execute(self.builder(Method::GET, endpoint), endpoint).await?;
        envelope::decode_list(&body)
    }

    async fn send_json<B, T>(&self, method: Method, endpoint: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.builder(method, endpoint).json(payload);
        let body = self.execute(request, endpoint).await?;
        envelope::decode(&body)
    }

    /// Like `send_json`, ignoring whatever the backend answers.
    async fn send_json_unit<B>(&self, method: Method, endpoint: &str, payload: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = self.builder(method, endpoint).json(payload);
        self.execute(request, endpoint).await.map(|_| ())
    }

    async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        self.execute(self.builder(Method::DELETE, endpoint), endpoint)
            .await
            .map(|_| ())
    }

    async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        let request = self.builder(method, endpoint).multipart(form);
        let body = self.execute(request, endpoint).await?;
        envelope::decode(&body)
    }

    /// Multipart form with the engine fields plus an optional `icon` file part.
    fn engine_form(
        id: Option<&str>,
        name: Option<&str>,
        url: Option<&str>,
        placeholder: Option<&str>,
        is_default: Option<bool>,
        icon: Option<&IconFile>,
    ) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new();
        for (key, value) in [("id", id), ("name", name), ("url", url), ("placeholder", placeholder)] {
            if let Some(value) = value {
                form = form.text(key, value.to_string());
            }
        }
        if let Some(is_default) = is_default {
            form = form.text("isDefault", is_default.to_string());
        }
        if let Some(icon) = icon {
            let part = multipart::Part::bytes(icon.bytes.clone())
                .file_name(icon.file_name.clone())
                .mime_str(&icon.mime_type)
                .map_err(|e| ApiError::Decode(format!("invalid icon MIME type: {}", e)))?;
            form = form.part("icon", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn ping(&self) -> Result<(), ApiError> {
        self.execute(self.builder(Method::GET, "/ping"), "/ping")
            .await
            .map(|_| ())
    }

    async fn get_websites(&self) -> Result<Vec<Website>, ApiError> {
        self.get_list("/websites").await
    }

    async fn create_website(&self, draft: &WebsiteDraft) -> Result<Website, ApiError> {
        self.send_json(Method::POST, "/websites", draft).await
    }

    async fn update_website(&self, id: &str, website: &Website) -> Result<Website, ApiError> {
        self.send_json(Method::PUT, &format!("/websites/{}", id), website)
            .await
    }

    async fn delete_website(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/websites/{}", id)).await
    }

    async fn reorder_websites(&self, website_ids: &[String]) -> Result<(), ApiError> {
        self.send_json_unit(Method::PUT, "/websites/reorder", &json!({ "websiteIds": website_ids }))
            .await
    }

    async fn get_search_engines(&self) -> Result<Vec<SearchEngine>, ApiError> {
        self.get_list("/search-engines").await
    }

    async fn create_search_engine(&self, draft: &SearchEngineDraft) -> Result<SearchEngine, ApiError> {
        self.send_json(Method::POST, "/search-engines", draft).await
    }

    async fn create_search_engine_with_icon(
        &self,
        draft: &SearchEngineDraft,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError> {
        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| generate_engine_id_now(&draft.name));

        match self.icon_transport {
            IconTransport::Multipart => {
                let form = Self::engine_form(
                    Some(&id),
                    Some(&draft.name),
                    Some(&draft.url),
                    draft.placeholder.as_deref(),
                    draft.is_default,
                    icon,
                )?;
                self.send_multipart(Method::POST, "/search-engines/with-icon", form)
                    .await
            }
            IconTransport::DataUrl => {
                let mut body = draft.clone();
                body.id = Some(id);
                body.icon = icon.map(IconFile::to_data_url);
                self.send_json(Method::POST, "/search-engines", &body).await
            }
        }
    }

    async fn update_search_engine(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
    ) -> Result<SearchEngine, ApiError> {
        self.send_json(Method::PUT, &format!("/search-engines/{}", id), patch)
            .await
    }

    async fn update_search_engine_with_icon(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError> {
        match self.icon_transport {
            IconTransport::Multipart => {
                let form = Self::engine_form(
                    None,
                    patch.name.as_deref(),
                    patch.url.as_deref(),
                    patch.placeholder.as_deref(),
                    patch.is_default,
                    icon,
                )?;
                self.send_multipart(Method::PUT, &format!("/search-engines/{}/with-icon", id), form)
                    .await
            }
            IconTransport::DataUrl => {
                let mut body = patch.clone();
                body.icon = icon.map(IconFile::to_data_url);
                self.send_json(Method::PUT, &format!("/search-engines/{}", id), &body)
                    .await
            }
        }
    }

    async fn delete_search_engine(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/search-engines/{}", id)).await
    }

    async fn get_settings(&self) -> Result<PartialSettings, ApiError> {
        self.get("/settings").await
    }

    async fn update_settings(&self, patch: &PartialSettings) -> Result<PartialSettings, ApiError> {
        self.send_json(Method::PUT, "/settings", patch).await
    }

    async fn export_data(&self) -> Result<DataBundle, ApiError> {
        self.get("/export").await
    }

    async fn import_data(&self, bundle: &DataBundle) -> Result<(), ApiError> {
        self.send_json_unit(Method::POST, "/import", bundle).await
    }

    async fn get_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get_list("/groups").await
    }

    async fn get_groups_with_websites(&self) -> Result<Vec<GroupWithWebsites>, ApiError> {
        self.get_list("/groups-with-websites").await
    }

    async fn create_group(&self, draft: &GroupDraft) -> Result<Group, ApiError> {
        self.send_json(Method::POST, "/groups", draft).await
    }

    async fn update_group(&self, id: &str, patch: &GroupPatch) -> Result<Group, ApiError> {
        self.send_json(Method::PUT, &format!("/groups/{}", id), patch)
            .await
    }

    async fn delete_group(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/groups/{}", id)).await
    }

    async fn move_website_to_group(&self, request: &MoveWebsiteRequest) -> Result<(), ApiError> {
        self.send_json_unit(Method::PUT, "/groups/move-website", request)
            .await
    }

    async fn reorder_groups(&self, group_ids: &[String]) -> Result<(), ApiError> {
        self.send_json_unit(Method::PUT, "/groups/reorder", &json!({ "groupIds": group_ids }))
            .await
    }
}
