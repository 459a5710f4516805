use serde::{Deserialize, Serialize};

/// Placeholder token in an engine URL template that receives the encoded query.
pub const QUERY_PLACEHOLDER: &str = "{}";

/// A named URL template used to run web searches from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    pub id: String,
    pub name: String,
    /// Must contain `{}`; the first occurrence is replaced by the encoded query.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl SearchEngine {
    /// The four engines every installation starts with. Google is the default.
    pub fn builtin_defaults() -> Vec<SearchEngine> {
        vec![
            Self::builtin(
                "google",
                "Google",
                "https://www.google.com/search?q={}",
                "https://www.google.com/favicon.ico",
                "使用 Google 搜索...",
                true,
            ),
            Self::builtin(
                "baidu",
                "百度",
                "https://www.baidu.com/s?wd={}",
                "https://www.baidu.com/favicon.ico",
                "使用百度搜索...",
                false,
            ),
            Self::builtin(
                "bing",
                "Bing",
                "https://www.bing.com/search?q={}",
                "https://www.bing.com/favicon.ico",
                "使用 Bing 搜索...",
                false,
            ),
            Self::builtin(
                "github",
                "GitHub",
                "https://github.com/search?q={}",
                "https://github.com/favicon.ico",
                "在 GitHub 中搜索...",
                false,
            ),
        ]
    }

    fn builtin(
        id: &str,
        name: &str,
        url: &str,
        icon: &str,
        placeholder: &str,
        is_default: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            icon: Some(icon.to_string()),
            icon_type: None,
            placeholder: Some(placeholder.to_string()),
            is_default: is_default.then_some(true),
        }
    }

    /// The create-request body for this engine, keeping its id.
    pub fn to_draft(&self) -> SearchEngineDraft {
        SearchEngineDraft {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            url: self.url.clone(),
            icon: self.icon.clone(),
            placeholder: self.placeholder.clone(),
            is_default: self.is_default,
        }
    }
}

/// Fields accepted when creating a search engine.
///
/// `id` is optional: built-ins carry their fixed id, user engines either let the
/// backend choose or send a generated one (see `icon_upload::generate_engine_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngineDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl SearchEngineDraft {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }
}

/// Partial search engine update; only `Some` fields are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnginePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl SearchEnginePatch {
    pub fn apply_to(&self, engine: &mut SearchEngine) {
        if let Some(name) = &self.name {
            engine.name = name.clone();
        }
        if let Some(url) = &self.url {
            engine.url = url.clone();
        }
        if let Some(icon) = &self.icon {
            engine.icon = Some(icon.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            engine.placeholder = Some(placeholder.clone());
        }
        if let Some(is_default) = self.is_default {
            engine.is_default = Some(is_default);
        }
    }
}
