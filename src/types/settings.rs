use serde::{Deserialize, Serialize};

use super::search_engine::SearchEngine;

/// Engine id used when no engine is available at all.
pub const FALLBACK_ENGINE_ID: &str = "google";

/// Top-level dashboard settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    pub layout: LayoutSettings,
    pub background: BackgroundSettings,
    pub card_style: CardStyle,
    pub search: SearchSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            layout: LayoutSettings::default(),
            background: BackgroundSettings::default(),
            card_style: CardStyle::default(),
            search: SearchSettings::default(),
        }
    }
}

impl AppSettings {
    /// The engine referenced by `defaultEngineId`, else the first engine.
    pub fn default_engine(&self) -> Option<&SearchEngine> {
        self.search
            .engines
            .iter()
            .find(|e| e.id == self.search.default_engine_id)
            .or_else(|| self.search.engines.first())
    }

    /// Looks up an engine by id.
    pub fn engine(&self, id: &str) -> Option<&SearchEngine> {
        self.search.engines.iter().find(|e| e.id == id)
    }

    /// Resets `defaultEngineId` to the first engine when it references an unknown engine.
    ///
    /// Returns `true` when a correction was made.
    pub fn ensure_default_engine(&mut self) -> bool {
        let valid = self
            .search
            .engines
            .iter()
            .any(|e| e.id == self.search.default_engine_id);
        if valid {
            return false;
        }
        self.search.default_engine_id = self
            .search
            .engines
            .first()
            .map(|e| e.id.clone())
            .unwrap_or_else(|| FALLBACK_ENGINE_ID.to_string());
        true
    }

    /// Layers backend settings over these (local default) settings after a bulk load.
    ///
    /// Sections present in `remote` replace the local ones; the search section is
    /// merged field by field and its engine list is always replaced by `engines`.
    pub fn merge_loaded(&mut self, remote: Option<PartialSettings>, engines: Vec<SearchEngine>) {
        if let Some(remote) = remote {
            self.apply_sections(&remote);
            if let Some(search) = remote.search {
                search.apply_scalars(&mut self.search);
            }
        }
        self.search.engines = engines;
    }

    /// Merges a settings-update response over the current settings.
    ///
    /// Returns `false` when the response carried a search section without a
    /// usable (present and non-empty) engine list, in which case the caller must
    /// re-resolve the engines.
    pub fn apply_update(&mut self, updated: &PartialSettings) -> bool {
        self.apply_sections(updated);
        match &updated.search {
            Some(search) => {
                search.apply_scalars(&mut self.search);
                match &search.engines {
                    Some(engines) if !engines.is_empty() => {
                        self.search.engines = engines.clone();
                        true
                    }
                    _ => false,
                }
            }
            None => !self.search.engines.is_empty(),
        }
    }

    fn apply_sections(&mut self, remote: &PartialSettings) {
        if let Some(theme) = remote.theme {
            self.theme = theme;
        }
        if let Some(layout) = &remote.layout {
            self.layout = layout.clone();
        }
        if let Some(background) = &remote.background {
            self.background = background.clone();
        }
        if let Some(card_style) = &remote.card_style {
            self.card_style = card_style.clone();
        }
    }
}

/// Color scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Grid layout of the website cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    pub columns: u32,
    pub card_size: CardSize,
    pub show_labels: bool,
    pub gap: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            columns: 6,
            card_size: CardSize::Medium,
            show_labels: true,
            gap: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    Medium,
    Large,
}

/// Page background.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: String,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Gradient,
            value: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Color,
    Gradient,
    Image,
}

/// Visual style of a website card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    pub border_radius: u32,
    pub opacity: f64,
    pub shadow: bool,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border_radius: 12,
            opacity: 0.9,
            shadow: true,
        }
    }
}

/// Search box configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    pub enabled: bool,
    pub engines: Vec<SearchEngine>,
    pub default_engine_id: String,
    pub open_in_new_tab: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            engines: SearchEngine::builtin_defaults(),
            default_engine_id: FALLBACK_ENGINE_ID.to_string(),
            open_in_new_tab: true,
        }
    }
}

/// Settings as reported by the backend or sent as an update: every field optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_style: Option<CardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<PartialSearchSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialSearchSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Vec<SearchEngine>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_engine_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
}

impl PartialSearchSettings {
    /// Copies every present field except the engine list.
    fn apply_scalars(&self, search: &mut SearchSettings) {
        if let Some(enabled) = self.enabled {
            search.enabled = enabled;
        }
        if let Some(id) = &self.default_engine_id {
            search.default_engine_id = id.clone();
        }
        if let Some(new_tab) = self.open_in_new_tab {
            search.open_in_new_tab = new_tab;
        }
    }
}

impl From<&AppSettings> for PartialSettings {
    fn from(settings: &AppSettings) -> Self {
        Self {
            theme: Some(settings.theme),
            layout: Some(settings.layout.clone()),
            background: Some(settings.background.clone()),
            card_style: Some(settings.card_style.clone()),
            search: Some(PartialSearchSettings::from(&settings.search)),
        }
    }
}

impl From<&SearchSettings> for PartialSearchSettings {
    fn from(search: &SearchSettings) -> Self {
        Self {
            enabled: Some(search.enabled),
            engines: Some(search.engines.clone()),
            default_engine_id: Some(search.default_engine_id.clone()),
            open_in_new_tab: Some(search.open_in_new_tab),
        }
    }
}
