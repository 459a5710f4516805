//! Modal flags and the entities currently being edited.

use serde::Serialize;

use super::AppStore;
use crate::types::group::Group;
use crate::types::website::Website;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub is_add_card_modal_open: bool,
    /// `Some` while the card modal edits an existing website.
    pub editing_card: Option<Website>,
    pub is_settings_modal_open: bool,
    pub is_group_modal_open: bool,
    pub editing_group: Option<Group>,
}

impl AppStore {
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn open_add_card_modal(&mut self) {
        self.ui.editing_card = None;
        self.ui.is_add_card_modal_open = true;
    }

    pub fn open_edit_card_modal(&mut self, site: Website) {
        self.ui.editing_card = Some(site);
        self.ui.is_add_card_modal_open = true;
    }

    pub fn close_add_card_modal(&mut self) {
        self.ui.editing_card = None;
        self.ui.is_add_card_modal_open = false;
    }

    pub fn open_settings_modal(&mut self) {
        self.ui.is_settings_modal_open = true;
    }

    pub fn close_settings_modal(&mut self) {
        self.ui.is_settings_modal_open = false;
    }

    /// `None` opens the modal for a new group.
    pub fn open_group_modal(&mut self, group: Option<Group>) {
        self.ui.editing_group = group;
        self.ui.is_group_modal_open = true;
    }

    pub fn close_group_modal(&mut self) {
        self.ui.editing_group = None;
        self.ui.is_group_modal_open = false;
    }
}
