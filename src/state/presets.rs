use crate::utils::now_millis;

use super::manager::StateManager;
use super::store::Store;
use super::types::{ApiConfig, ApiPreset, AppState, UserPersonaPreset};

/// Preset selection is a string: `""` means no selection, anything else is a
/// decimal index into the preset list. Call sites compare against the empty
/// string, never against a missing value — the sentinel is part of the
/// stored form.
pub fn selected_index(selection: &str) -> Option<usize> {
    if selection.is_empty() {
        return None;
    }
    selection.parse().ok()
}

/// Positional lookup, isolated here so a switch to stable preset ids would
/// not ripple through call sites.
pub fn api_preset_at<'a>(state: &'a AppState, selection: &str) -> Option<&'a ApiPreset> {
    selected_index(selection).and_then(|i| state.api_presets.get(i))
}

pub fn user_preset_at<'a>(state: &'a AppState, selection: &str) -> Option<&'a UserPersonaPreset> {
    selected_index(selection).and_then(|i| state.user_presets.get(i))
}

impl<S: Store> StateManager<S> {
    pub fn select_api_preset(&mut self, selection: &str) {
        let selection = selection.to_string();
        self.apply(|s| s.selected_api_preset = selection);
    }

    /// Captures the live ApiConfig under `name` and selects the new preset.
    /// An empty name is a no-op.
    pub fn save_api_preset(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let name = name.to_string();
        self.apply(|s| {
            s.api_presets.push(ApiPreset {
                name,
                endpoint: s.api_config.endpoint.clone(),
                key: s.api_config.key.clone(),
                model: s.api_config.model.clone(),
                temperature: s.api_config.temperature,
            });
            s.selected_api_preset = (s.api_presets.len() - 1).to_string();
        });
    }

    /// Copies the selected preset into the live ApiConfig. No selection or a
    /// stale index is a no-op. A zero temperature applies as 0.7.
    pub fn apply_selected_api_preset(&mut self) {
        self.apply(|s| {
            let Some(preset) = api_preset_at(s, &s.selected_api_preset).cloned() else {
                return;
            };
            s.api_config.endpoint = preset.endpoint;
            s.api_config.key = preset.key;
            s.api_config.model = preset.model;
            s.api_config.temperature = if preset.temperature > 0.0 {
                preset.temperature
            } else {
                0.7
            };
        });
    }

    /// Removes the selected preset, clears the selection, and resets the
    /// live ApiConfig to its defaults. No selection is a no-op.
    pub fn delete_selected_api_preset(&mut self) {
        self.apply(|s| {
            let Some(index) = selected_index(&s.selected_api_preset) else {
                return;
            };
            if index < s.api_presets.len() {
                s.api_presets.remove(index);
            }
            s.selected_api_preset = String::new();
            s.api_config = ApiConfig::default();
        });
    }

    pub fn select_user_preset(&mut self, selection: &str) {
        let selection = selection.to_string();
        self.apply(|s| s.selected_user_preset = selection);
    }

    /// Captures the working `user` persona as a reusable preset and selects
    /// it. An empty name is a no-op.
    pub fn save_user_preset(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let preset = UserPersonaPreset {
            id: now_millis().to_string(),
            name: name.to_string(),
            personality: self.edit.settings.user.personality.clone(),
        };
        self.apply(|s| {
            s.user_presets.push(preset);
            s.selected_user_preset = (s.user_presets.len() - 1).to_string();
        });
    }

    /// Writes the selected preset's personality into the working copy.
    /// Staged like any other persona edit: storage sees it only on commit.
    pub fn apply_selected_user_preset(&mut self) {
        let Some(preset) =
            user_preset_at(&self.state, &self.state.selected_user_preset).cloned()
        else {
            return;
        };
        self.edit.settings.user.personality = preset.personality;
    }

    pub fn delete_selected_user_preset(&mut self) {
        self.apply(|s| {
            let Some(index) = selected_index(&s.selected_user_preset) else {
                return;
            };
            if index < s.user_presets.len() {
                s.user_presets.remove(index);
            }
            s.selected_user_preset = String::new();
        });
    }
}
