use crate::error::AppError;
use crate::media;
use crate::models;

use super::persistence;
use super::session::EditSession;
use super::store::Store;
use super::types::{ApiConfig, AppState, Contact};

/// Owns the entity model and the store behind it. Every mutating operation
/// funnels through one apply-then-persist dispatch point, so "any change
/// saves" holds by construction instead of by structural watching.
pub struct StateManager<S: Store> {
    pub(super) store: S,
    pub(super) state: AppState,
    pub(super) edit: EditSession,
    model_list: Vec<String>,
    loading_models: bool,
    armed: bool,
}

impl<S: Store> StateManager<S> {
    /// Rehydrates from the store. Population happens before the save
    /// dispatch is armed, so loading never writes back.
    pub fn load(store: S) -> Self {
        let state = persistence::load(&store);
        Self {
            store,
            state,
            edit: EditSession::default(),
            model_list: Vec::new(),
            loading_models: false,
            armed: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Model ids from the last successful fetch. Display state, not
    /// persisted.
    pub fn model_list(&self) -> &[String] {
        &self.model_list
    }

    pub fn loading_models(&self) -> bool {
        self.loading_models
    }

    /// The dispatch point: applies one mutation and persists the full
    /// snapshot. N discrete operations mean N saves, no debouncing.
    pub(super) fn apply<R>(&mut self, mutate: impl FnOnce(&mut AppState) -> R) -> R {
        let out = mutate(&mut self.state);
        if self.armed {
            persistence::save(&mut self.store, &self.state);
        }
        out
    }

    pub fn add_contact(&mut self, name: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let contact = Contact {
            id: id.clone(),
            name: name.to_string(),
            ..Contact::default()
        };
        self.apply(|s| s.contacts.push(contact));
        id
    }

    /// Removes the directory entry only. Settings and logs keyed by the id
    /// may remain; every reader tolerates such orphans.
    pub fn remove_contact(&mut self, contact_id: &str) {
        self.apply(|s| s.contacts.retain(|c| c.id != contact_id));
    }

    pub fn set_signature(&mut self, contact_id: &str, signature: &str) {
        self.apply(|s| {
            if let Some(contact) = s.contacts.iter_mut().find(|c| c.id == contact_id) {
                contact.signature = signature.to_string();
            }
        });
    }

    pub fn set_dark_text(&mut self, dark: bool) {
        self.apply(|s| s.dark_text = dark);
    }

    pub fn set_api_config(&mut self, config: ApiConfig) {
        self.apply(|s| s.api_config = config);
    }

    pub fn set_wallpaper(&mut self, bytes: &[u8]) {
        let url = media::to_data_url(&media::normalize(bytes, &media::WALLPAPER));
        self.apply(|s| s.wallpaper = url);
    }

    pub fn set_chat_background(&mut self, bytes: &[u8]) {
        let url = media::to_data_url(&media::normalize(bytes, &media::WALLPAPER));
        self.apply(|s| s.chat_background = url);
    }

    pub fn set_photo(&mut self, bytes: &[u8]) {
        let url = media::to_data_url(&media::normalize(bytes, &media::PHOTO));
        self.apply(|s| s.photo = url);
    }

    pub fn set_standee(&mut self, bytes: &[u8]) {
        let url = media::to_data_url(&media::normalize(bytes, &media::STANDEE));
        self.apply(|s| s.standee = url);
    }

    /// Pulls the model catalog from the configured endpoint. On success the
    /// list is replaced with the sorted ids and the active model becomes the
    /// first one; on failure the config is left untouched. The loading flag
    /// resets on every path.
    pub async fn refresh_models(&mut self) -> Result<usize, AppError> {
        if self.state.api_config.endpoint.is_empty() {
            return Err(AppError::Other("api endpoint is not configured".to_string()));
        }
        self.loading_models = true;
        self.model_list.clear();
        let result = models::fetch_model_ids(
            &self.state.api_config.endpoint,
            &self.state.api_config.key,
        )
        .await;
        self.loading_models = false;

        let ids = result?;
        let count = ids.len();
        self.model_list = ids;
        if let Some(first) = self.model_list.first().cloned() {
            self.apply(|s| s.api_config.model = first);
        }
        Ok(count)
    }
}
