use tracing::warn;

use super::store::Store;
use super::types::AppState;

/// The single fixed key the whole snapshot lives under.
pub const STATE_KEY: &str = "app-state";

/// Reads the stored snapshot. An absent key, an unreadable store, or a
/// corrupt blob all fall back to defaults — this boundary recovers, it never
/// crashes or propagates.
pub fn load<S: Store>(store: &S) -> AppState {
    let raw = match store.get(STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return AppState::default(),
        Err(e) => {
            warn!("state read failed, starting from defaults: {}", e);
            return AppState::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("stored state is corrupt, starting from defaults: {}", e);
            AppState::default()
        }
    }
}

/// Full-state overwrite under the fixed key. Best effort: serialize or write
/// failures are logged and swallowed, the in-memory state stays authoritative.
pub fn save<S: Store>(store: &mut S, state: &AppState) {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(e) => {
            warn!("state serialize failed, skipping save: {}", e);
            return;
        }
    };
    if let Err(e) = store.set(STATE_KEY, &json) {
        warn!("state write failed, keeping changes in memory: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use crate::state::types::{
        ApiConfig, ApiPreset, ChatSettingsEntry, Contact, Direction, Message, UserPersonaPreset,
        DEFAULT_STANDEE, DEFAULT_WALLPAPER,
    };

    #[test]
    fn test_load_from_empty_store_seeds_defaults() {
        let store = MemoryStore::new();
        let state = load(&store);
        assert_eq!(state.api_presets.len(), 1);
        assert_eq!(state.api_presets[0].name, "Default Local");
        assert_eq!(state.api_presets[0].endpoint, "http://localhost:1234/v1");
        assert_eq!(state.wallpaper, DEFAULT_WALLPAPER);
        assert_eq!(state.standee, DEFAULT_STANDEE);
        assert_eq!(state.selected_api_preset, "");
        assert!(!state.dark_text);
    }

    #[test]
    fn test_load_recovers_from_corrupt_blob() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json at all").unwrap();
        let state = load(&store);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_partial_blob_gets_per_field_defaults() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, r#"{"darkText":true}"#).unwrap();
        let state = load(&store);
        assert!(state.dark_text);
        assert_eq!(state.api_presets.len(), 1);
        assert_eq!(state.wallpaper, DEFAULT_WALLPAPER);
    }

    #[test]
    fn test_partial_nested_config_defaults_temperature() {
        let mut store = MemoryStore::new();
        store
            .set(STATE_KEY, r#"{"apiConfig":{"endpoint":"http://x"}}"#)
            .unwrap();
        let state = load(&store);
        assert_eq!(state.api_config.endpoint, "http://x");
        assert_eq!(state.api_config.temperature, 0.7);
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let mut state = AppState::default();
        state.contacts.push(Contact {
            id: "c1".to_string(),
            name: "Star".to_string(),
            real_name: "Nova".to_string(),
            nickname: "Star".to_string(),
            signature: "hello".to_string(),
            avatar: Some("data:image/png;base64,AA==".to_string()),
        });
        let mut entry = ChatSettingsEntry::default();
        entry.character.personality = "curious".to_string();
        entry.user.real_name = "Operator".to_string();
        entry.worldbook = "default-book".to_string();
        state.chat_settings.insert("c1".to_string(), entry);
        state.chat_logs.insert(
            "c1".to_string(),
            vec![
                Message {
                    text: "hi".to_string(),
                    direction: Direction::Sent,
                    time: "09:15".to_string(),
                },
                Message {
                    text: "hey".to_string(),
                    direction: Direction::Received,
                    time: "09:16".to_string(),
                },
            ],
        );
        state.api_presets.push(ApiPreset {
            name: "alt".to_string(),
            endpoint: "http://alt".to_string(),
            key: "k".to_string(),
            model: "m".to_string(),
            temperature: 0.4,
        });
        state.selected_api_preset = "1".to_string();
        state.user_presets.push(UserPersonaPreset {
            id: "1700000000000".to_string(),
            name: "me".to_string(),
            personality: "direct".to_string(),
        });
        state.selected_user_preset = "0".to_string();
        state.api_config = ApiConfig {
            endpoint: "http://live".to_string(),
            key: "secret".to_string(),
            model: "local-model".to_string(),
            temperature: 0.9,
        };
        state.chat_background = "data:image/png;base64,AA==".to_string();
        state.dark_text = true;

        let mut store = MemoryStore::new();
        save(&mut store, &state);
        assert_eq!(load(&store), state);
    }

    #[test]
    fn test_orphaned_keys_survive_round_trip() {
        let mut state = AppState::default();
        state
            .chat_settings
            .insert("ghost".to_string(), ChatSettingsEntry::default());
        state.chat_logs.insert(
            "ghost".to_string(),
            vec![Message {
                text: "anyone there".to_string(),
                direction: Direction::Sent,
                time: "00:00".to_string(),
            }],
        );
        let mut store = MemoryStore::new();
        save(&mut store, &state);
        let loaded = load(&store);
        assert!(loaded.chat_settings.contains_key("ghost"));
        assert_eq!(loaded.chat_logs["ghost"].len(), 1);
    }
}
