use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_WALLPAPER: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?q=80&w=2564&auto=format&fit=crop";
pub const DEFAULT_PHOTO: &str =
    "https://images.unsplash.com/photo-1517423568366-028c4974d016?q=80&w=2670&auto=format&fit=crop";
pub const DEFAULT_STANDEE: &str = "https://cdn-icons-png.flaticon.com/512/9440/9440474.png";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub id: String,
    /// Display field derived on persona commit, not a source of truth.
    pub name: String,
    pub real_name: String,
    pub nickname: String,
    pub signature: String,
    pub avatar: Option<String>,
}

impl Contact {
    /// Nickname wins, falls back to real name, falls back to the original
    /// name. All three may independently be empty.
    pub fn display_name(&self) -> &str {
        if !self.nickname.is_empty() {
            &self.nickname
        } else if !self.real_name.is_empty() {
            &self.real_name
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaSettings {
    pub avatar: String,
    pub real_name: String,
    pub nickname: String,
    pub personality: String,
}

/// Per-contact chat settings: the simulated counterpart (`char`) and the
/// human operator (`user`), plus a worldbook tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettingsEntry {
    #[serde(rename = "char")]
    pub character: PersonaSettings,
    pub user: PersonaSettings,
    pub worldbook: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub direction: Direction,
    /// `HH:MM` wall-clock stamp.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPreset {
    pub name: String,
    pub endpoint: String,
    pub key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ApiPreset {
    fn default() -> Self {
        Self {
            name: String::new(),
            endpoint: String::new(),
            key: String::new(),
            model: String::new(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPersonaPreset {
    /// Millisecond-timestamp string assigned at save time.
    pub id: String,
    pub name: String,
    pub personality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            model: String::new(),
            temperature: 0.7,
        }
    }
}

/// The full persisted snapshot. Missing fields in a stored blob fall back to
/// these defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub contacts: Vec<Contact>,
    /// Keyed by contact id. Keys without a matching contact are tolerated.
    pub chat_settings: HashMap<String, ChatSettingsEntry>,
    /// Keyed by contact id, append-only.
    pub chat_logs: HashMap<String, Vec<Message>>,
    pub api_config: ApiConfig,
    pub api_presets: Vec<ApiPreset>,
    /// `""` means no selection; otherwise a decimal index into `api_presets`.
    pub selected_api_preset: String,
    pub user_presets: Vec<UserPersonaPreset>,
    pub selected_user_preset: String,
    pub wallpaper: String,
    pub chat_background: String,
    pub photo: String,
    pub standee: String,
    pub dark_text: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            chat_settings: HashMap::new(),
            chat_logs: HashMap::new(),
            api_config: ApiConfig::default(),
            api_presets: vec![ApiPreset {
                name: "Default Local".to_string(),
                endpoint: "http://localhost:1234/v1".to_string(),
                key: "lm-studio".to_string(),
                model: "local-model".to_string(),
                temperature: 0.7,
            }],
            selected_api_preset: String::new(),
            user_presets: Vec::new(),
            selected_user_preset: String::new(),
            wallpaper: DEFAULT_WALLPAPER.to_string(),
            chat_background: String::new(),
            photo: DEFAULT_PHOTO.to_string(),
            standee: DEFAULT_STANDEE.to_string(),
            dark_text: false,
        }
    }
}
