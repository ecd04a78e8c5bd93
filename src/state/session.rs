use crate::media;

use super::manager::StateManager;
use super::store::Store;
use super::types::ChatSettingsEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaRole {
    Char,
    User,
}

/// Working copy of one contact's chat settings. At most one contact is open
/// at a time; edits stage here and reach storage only through
/// `commit_persona_edits`.
#[derive(Debug, Default)]
pub struct EditSession {
    pub(super) contact_id: Option<String>,
    pub(super) settings: ChatSettingsEntry,
}

impl<S: Store> StateManager<S> {
    /// Opens a contact for editing. The working copy starts as a clone of
    /// the canonical entry, or defaults when the contact has none yet.
    pub fn begin_edit(&mut self, contact_id: &str) {
        let settings = self
            .state
            .chat_settings
            .get(contact_id)
            .cloned()
            .unwrap_or_default();
        self.edit = EditSession {
            contact_id: Some(contact_id.to_string()),
            settings,
        };
    }

    pub fn open_contact(&self) -> Option<&str> {
        self.edit.contact_id.as_deref()
    }

    pub fn edit(&self) -> &ChatSettingsEntry {
        &self.edit.settings
    }

    /// Mutable access to the working copy. Nothing here is persisted until
    /// commit.
    pub fn edit_mut(&mut self) -> &mut ChatSettingsEntry {
        &mut self.edit.settings
    }

    /// Normalizes an uploaded avatar into the working copy for one persona
    /// role. Staged like any other persona edit.
    pub fn set_persona_avatar(&mut self, role: PersonaRole, bytes: &[u8]) {
        let url = media::to_data_url(&media::normalize(bytes, &media::AVATAR));
        let persona = match role {
            PersonaRole::Char => &mut self.edit.settings.character,
            PersonaRole::User => &mut self.edit.settings.user,
        };
        persona.avatar = url;
    }

    /// Merges the working copy into the canonical entry (creating it if the
    /// contact has none) and recomputes the contact's directory fields from
    /// the `char` persona: nickname wins, real name next, otherwise the name
    /// stays as it was. The `user` persona never reaches the directory.
    pub fn commit_persona_edits(&mut self) {
        let Some(contact_id) = self.edit.contact_id.clone() else {
            return;
        };
        let working = self.edit.settings.clone();
        self.apply(|s| {
            let entry = s.chat_settings.entry(contact_id.clone()).or_default();
            *entry = working;
            let char_persona = entry.character.clone();
            if let Some(contact) = s.contacts.iter_mut().find(|c| c.id == contact_id) {
                contact.real_name = char_persona.real_name.clone();
                contact.nickname = char_persona.nickname.clone();
                if !contact.nickname.is_empty() {
                    contact.name = contact.nickname.clone();
                } else if !contact.real_name.is_empty() {
                    contact.name = contact.real_name.clone();
                }
                if !char_persona.avatar.is_empty() {
                    contact.avatar = Some(char_persona.avatar);
                }
            }
        });
    }

    /// Drops the working copy without touching storage.
    pub fn discard_edits(&mut self) {
        self.edit = EditSession::default();
    }
}

#[cfg(test)]
mod tests {
    use crate::state::manager::StateManager;
    use crate::state::persistence;
    use crate::state::session::PersonaRole;
    use crate::state::store::MemoryStore;

    fn manager() -> StateManager<MemoryStore> {
        StateManager::load(MemoryStore::new())
    }

    #[test]
    fn test_commit_cascades_char_persona_into_directory() {
        let mut mgr = manager();
        let id = mgr.add_contact("New Friend");

        mgr.begin_edit(&id);
        mgr.edit_mut().character.real_name = "Nova".to_string();
        mgr.commit_persona_edits();
        assert_eq!(mgr.state().contacts[0].name, "Nova");

        mgr.edit_mut().character.nickname = "Star".to_string();
        mgr.commit_persona_edits();
        assert_eq!(mgr.state().contacts[0].name, "Star");

        mgr.edit_mut().character.nickname = String::new();
        mgr.commit_persona_edits();
        assert_eq!(mgr.state().contacts[0].name, "Nova");
    }

    #[test]
    fn test_user_persona_never_touches_the_directory() {
        let mut mgr = manager();
        let id = mgr.add_contact("New Friend");
        mgr.begin_edit(&id);
        mgr.edit_mut().user.real_name = "Operator".to_string();
        mgr.edit_mut().user.nickname = "Op".to_string();
        mgr.commit_persona_edits();

        let contact = &mgr.state().contacts[0];
        assert_eq!(contact.name, "New Friend");
        assert_eq!(contact.real_name, "");
        assert_eq!(contact.nickname, "");
        assert_eq!(
            mgr.state().chat_settings[&id].user.real_name,
            "Operator"
        );
    }

    #[test]
    fn test_edits_stay_out_of_storage_until_commit() {
        let mut mgr = manager();
        let id = mgr.add_contact("New Friend");
        mgr.begin_edit(&id);
        mgr.edit_mut().character.personality = "curious".to_string();

        let before = persistence::load(&mgr.store);
        assert!(!before.chat_settings.contains_key(&id));

        mgr.commit_persona_edits();
        let after = persistence::load(&mgr.store);
        assert_eq!(after.chat_settings[&id].character.personality, "curious");
    }

    #[test]
    fn test_commit_creates_entry_for_unknown_contact() {
        let mut mgr = manager();
        mgr.begin_edit("ghost");
        mgr.edit_mut().worldbook = "tavern".to_string();
        mgr.commit_persona_edits();
        assert_eq!(mgr.state().chat_settings["ghost"].worldbook, "tavern");
    }

    #[test]
    fn test_discard_resets_the_working_copy() {
        let mut mgr = manager();
        let id = mgr.add_contact("New Friend");
        mgr.begin_edit(&id);
        mgr.edit_mut().character.real_name = "Nova".to_string();
        mgr.discard_edits();
        assert_eq!(mgr.open_contact(), None);
        assert_eq!(mgr.edit().character.real_name, "");
        assert!(mgr.state().chat_settings.is_empty());
    }

    #[test]
    fn test_avatar_upload_stages_into_the_working_copy() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            8,
            image::Rgb([10, 10, 10]),
        ));
        let mut png = Vec::new();
        img.write_with_encoder(image::codecs::png::PngEncoder::new(&mut png))
            .unwrap();

        let mut mgr = manager();
        let id = mgr.add_contact("New Friend");
        mgr.begin_edit(&id);
        mgr.set_persona_avatar(PersonaRole::Char, &png);
        assert!(mgr.edit().character.avatar.starts_with("data:image/"));
        assert!(!mgr.state().chat_settings.contains_key(&id));

        mgr.commit_persona_edits();
        assert_eq!(
            mgr.state().contacts[0].avatar.as_deref(),
            Some(mgr.state().chat_settings[&id].character.avatar.as_str())
        );
    }
}
