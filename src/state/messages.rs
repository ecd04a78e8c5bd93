use std::time::Duration;

use crate::utils::clock_time;

use super::manager::StateManager;
use super::store::Store;
use super::types::{Direction, Message};

impl<S: Store> StateManager<S> {
    pub fn append_sent(&mut self, contact_id: &str, text: &str) {
        self.append(contact_id, text, Direction::Sent);
    }

    pub fn append_received(&mut self, contact_id: &str, text: &str) {
        self.append(contact_id, text, Direction::Received);
    }

    /// Logs are created on first message and only ever grow.
    fn append(&mut self, contact_id: &str, text: &str, direction: Direction) {
        let contact_id = contact_id.to_string();
        let message = Message {
            text: text.to_string(),
            direction,
            time: clock_time(),
        };
        self.apply(|s| s.chat_logs.entry(contact_id).or_default().push(message));
    }

    /// Appends the outgoing message, then the synthetic reply after `delay`.
    /// A fire-once timer with no cancellation; each append persists on its
    /// own.
    pub async fn send_with_reply(
        &mut self,
        contact_id: &str,
        text: &str,
        reply: &str,
        delay: Duration,
    ) {
        self.append_sent(contact_id, text);
        tokio::time::sleep(delay).await;
        self.append_received(contact_id, reply);
    }
}
