use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;
use tracing::debug;

use crate::storage::{self, SharedStore, CHAT_MINIMIZED_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    General,
    Trade,
    Notice,
    Random,
}

impl ChannelId {
    pub const ALL: [ChannelId; 4] = [ChannelId::General, ChannelId::Trade, ChannelId::Notice, ChannelId::Random];

    pub fn name(self) -> &'static str {
        match self {
            ChannelId::General => "일반",
            ChannelId::Trade => "거래문의",
            ChannelId::Notice => "공지사항",
            ChannelId::Random => "잡담",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub unread: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub author: String,
    pub text: String,
    /// Local "HH:MM" stamp.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Online,
    Away,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: u32,
    pub name: String,
    pub status: UserStatus,
}

fn seed_channels() -> Vec<Channel> {
    vec![
        Channel { id: ChannelId::General, unread: 0 },
        Channel { id: ChannelId::Trade, unread: 2 },
        Channel { id: ChannelId::Notice, unread: 1 },
        Channel { id: ChannelId::Random, unread: 0 },
    ]
}

fn seed_users() -> Vec<ChatUser> {
    [
        (1, "거래왕김철수", UserStatus::Online),
        (2, "포인트마스터", UserStatus::Online),
        (3, "시스템관리자", UserStatus::Online),
        (4, "거래초보", UserStatus::Away),
        (5, "포인트수집가", UserStatus::Offline),
    ]
    .into_iter()
    .map(|(id, name, status)| ChatUser {
        id,
        name: name.to_string(),
        status,
    })
    .collect()
}

/// State for the chat sidebar
pub struct ChatState {
    pub channels: Vec<Channel>,
    pub active_channel: ChannelId,
    pub online_users: Vec<ChatUser>,
    pub input: String,
    messages: HashMap<ChannelId, Vec<ChatMessage>>,
    typing: HashSet<(ChannelId, u32)>,
    minimized: bool,
    next_message_id: u64,
    store: SharedStore,
}

impl ChatState {
    /// Restores the minimized flag from storage.
    pub fn new(store: SharedStore) -> Self {
        let minimized = storage::load_json(store.as_ref(), CHAT_MINIMIZED_KEY).unwrap_or(false);
        let mut chat = Self {
            channels: seed_channels(),
            active_channel: ChannelId::General,
            online_users: seed_users(),
            input: String::new(),
            messages: HashMap::new(),
            typing: HashSet::new(),
            minimized,
            next_message_id: 1,
            store,
        };
        chat.typing.insert((ChannelId::General, 2));
        chat
    }

    pub fn set_active_channel(&mut self, channel: ChannelId) {
        self.active_channel = channel;
        if let Some(c) = self.channels.iter_mut().find(|c| c.id == channel) {
            c.unread = 0;
        }
    }

    pub fn next_channel(&mut self) {
        let idx = ChannelId::ALL.iter().position(|c| *c == self.active_channel).unwrap_or(0);
        self.set_active_channel(ChannelId::ALL[(idx + 1) % ChannelId::ALL.len()]);
    }

    /// Appends a message. Messages landing outside the active channel bump
    /// that channel's unread counter.
    pub fn add_message(&mut self, channel: ChannelId, author: impl Into<String>, text: impl Into<String>, at: NaiveTime) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.entry(channel).or_default().push(ChatMessage {
            id,
            author: author.into(),
            text: text.into(),
            timestamp: at.format("%H:%M").to_string(),
        });
        if channel != self.active_channel {
            if let Some(c) = self.channels.iter_mut().find(|c| c.id == channel) {
                c.unread += 1;
            }
        }
        id
    }

    /// Posts the input line to the active channel. Blank input is ignored.
    pub fn send_input(&mut self, author: &str, at: NaiveTime) -> Option<u64> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input.clear();
        Some(self.add_message(self.active_channel, author, text, at))
    }

    pub fn channel_messages(&self, channel: ChannelId) -> &[ChatMessage] {
        self.messages.get(&channel).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_typing(&mut self, user_id: u32, channel: ChannelId, typing: bool) {
        if typing {
            self.typing.insert((channel, user_id));
        } else {
            self.typing.remove(&(channel, user_id));
        }
    }

    pub fn is_typing(&self, user_id: u32, channel: ChannelId) -> bool {
        self.typing.contains(&(channel, user_id))
    }

    pub fn typing_users(&self, channel: ChannelId) -> Vec<&ChatUser> {
        self.online_users
            .iter()
            .filter(|u| self.is_typing(u.id, channel))
            .collect()
    }

    pub fn update_user_status(&mut self, user_id: u32, status: UserStatus) -> bool {
        match self.online_users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.status = status;
                true
            }
            None => false,
        }
    }

    pub fn unread_count(&self, channel: ChannelId) -> u32 {
        self.channels
            .iter()
            .find(|c| c.id == channel)
            .map(|c| c.unread)
            .unwrap_or(0)
    }

    pub fn total_unread(&self) -> u32 {
        self.channels.iter().map(|c| c.unread).sum()
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
        debug!(minimized, "chat bar toggled");
        storage::save_json(self.store.as_ref(), CHAT_MINIMIZED_KEY, &minimized);
    }

    pub fn toggle_minimized(&mut self) {
        self.set_minimized(!self.minimized);
    }

    /// Clears messages and typing flags and returns to the general channel.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.typing.clear();
        self.input.clear();
        self.active_channel = ChannelId::General;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 0).unwrap()
    }

    #[test]
    fn switching_channel_clears_its_unread() {
        let mut chat = ChatState::new(Arc::new(MemoryStore::new()));
        assert_eq!(chat.total_unread(), 3);
        chat.set_active_channel(ChannelId::Trade);
        assert_eq!(chat.unread_count(ChannelId::Trade), 0);
        assert_eq!(chat.total_unread(), 1);
    }

    #[test]
    fn messages_elsewhere_count_as_unread() {
        let mut chat = ChatState::new(Arc::new(MemoryStore::new()));
        chat.add_message(ChannelId::General, "me", "hi", noon());
        assert_eq!(chat.unread_count(ChannelId::General), 0);
        chat.add_message(ChannelId::Random, "you", "yo", noon());
        assert_eq!(chat.unread_count(ChannelId::Random), 1);
        assert_eq!(chat.channel_messages(ChannelId::General)[0].timestamp, "12:05");
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut chat = ChatState::new(Arc::new(MemoryStore::new()));
        chat.input = "   ".into();
        assert!(chat.send_input("me", noon()).is_none());
        chat.input = " 안녕하세요 ".into();
        assert!(chat.send_input("me", noon()).is_some());
        assert_eq!(chat.channel_messages(ChannelId::General)[0].text, "안녕하세요");
        assert!(chat.input.is_empty());
    }

    #[test]
    fn typing_and_status_updates() {
        let mut chat = ChatState::new(Arc::new(MemoryStore::new()));
        assert_eq!(chat.typing_users(ChannelId::General).len(), 1);
        chat.set_typing(2, ChannelId::General, false);
        assert!(chat.typing_users(ChannelId::General).is_empty());
        assert!(chat.update_user_status(4, UserStatus::Online));
        assert!(!chat.update_user_status(99, UserStatus::Online));
    }

    #[test]
    fn minimized_flag_is_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut chat = ChatState::new(store.clone());
        assert!(!chat.is_minimized());
        chat.toggle_minimized();
        let restored = ChatState::new(store);
        assert!(restored.is_minimized());
    }

    #[test]
    fn reset_clears_messages() {
        let mut chat = ChatState::new(Arc::new(MemoryStore::new()));
        chat.set_active_channel(ChannelId::Notice);
        chat.add_message(ChannelId::Notice, "a", "b", noon());
        chat.reset();
        assert_eq!(chat.active_channel, ChannelId::General);
        assert!(chat.channel_messages(ChannelId::Notice).is_empty());
    }
}
