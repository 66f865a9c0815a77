/// Draft for the message-compose modal.
#[derive(Debug, Default)]
pub struct MessageDraft {
    pub text: String,
    pub is_sending: bool,
}

impl MessageDraft {
    /// Marks the draft as in flight. Blank drafts and double sends are refused.
    pub fn begin_send(&mut self) -> Option<String> {
        let text = self.text.trim();
        if text.is_empty() || self.is_sending {
            return None;
        }
        self.is_sending = true;
        Some(text.to_string())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.is_sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_in_flight_drafts_are_not_sent() {
        let mut draft = MessageDraft::default();
        assert!(draft.begin_send().is_none());
        draft.text = "  거래 가능할까요? ".into();
        assert_eq!(draft.begin_send().as_deref(), Some("거래 가능할까요?"));
        assert!(draft.begin_send().is_none());
        draft.clear();
        assert!(!draft.is_sending);
    }
}
