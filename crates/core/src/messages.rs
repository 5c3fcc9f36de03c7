//! Append-only message sink for player-facing text.

use crate::types::MessageTag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub tag: MessageTag,
    pub count: u32,
}

impl Message {
    /// Text as shown to the player, with a repeat suffix once stacked.
    pub fn full_text(&self) -> String {
        if self.count > 1 { format!("{} (x{})", self.text, self.count) } else { self.text.clone() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identical consecutive messages stack into one entry.
    pub fn add(&mut self, text: impl Into<String>, tag: MessageTag) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut()
            && last.text == text
            && last.tag == tag
        {
            last.count += 1;
            return;
        }
        self.messages.push(Message { text, tag, count: 1 });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of entries ever added, counting stacked repeats.
    pub fn total_added(&self) -> u64 {
        self.messages.iter().map(|m| u64::from(m.count)).sum()
    }
}

/// Uppercases the first character, for sentences that open with an entity name.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
