//! Conversation-related types.

use std::slice;

use little_chat_model::Role;

/// An append-only, ordered sequence of messages.
///
/// Insertion order is display order. Only the chat controller appends to
/// it, everyone else gets a read-only copy through
/// [`Chat::snapshot`](crate::Chat::snapshot).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    #[inline]
    pub(crate) fn append(&mut self, role: Role, text: String) -> &Message {
        self.messages.push(Message { role, text });
        &self.messages[self.messages.len() - 1]
    }

    /// Returns all messages in display order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns an iterator over the messages in display order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    pub(crate) role: Role,
    pub(crate) text: String,
}

impl Message {
    /// Returns who said this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut conversation = Conversation::default();
        assert!(conversation.is_empty());

        conversation.append(Role::User, "Hello".to_owned());
        let last = conversation.append(Role::Assistant, "Hi there".to_owned());
        assert_eq!(last.text(), "Hi there");

        let roles: Vec<_> = conversation.iter().map(Message::role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant]);
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.last().map(Message::text), Some("Hi there"));
    }
}
