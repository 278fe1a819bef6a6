//! An ordered, immutable stream of messages.

use crate::prelude::*;
use std::{iter::FromIterator, slice, vec};

/// An ordered list of [`Message`](enum.Message.html)s representing one MIDI stream.
///
/// The order of the list is the structural order of the stream. Timestamps are not required to
/// be monotonic.
///
/// A sequence cannot be modified once built: every edit, [`append`](#method.append) included,
/// allocates and returns a new sequence. The messages are reachable as a slice through `Deref`,
/// which is also how the [`Transform`](trait.Transform.html) operations become available on it.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Sequence {
    messages: Vec<Message>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[inline]
    pub fn new() -> Sequence {
        Sequence {
            messages: Vec::new(),
        }
    }

    /// Returns a new sequence with `msg` added after all the messages of this one.
    pub fn append(&self, msg: Message) -> Sequence {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend_from_slice(&self.messages);
        messages.push(msg);
        Sequence { messages }
    }

    /// The messages of this sequence, in order.
    #[inline]
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Takes the message list out of the sequence.
    #[inline]
    pub fn into_vec(self) -> Vec<Message> {
        self.messages
    }

    /// Checks that every note number in the sequence lies in the MIDI range `0..=127`.
    ///
    /// Transforms never clamp or check note arithmetic; this is the place to do so.
    pub fn validate(&self) -> Result<()> {
        for (index, msg) in self.messages.iter().enumerate() {
            if let Some(note) = msg.note() {
                ensure!(
                    (0..=127).contains(&note),
                    Error::NoteOutOfRange { index, note }
                );
            }
        }
        Ok(())
    }
}

impl ops::Deref for Sequence {
    type Target = [Message];
    #[inline]
    fn deref(&self) -> &[Message] {
        &self.messages
    }
}

impl AsRef<[Message]> for Sequence {
    #[inline]
    fn as_ref(&self) -> &[Message] {
        &self.messages
    }
}

impl From<Vec<Message>> for Sequence {
    #[inline]
    fn from(messages: Vec<Message>) -> Sequence {
        Sequence { messages }
    }
}

impl From<&[Message]> for Sequence {
    #[inline]
    fn from(messages: &[Message]) -> Sequence {
        Sequence {
            messages: messages.to_vec(),
        }
    }
}

impl From<Sequence> for Vec<Message> {
    #[inline]
    fn from(seq: Sequence) -> Vec<Message> {
        seq.messages
    }
}

impl FromIterator<Message> for Sequence {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Sequence {
        Sequence {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sequence {
    type Item = Message;
    type IntoIter = vec::IntoIter<Message>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
