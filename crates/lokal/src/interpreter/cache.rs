//! Compiled message cache.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::parser::{Message, ParseError, parse_message};

/// Cache of parsed messages keyed by their exact text.
///
/// Reads are wait-free snapshots. A miss parses outside any lock and then
/// publishes a new map, so two threads racing on the same text may both
/// parse it; the later insert simply replaces an equal entry.
/// Messages that fail to parse are not cached.
///
/// Every miss copies the map, so the cache holds at most `capacity`
/// messages. A miss on a full cache starts over from an empty map holding
/// only the new message.
pub struct MessageCache {
    entries: ArcSwap<HashMap<String, Arc<Message>>>,
    capacity: usize,
}

impl MessageCache {
    /// Capacity of a cache built with [`new`](Self::new).
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A cache holding at most `capacity` messages. A capacity of zero is
    /// treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Return the compiled form of `text`, parsing it on first use.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `text` is not a valid message.
    pub fn get_or_compile(&self, text: &str) -> Result<Arc<Message>, ParseError> {
        if let Some(message) = self.entries.load().get(text) {
            return Ok(Arc::clone(message));
        }

        let message = Arc::new(parse_message(text)?);
        debug!(message = text, "compiled message");
        self.entries.rcu(|current| {
            let mut next = if current.len() < self.capacity || current.contains_key(text) {
                HashMap::clone(current)
            } else {
                debug!(capacity = self.capacity, "message cache full, clearing");
                HashMap::new()
            };
            next.insert(text.to_string(), Arc::clone(&message));
            next
        });
        Ok(message)
    }

    /// Number of cached messages.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Drop every cached message.
    pub fn clear(&self) {
        self.entries.store(Arc::new(HashMap::new()));
    }
}

impl Default for MessageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MessageCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MessageCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
