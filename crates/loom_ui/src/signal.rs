//! # Signal Bus
//!
//! Topic-keyed fan-out from widgets to game code.
//!
//! ```text
//! Button ──publish("build.confirm", Int(3))──> SignalBus ──> Receiver (economy)
//!                                                      └───> Receiver (audio)
//! ```
//!
//! Every subscriber owns a bounded channel. Publishing never blocks the UI
//! thread: a full subscriber misses the signal, a disconnected one is pruned.

use std::collections::{BTreeMap, HashMap};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Loosely typed value carried by a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// String.
    Str(String),
    /// Ordered list.
    Array(Vec<SignalValue>),
    /// Keyed record.
    Object(BTreeMap<String, SignalValue>),
}

impl SignalValue {
    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up a field of an object.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }
}

/// A published signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Topic it was published on.
    pub topic: String,
    /// Payload.
    pub value: SignalValue,
}

/// Topic registry with bounded per-subscriber channels.
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct SignalBus {
    topics: RwLock<HashMap<String, Vec<Sender<Signal>>>>,
    capacity: usize,
}

impl SignalBus {
    /// Creates a bus whose subscriber channels hold `capacity` signals.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Subscribes to a topic.
    #[must_use]
    pub fn subscribe(&self, topic: &str) -> Receiver<Signal> {
        let (sender, receiver) = bounded(self.capacity);
        self.topics.write().entry(topic.to_owned()).or_default().push(sender);
        receiver
    }

    /// Publishes a value to every subscriber of `topic`.
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, topic: &str, value: SignalValue) -> usize {
        let mut topics = self.topics.write();
        let Some(senders) = topics.get_mut(topic) else {
            return 0;
        };

        let mut delivered = 0;
        senders.retain(|sender| {
            let signal = Signal {
                topic: topic.to_owned(),
                value: value.clone(),
            };
            match sender.try_send(signal) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(topic, "signal subscriber is full, dropping signal");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            }
        });
        if senders.is_empty() {
            topics.remove(topic);
        }
        delivered
    }

    /// Number of live subscribers on a topic.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.read().get(topic).map_or(0, Vec::len)
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("topics", &self.topics.read().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
