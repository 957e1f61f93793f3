//! Request envelopes for the state actor.
//!
//! Each request carries a single-use reply channel owned by the issuing
//! caller. The serialization loop sends exactly one response per request,
//! after which the channel is discarded.

use tokio::sync::oneshot;

/// Request to read the value at `key`.
pub(crate) struct ReadRequest<K, V> {
    /// Key to look up.
    pub key: K,
    /// Single-use reply conduit; receives the stored value, or the
    /// default if the key is absent.
    pub reply: oneshot::Sender<V>,
}

/// Request to install `value` at `key`.
pub(crate) struct WriteRequest<K, V> {
    /// Key to write.
    pub key: K,
    /// Value to install.
    pub value: V,
    /// Single-use reply conduit; acknowledged only after the write is
    /// visible to subsequent reads processed by the loop.
    pub reply: oneshot::Sender<()>,
}
