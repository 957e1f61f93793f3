//! # Stateful Serialization Actor
//!
//! A single owning loop serializes all access to a key/value map. Callers
//! never touch the map directly; they send read or write requests over
//! channels and await the reply on a single-use conduit. Mutual exclusion
//! is structural (one consumer of the request streams), so no lock
//! appears anywhere in the contract.
//!
//! ## Ordering Guarantees
//!
//! The loop processes exactly one request at a time, choosing
//! non-deterministically between the pending read and write classes. Every
//! read observes the cumulative effect of all writes processed before it
//! in the loop's total order, and a write acknowledged before a later read
//! is submitted is guaranteed visible to that read. Starvation of one
//! class under sustained load from the other is a known, accepted
//! limitation of the two-channel design.

mod envelope;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use flume::Receiver;
use tokio::sync::{oneshot, Notify};
use tracing::{debug, info};

use covey_api::errors::StateError;
use covey_api::types::StateResult;

use crate::config::StateActorConfig;
use crate::log_state_op;

use envelope::{ReadRequest, WriteRequest};

/// # State Actor Handle
///
/// Cloneable handle to a running serialization loop that owns a
/// `HashMap<K, V>`.
///
/// ## Key Responsibilities
/// - Routing read/write requests to the owning loop
/// - Delivering exactly one response per request
/// - Fast-failing requests once the actor is stopped
///
/// ## Lifecycle
/// `start` launches the loop; `stop` terminates it. After `stop`, pending
/// and later requests fail with [`StateError::Stopped`].
pub struct StateActor<K, V> {
    /// Instance name used in logs
    name: String,

    /// Sender side of the read request channel
    reads: flume::Sender<ReadRequest<K, V>>,

    /// Sender side of the write request channel
    writes: flume::Sender<WriteRequest<K, V>>,

    /// Set once `stop` has been requested
    stopped: Arc<AtomicBool>,

    /// Wakes the loop so a stop request takes effect while idle
    stop_notify: Arc<Notify>,

    /// Served-operation counters shared with the loop
    metrics: Arc<StateMetrics>,
}

impl<K, V> Clone for StateActor<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            reads: self.reads.clone(),
            writes: self.writes.clone(),
            stopped: Arc::clone(&self.stopped),
            stop_notify: Arc::clone(&self.stop_notify),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<K, V> StateActor<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Default + Send + 'static,
{
    /// Starts a serialization loop owning `initial` with default
    /// configuration.
    pub fn start(initial: HashMap<K, V>) -> Self {
        Self::start_with_config(StateActorConfig::default(), initial)
    }

    /// Starts a serialization loop owning `initial`.
    ///
    /// The loop runs as a detached task; it exits when `stop` is called or
    /// when every handle has been dropped.
    pub fn start_with_config(config: StateActorConfig, initial: HashMap<K, V>) -> Self {
        let name = config.name;
        let (reads_tx, reads_rx) = flume::unbounded();
        let (writes_tx, writes_rx) = flume::unbounded();
        let stopped = Arc::new(AtomicBool::new(false));
        let stop_notify = Arc::new(Notify::new());
        let metrics = Arc::new(StateMetrics::default());

        let serialization_loop = SerializationLoop {
            name: name.clone(),
            state: initial,
            reads: reads_rx,
            writes: writes_rx,
            stopped: Arc::clone(&stopped),
            stop_notify: Arc::clone(&stop_notify),
            metrics: Arc::clone(&metrics),
        };
        tokio::spawn(serialization_loop.run());

        info!("State actor {} started", name);
        Self {
            name,
            reads: reads_tx,
            writes: writes_tx,
            stopped,
            stop_notify,
            metrics,
        }
    }

    /// Reads the value at `key`.
    ///
    /// Returns `V::default()` if the key is absent; a missing key is not
    /// an error. Fails with [`StateError::Stopped`] once the actor has
    /// been stopped.
    pub async fn read(&self, key: K) -> StateResult<V> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(StateError::Stopped);
        }
        log_state_op!(self.name.as_str(), "read");

        let (reply_tx, reply_rx) = oneshot::channel();
        self.reads
            .send_async(ReadRequest {
                key,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::Stopped)?;
        reply_rx.await.map_err(|_| StateError::Stopped)
    }

    /// Installs `value` at `key`.
    ///
    /// The returned acknowledgement is delivered only after the write is
    /// visible to subsequent reads processed by the loop. Fails with
    /// [`StateError::Stopped`] once the actor has been stopped.
    pub async fn write(&self, key: K, value: V) -> StateResult<()> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(StateError::Stopped);
        }
        log_state_op!(self.name.as_str(), "write");

        let (reply_tx, reply_rx) = oneshot::channel();
        self.writes
            .send_async(WriteRequest {
                key,
                value,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StateError::Stopped)?;
        reply_rx.await.map_err(|_| StateError::Stopped)
    }

    /// Requests loop termination. Idempotent.
    ///
    /// Requests still queued when the loop exits have their reply conduits
    /// dropped, failing those callers with [`StateError::Stopped`]. A
    /// request the loop is processing at that moment may still complete.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.stop_notify.notify_one();
        info!("State actor {} stopping", self.name);
    }

    /// True once `stop` has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Instance name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the served-operation counters.
    pub fn metrics(&self) -> StateMetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Owns the map and serializes all access to it.
struct SerializationLoop<K, V> {
    /// Instance name used in logs
    name: String,

    /// The owned state; touched by this loop only
    state: HashMap<K, V>,

    /// Receiver side of the read request channel
    reads: Receiver<ReadRequest<K, V>>,

    /// Receiver side of the write request channel
    writes: Receiver<WriteRequest<K, V>>,

    /// Checked between requests so a stop lands promptly
    stopped: Arc<AtomicBool>,

    /// Wakes the loop out of an idle select on stop
    stop_notify: Arc<Notify>,

    /// Served-operation counters shared with the handles
    metrics: Arc<StateMetrics>,
}

impl<K, V> SerializationLoop<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Default + Send + 'static,
{
    async fn run(mut self) {
        debug!("State actor {} serialization loop running", self.name);

        while !self.stopped.load(Ordering::SeqCst) {
            // No branch priority: the choice between a pending read and a
            // pending write is left to the select.
            tokio::select! {
                _ = self.stop_notify.notified() => {
                    // Stop flag is re-checked by the loop condition.
                }
                request = self.reads.recv_async() => match request {
                    Ok(read) => self.handle_read(read),
                    // Every handle dropped; nothing can submit anymore.
                    Err(_) => break,
                },
                request = self.writes.recv_async() => match request {
                    Ok(write) => self.handle_write(write),
                    Err(_) => break,
                },
            }
        }

        // Envelopes still queued hold live reply conduits for as long as
        // any handle exists; drain them so the conduits drop and their
        // callers resolve with `Stopped` instead of hanging.
        while self.reads.try_recv().is_ok() {}
        while self.writes.try_recv().is_ok() {}

        debug!("State actor {} serialization loop stopped", self.name);
    }

    fn handle_read(&mut self, request: ReadRequest<K, V>) {
        let value = self
            .state
            .get(&request.key)
            .cloned()
            .unwrap_or_default();
        self.metrics.record_read();
        // A caller that gave up waiting for the reply is not an error.
        let _ = request.reply.send(value);
    }

    fn handle_write(&mut self, request: WriteRequest<K, V>) {
        self.state.insert(request.key, request.value);
        self.metrics.record_write();
        // Acknowledge only after the insert above, so an acked write is
        // visible to every later read the loop processes.
        let _ = request.reply.send(());
    }
}

/// Served-operation counters for a state actor.
#[derive(Debug, Default)]
pub struct StateMetrics {
    /// Read requests answered by the loop
    reads_served: AtomicU64,

    /// Write requests applied by the loop
    writes_applied: AtomicU64,
}

impl StateMetrics {
    fn record_read(&self) {
        self.reads_served.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> StateMetricsSnapshot {
        StateMetricsSnapshot {
            reads_served: self.reads_served.load(Ordering::Relaxed),
            writes_applied: self.writes_applied.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of [`StateMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct StateMetricsSnapshot {
    /// Read requests answered so far
    pub reads_served: u64,

    /// Write requests applied so far
    pub writes_applied: u64,
}
