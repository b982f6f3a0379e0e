//! Async result memoization.
//!
//! [`memo`] wraps an asynchronous, fallible operation so that it runs at most
//! once per distinct argument list:
//! - A resolved value is served from the cache without calling the operation
//! - Concurrent callers with the same arguments share one in-flight call
//! - A failure is handed to every waiter and then forgotten, so the next call
//!   with those arguments starts over
//!
//! There is no eviction, expiry, or size bound. Entries live as long as the
//! [`Memo`] (or any clone of it) does.
//!
//! # Cache keys
//!
//! Arguments are encoded by a dedicated serializer (see `key.rs`). Plain data
//! reads like compact JSON, but values JSON would conflate stay apart: `None`,
//! `Some(None)` and `()` get distinct tags, floats keep their fractional part,
//! and enum variants carry their type name. Map entries and struct fields are
//! sorted, so equal argument lists always produce the same key whatever the
//! insertion order of any maps inside them. Pass several arguments as a tuple.
//! NaN, the infinities and failing `Serialize` impls yield [`MemoError::Key`]
//! before the operation is invoked.

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{Instrument, debug, debug_span, trace, warn};

use crate::telemetry::spans;

mod key;

/// Error returned by [`Memo::call`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoError<E> {
    /// The argument list could not be canonically serialized.
    #[error("cannot derive memo key: {0}")]
    Key(String),

    /// The wrapped operation failed. The error is passed through unchanged.
    #[error("{0}")]
    Operation(E),
}

impl<E> MemoError<E> {
    /// The wrapped operation's error, if that is what this is.
    #[must_use]
    pub fn into_operation(self) -> Option<E> {
        match self {
            MemoError::Operation(e) => Some(e),
            MemoError::Key(_) => None,
        }
    }

    /// Whether key derivation failed (the operation never ran).
    #[must_use]
    pub fn is_key_error(&self) -> bool {
        matches!(self, MemoError::Key(_))
    }
}

/// Derive the canonical cache key for an argument list.
///
/// # Errors
/// Returns `UtilError::Serialization` if `args` contains a non-finite float or
/// its `Serialize` impl fails.
pub fn cache_key<A: Serialize + ?Sized>(args: &A) -> crate::error::Result<String> {
    key::encode(args)
}

/// Wrap `op` in a fresh, independent cache.
pub fn memo<A, V, E, F, Fut>(op: F) -> Memo<A, V, E, F>
where
    F: Fn(A) -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    Memo::new(op)
}

type Outcome<V, E> = Option<Result<V, E>>;

enum Slot<V, E> {
    /// The operation is running; its outcome is published on this channel.
    Pending(watch::Receiver<Outcome<V, E>>),
    Resolved(V),
}

struct MemoInner<V, E> {
    slots: HashMap<String, Slot<V, E>>,
    hits: u64,
    misses: u64,
    coalesced: u64,
    failures: u64,
}

/// Statistics about a memo cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Keys currently cached, resolved or in flight.
    pub entries: usize,
    /// Keys holding a resolved value.
    pub resolved: usize,
    /// Keys whose operation is still running.
    pub in_flight: usize,
    /// Calls served from a resolved value.
    pub hits: u64,
    /// Calls that invoked the operation.
    pub misses: u64,
    /// Calls that waited on another caller's in-flight operation.
    pub coalesced: u64,
    /// Operation invocations that failed.
    pub failures: u64,
}

/// A memoized asynchronous operation.
///
/// Cloning a `Memo` shares its cache; every [`memo`] call creates a new one.
pub struct Memo<A, V, E, F> {
    op: F,
    inner: Arc<Mutex<MemoInner<V, E>>>,
    _args: PhantomData<fn(A)>,
}

enum Step<V, E> {
    Hit(V),
    Wait(watch::Receiver<Outcome<V, E>>),
    Lead(watch::Sender<Outcome<V, E>>),
}

impl<A, V, E, F> Memo<A, V, E, F> {
    /// Wrap `op` in a fresh, independent cache.
    #[must_use]
    pub fn new(op: F) -> Self {
        Self {
            op,
            inner: Arc::new(Mutex::new(MemoInner {
                slots: HashMap::new(),
                hits: 0,
                misses: 0,
                coalesced: 0,
                failures: 0,
            })),
            _args: PhantomData,
        }
    }

    /// Number of cached keys, resolved or in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().slots.is_empty()
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        let inner = self.inner.lock();
        let resolved = inner
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Resolved(_)))
            .count();
        MemoStats {
            entries: inner.slots.len(),
            resolved,
            in_flight: inner.slots.len() - resolved,
            hits: inner.hits,
            misses: inner.misses,
            coalesced: inner.coalesced,
            failures: inner.failures,
        }
    }
}

impl<A, V, E, F> Memo<A, V, E, F>
where
    A: Serialize,
    V: Clone,
    E: Clone,
{
    /// Whether `args` has a cache entry, resolved or in flight.
    ///
    /// Arguments that cannot be serialized are never cached.
    pub fn contains(&self, args: &A) -> bool {
        cache_key(args).is_ok_and(|key| self.inner.lock().slots.contains_key(&key))
    }

    /// Call the memoized operation.
    ///
    /// # Errors
    /// `MemoError::Key` if `args` cannot be serialized, otherwise
    /// `MemoError::Operation` with the operation's own error. Failures are
    /// never cached.
    pub async fn call<Fut>(&self, args: A) -> Result<V, MemoError<E>>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = cache_key(&args).map_err(|e| MemoError::Key(e.to_string()))?;
        let span = debug_span!(spans::MEMO_CALL, key = %key);
        self.call_keyed(key, args).instrument(span).await
    }

    async fn call_keyed<Fut>(&self, key: String, args: A) -> Result<V, MemoError<E>>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        loop {
            match self.step(&key) {
                Step::Hit(value) => {
                    trace!("memo hit");
                    return Ok(value);
                }
                Step::Wait(mut rx) => {
                    trace!("joining in-flight call");
                    let outcome = rx
                        .wait_for(Option::is_some)
                        .await
                        .ok()
                        .and_then(|settled| (*settled).clone());
                    match outcome {
                        Some(result) => return result.map_err(MemoError::Operation),
                        // The leading call was dropped before settling.
                        None => continue,
                    }
                }
                Step::Lead(tx) => return self.lead(key, args, tx).await,
            }
        }
    }

    /// Check-and-insert under a single lock acquisition.
    fn step(&self, key: &str) -> Step<V, E> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        match inner.slots.get(key) {
            Some(Slot::Resolved(value)) => {
                inner.hits += 1;
                Step::Hit(value.clone())
            }
            Some(Slot::Pending(rx)) => {
                inner.coalesced += 1;
                Step::Wait(rx.clone())
            }
            None => {
                let (tx, rx) = watch::channel(None);
                inner.slots.insert(key.to_string(), Slot::Pending(rx));
                inner.misses += 1;
                Step::Lead(tx)
            }
        }
    }

    async fn lead<Fut>(
        &self,
        key: String,
        args: A,
        tx: watch::Sender<Outcome<V, E>>,
    ) -> Result<V, MemoError<E>>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        debug!("memo miss, invoking operation");
        let mut in_flight = InFlight {
            key,
            inner: &self.inner,
            settled: false,
        };

        let result = (self.op)(args).await;
        in_flight.settle(&result);

        // The slot's own receiver is gone by now; anyone left is a waiter.
        if tx.receiver_count() > 0 {
            tx.send_replace(Some(result.clone()));
        }
        result.map_err(MemoError::Operation)
    }
}

/// Owns a pending slot on behalf of the leading caller.
///
/// If the leader's future is dropped mid-call the slot is removed, which
/// drops the last sender and wakes waiters so one of them can take over.
struct InFlight<'a, V, E> {
    key: String,
    inner: &'a Mutex<MemoInner<V, E>>,
    settled: bool,
}

impl<V: Clone, E> InFlight<'_, V, E> {
    fn settle(&mut self, result: &Result<V, E>) {
        let mut inner = self.inner.lock();
        match result {
            Ok(value) => {
                inner
                    .slots
                    .insert(self.key.clone(), Slot::Resolved(value.clone()));
            }
            Err(_) => {
                inner.slots.remove(&self.key);
                inner.failures += 1;
                debug!("memoized operation failed, entry dropped");
            }
        }
        self.settled = true;
    }
}

impl<V, E> Drop for InFlight<'_, V, E> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(key = %self.key, "memoized call dropped before completion");
            self.inner.lock().slots.remove(&self.key);
        }
    }
}

impl<A, V, E, F: Clone> Clone for Memo<A, V, E, F> {
    fn clone(&self) -> Self {
        Self {
            op: self.op.clone(),
            inner: Arc::clone(&self.inner),
            _args: PhantomData,
        }
    }
}

impl<A, V, E, F> std::fmt::Debug for Memo<A, V, E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo").field("stats", &self.stats()).finish()
    }
}
