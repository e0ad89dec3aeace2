//! Deferred values and single-flight memoization.
//!
//! [`Deferred`] wraps a producer without caching: every [`Deferred::get`]
//! runs it again. [`SingleFlight`] is the caching counterpart for callers
//! that want a producer to run at most once, even under concurrent first
//! access.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

type Producer<T, E> = Arc<dyn Fn() -> Result<T, E> + Send + Sync>;

/// A value computed on demand by a shared producer.
///
/// Cloning a `Deferred` shares the producer, not a computed value.
pub struct Deferred<T, E> {
    producer: Producer<T, E>,
}

impl<T, E> Deferred<T, E> {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Build from an already shared producer.
    pub fn from_shared(producer: Arc<dyn Fn() -> Result<T, E> + Send + Sync>) -> Self {
        Self { producer }
    }

    /// Run the producer and return its result.
    pub fn get(&self) -> Result<T, E> {
        (self.producer)()
    }

    /// Derive a new deferred value that applies `f` to this one's output.
    ///
    /// Nothing runs until the returned value is asked for.
    pub fn map<U, F>(self, f: F) -> Deferred<U, E>
    where
        T: 'static,
        E: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let producer = self.producer;
        Deferred::new(move || producer().map(&f))
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

/// Memoizes the first successful result of a producer.
///
/// Concurrent callers that arrive before the value exists wait for the one
/// in-flight computation instead of starting their own. Failures are not
/// cached: the next call runs the producer again.
pub struct SingleFlight<T, E> {
    producer: Box<dyn Fn() -> Result<T, E> + Send + Sync>,
    cell: OnceCell<T>,
}

impl<T: Clone, E> SingleFlight<T, E> {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            producer: Box::new(producer),
            cell: OnceCell::new(),
        }
    }

    /// Return the memoized value, running the producer if none exists yet.
    pub fn get(&self) -> Result<T, E> {
        self.cell
            .get_or_try_init(|| {
                tracing::debug!("materializing memoized value");
                (self.producer)().map_err(|e| {
                    tracing::warn!("memoized producer failed, the next call will retry");
                    e
                })
            })
            .cloned()
    }

    /// Whether a value has been memoized.
    pub fn is_materialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Take the memoized value out, so the next [`get`](Self::get)
    /// recomputes it.
    pub fn take(&mut self) -> Option<T> {
        self.cell.take()
    }
}

impl<T, E> fmt::Debug for SingleFlight<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlight")
            .field("materialized", &self.cell.get().is_some())
            .finish_non_exhaustive()
    }
}
