//! Bounded FIFO hand-off queue between producer and consumer threads.
//!
//! A mutex/condvar pair rather than a channel: the queue carries an
//! explicit capacity with a deliberate [`OverflowPolicy`] and a typed
//! close signal, so stream termination is never encoded as a reserved
//! payload value and every blocked caller wakes promptly on shutdown.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// What `push` does when the queue is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Block the producer until a consumer makes room.
    Block,
    /// Evict the oldest queued item to make room.
    DropOldest,
    /// Refuse the new item and hand it back to the caller.
    Reject,
}

/// Push failure, carrying the item back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The queue was full and the policy is [`OverflowPolicy::Reject`].
    Rejected(T),
    /// The queue has been closed.
    Closed(T),
}

impl<T> std::fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushError::Rejected(_) => write!(f, "queue full"),
            PushError::Closed(_) => write!(f, "queue closed"),
        }
    }
}

struct Inner<T> {
    buf: VecDeque<T>,
    closed: bool,
}

/// Blocking, FIFO, multi-producer queue with bounded capacity.
///
/// Items are moved through the queue; pops return them in strict FIFO
/// order relative to observed pushes. With a single producer this means
/// exact push order.
pub struct EventQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    policy: OverflowPolicy,
}

impl<T> EventQueue<T> {
    /// Creates a queue holding at most `capacity` items.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");
        Self {
            inner: Mutex::new(Inner {
                buf: VecDeque::with_capacity(capacity.min(1024)),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
            policy,
        }
    }

    /// Enqueues an item, waking one waiting consumer.
    ///
    /// At capacity the behavior follows the queue's [`OverflowPolicy`].
    /// Fails with [`PushError::Closed`] once the queue is closed; a
    /// producer blocked on a full queue also unblocks with that error
    /// when the queue closes under it.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return Err(PushError::Closed(item));
        }

        if inner.buf.len() >= self.capacity {
            match self.policy {
                OverflowPolicy::Block => {
                    while inner.buf.len() >= self.capacity && !inner.closed {
                        inner = self.not_full.wait(inner).unwrap();
                    }
                    if inner.closed {
                        return Err(PushError::Closed(item));
                    }
                }
                OverflowPolicy::DropOldest => {
                    inner.buf.pop_front();
                }
                OverflowPolicy::Reject => {
                    return Err(PushError::Rejected(item));
                }
            }
        }

        inner.buf.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Dequeues the oldest item, blocking while the queue is empty.
    ///
    /// Returns `None` only when the queue is closed and fully drained:
    /// items pushed before `close` are still delivered.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(item) = inner.buf.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if inner.closed {
                return None;
            }
            inner = self.not_empty.wait(inner).unwrap();
        }
    }

    /// Closes the queue, waking every blocked producer and consumer.
    /// Already-queued items remain poppable.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Advisory snapshot of the current queue length. Racy by design.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().buf.len()
    }

    /// Advisory emptiness check. Racy by design.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}
