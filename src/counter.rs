//! Sequence numbers for anonymous attachments.

use std::sync::atomic::{AtomicU64, Ordering};

const FIRST: u64 = 1;

/// Hands out the `N` in `attachmentN`.
///
/// Owned by whoever owns the test session and injected into the resolver.
/// The increment is atomic, so resolvers shared across threads never hand
/// out the same number twice.
#[derive(Debug)]
pub struct AttachmentCounter {
    next: AtomicU64,
}

impl AttachmentCounter {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(FIRST),
        }
    }

    /// The value the next anonymous attachment will receive.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Take the current value and advance.
    pub fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Start over at 1.
    pub fn reset(&self) {
        self.next.store(FIRST, Ordering::SeqCst);
    }
}

impl Default for AttachmentCounter {
    fn default() -> Self {
        Self::new()
    }
}
