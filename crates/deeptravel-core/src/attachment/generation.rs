use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one asynchronous request.
///
/// A result is applied only while its token is still the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// Issues [`Generation`] tokens. Issuing a new token invalidates all older ones.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token, making every earlier token stale.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued token.
    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, token: Generation) -> bool {
        self.current() == token
    }
}
