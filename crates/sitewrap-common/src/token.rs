//! Process-unique window tokens.
//!
//! WebView callbacks fire before winit has handed out a `WindowId` we can
//! correlate against, so every managed window gets its own token at
//! creation time and all cross-component events are keyed by it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT: AtomicU64 = AtomicU64::new(1);

/// Identifies one managed window for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowToken(u64);

impl WindowToken {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Allocate a fresh token. Never returns the same value twice.
pub fn next_token() -> WindowToken {
    WindowToken(NEXT.fetch_add(1, Ordering::Relaxed))
}
