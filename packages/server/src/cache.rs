//! Invalidation signals for cached storefront views.

use tracing::debug;

/// Paths understood by the storefront cache layer.
pub mod views {
    /// Public listing index.
    pub const INDEX: &str = "/";
    /// Admin dashboard.
    pub const ADMIN: &str = "/admin";

    /// Public detail page for one listing.
    pub fn listing_detail(id: i32) -> String {
        format!("/{id}")
    }
}

/// Fire-and-forget invalidation of cached storefront views.
///
/// Implementations must never fail the calling mutation. When no cache
/// collaborator is wired up, use [`NoopViewCache`].
pub trait ViewCache: Send + Sync {
    fn invalidate(&self, path: &str);
}

pub struct NoopViewCache;

impl ViewCache for NoopViewCache {
    fn invalidate(&self, _path: &str) {}
}

/// Records each invalidation in the log stream.
pub struct LoggingViewCache;

impl ViewCache for LoggingViewCache {
    fn invalidate(&self, path: &str) {
        debug!(path, "invalidated cached view");
    }
}
