//! Non-owning reference to the live chat connection

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Points at a connection owned by the connection manager.
///
/// The store only keeps a weak reference: dropping the connection on the
/// owner's side is enough to close it, and the handle then reports dead.
#[derive(Clone)]
pub struct SocketHandle {
    conn: Weak<dyn Any + Send + Sync>,
}

impl SocketHandle {
    pub fn new<T: Any + Send + Sync>(conn: &Arc<T>) -> Self {
        let conn: Weak<T> = Arc::downgrade(conn);
        let conn: Weak<dyn Any + Send + Sync> = conn;
        Self { conn }
    }

    pub fn is_alive(&self) -> bool {
        self.conn.strong_count() > 0
    }

    /// Borrow the connection as `T`, if it is still open and of that type
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.conn.upgrade()?.downcast::<T>().ok()
    }
}

impl fmt::Debug for SocketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocketHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
