//! In-process storage: the session map and the user store.
//!
//! Both live only as long as the process; nothing is written to disk.

pub mod session;
pub mod user;

pub use session::SessionStore;
pub use user::{InMemoryUserStore, UserResolver, UserStoreError};
