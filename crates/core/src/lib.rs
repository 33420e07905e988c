//! Insight client core: route table, navigation guard and the persisted
//! authentication session.
//!
//! Nothing in this crate touches the browser or the network. The web shell
//! supplies a [`storage::KeyValueStore`] backed by `localStorage`; tests and
//! native callers use [`storage::MemoryStore`].

pub mod config;
pub mod error;
pub mod guard;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod routes;
pub mod session;
pub mod storage;

pub use config::{ClientConfig, StorageKeys};
pub use error::{Error, Result};
pub use guard::{Navigation, Router, guard};
pub use routes::{ROUTES, RouteEntry, RouteMeta, RouteName, resolve};
pub use session::{SessionStore, User};
pub use storage::{KeyValueStore, MemoryStore};
