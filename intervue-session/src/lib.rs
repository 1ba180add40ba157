//! Intervue Session - client-side session state and navigation gating
//!
//! This crate holds the authentication session (token + user) in memory,
//! mirrors it to a persistent credential store, and decides on every
//! navigation attempt whether to proceed or redirect.
//!
//! ## Architecture
//!
//! The session is an explicit context object: the HTTP layer and the
//! navigation guard both receive an `Arc<SessionStore>` rather than reaching
//! for ambient global state. Initialization is `load_from_storage`, teardown
//! is `logout`.

pub mod guard;
pub mod routes;
pub mod storage;
pub mod store;

pub use guard::{Navigation, NavigationGuard, Navigator, RecordingNavigator};
pub use routes::{home_route, RouteMeta, RouteTable};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY, USER_KEY};
pub use store::SessionStore;
