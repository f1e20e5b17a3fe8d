//! Catalog sources and persistence backends

pub mod fallback;
pub mod fixture;
pub mod in_memory;
#[cfg(feature = "remote")]
pub mod remote;

pub use fallback::FallbackStore;
pub use fixture::FixtureSource;
pub use in_memory::InMemoryStore;
#[cfg(feature = "remote")]
pub use remote::{RemoteClient, RemoteRow, RemoteTableSource, RemoteTableStore};
