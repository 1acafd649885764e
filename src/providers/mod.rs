//! Concrete [`SessionProvider`](crate::provider::SessionProvider) implementations

pub mod archive;
pub mod memory;

pub use archive::{ArchiveProvider, event_slug};
pub use memory::MemoryProvider;
