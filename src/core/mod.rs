// src/core/mod.rs
//! Session, transport and synchronization building blocks shared by every view

pub mod api_client;
pub mod collection;
pub mod operation;
pub mod session;
pub mod transport;

pub use api_client::ApiClient;
pub use collection::PagedCollection;
pub use operation::{OperationRunner, Phase};
pub use session::{FileTokenSlot, MemoryTokenSlot, SessionStore, TokenSlot};
pub use transport::{FileUpload, ReqwestTransport, Transport};
