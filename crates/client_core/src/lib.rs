//! Client core for the command terminal: session identity, HTTP transport, connection
//! handling and the transcript renderer.

pub mod controller;
pub mod error;
pub mod render;
pub mod session;
pub mod surface;
pub mod transport;

pub use controller::{ConnectionController, SharedRenderer};
pub use error::ClientError;
pub use render::Renderer;
pub use session::SessionToken;
pub use surface::{
    EntryHandle, EntryKind, TitleSurface, Transcript, TranscriptEntry, TranscriptSurface,
};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
