/* src/writer/mod.rs */

//! Producer/consumer handoff with a scoped lifecycle.
//!
//! A writer owns a consumer function. Opening a session creates a fresh
//! buffer and a background unit that calls the consumer with a lazy view of
//! that buffer; values written to the session reach the consumer in order.
//! Closing the session ends the view and waits for the consumer to return.
//! A writer has at most one open session at a time but can be reopened once
//! the previous session has closed.
//!
//! - [`AsyncWriter`]: background thread, consumer gets a blocking [`Items`] iterator.
//! - [`StreamWriter`]: tokio task, consumer gets an [`ItemStream`] (feature `stream`).

mod blocking;
mod error;
mod lifecycle;
#[cfg(feature = "stream")]
mod stream;

pub use blocking::{AsyncWriter, Items, Session};
pub use error::WriterError;

#[cfg(feature = "stream")]
pub use stream::{ItemStream, StreamSession, StreamWriter};
