/* src/writer/error.rs */

/// Errors raised by [`AsyncWriter`](super::AsyncWriter) and its sessions.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
	/// The writer already has an open session.
	#[error("writer is already open")]
	InvalidState,

	/// The consumer returned and dropped its item view while the session was
	/// still being written to.
	#[error("consumer stopped reading before the session closed")]
	ConsumerGone,

	#[error("consumer panicked")]
	ConsumerPanicked,

	/// The background thread could not be started.
	#[error("failed to spawn consumer thread: {0}")]
	Spawn(std::io::Error),

	/// `StreamWriter::open` was called outside a tokio runtime.
	#[cfg(feature = "stream")]
	#[error("no tokio runtime to run the consumer on")]
	NoRuntime,

	/// The runtime shut down before the consumer task finished.
	#[cfg(feature = "stream")]
	#[error("consumer task was cancelled")]
	ConsumerCancelled,
}
