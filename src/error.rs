/* src/error.rs */

#[cfg(feature = "config")]
use crate::config::ConfigError;
#[cfg(feature = "writer")]
use crate::writer::WriterError;

/// Any error raised by this crate, for callers combining its modules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[cfg(feature = "config")]
	#[error("config error: {0}")]
	Config(#[from] ConfigError),

	#[cfg(feature = "writer")]
	#[error("writer error: {0}")]
	Writer(#[from] WriterError),
}
