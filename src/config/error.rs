/* src/config/error.rs */

use std::path::PathBuf;

/// Errors raised while loading an rc file or resolving aliases.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// An explicitly requested rc file could not be read.
	#[error("unable to read rc file {path:?}: {source}")]
	Unreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The rc file is not valid INI. `line` is 0 when the parser did not
	/// report one.
	#[error("{origin}: {message}")]
	Syntax {
		origin: String,
		line: usize,
		message: String,
	},

	/// Neither `<name>.alias` nor `<name>_alias` exists.
	#[error("alias not found: {name}")]
	AliasNotFound { name: String },

	/// The alias section does not fit the requested type.
	#[cfg(feature = "serde")]
	#[error("invalid alias {name}: {source}")]
	InvalidAlias {
		name: String,
		#[source]
		source: serde_json::Error,
	},
}
