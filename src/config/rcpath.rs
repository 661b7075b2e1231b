/* src/config/rcpath.rs */

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the rc file location.
pub const RCPATH_ENV: &str = "HDFSCLI_RCPATH";

/// File name of the rc file inside the user's home directory.
pub const DEFAULT_RC_FILE: &str = ".hdfscli.cfg";

/// Where an rc file path came from.
///
/// Only the default location may be absent without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RcPath {
	/// Passed in by the caller.
	Explicit(PathBuf),
	/// Read from [`RCPATH_ENV`].
	Env(PathBuf),
	/// `~/.hdfscli.cfg`.
	Default(PathBuf),
}

impl RcPath {
	/// Resolves against the process environment and home directory.
	pub fn resolve(explicit: Option<&Path>) -> Option<Self> {
		Self::resolve_with(explicit, std::env::var_os(RCPATH_ENV), dirs::home_dir())
	}

	/// Resolves with the environment value and home directory supplied.
	///
	/// An empty environment value counts as unset.
	pub fn resolve_with(
		explicit: Option<&Path>,
		env: Option<OsString>,
		home: Option<PathBuf>,
	) -> Option<Self> {
		if let Some(path) = explicit {
			return Some(Self::Explicit(path.to_path_buf()));
		}
		if let Some(value) = env.filter(|v| !v.is_empty()) {
			return Some(Self::Env(PathBuf::from(value)));
		}
		home.map(|dir| Self::Default(dir.join(DEFAULT_RC_FILE)))
	}

	pub fn path(&self) -> &Path {
		match self {
			Self::Explicit(p) | Self::Env(p) | Self::Default(p) => p,
		}
	}

	/// Whether a missing file at this path is an error.
	pub fn is_required(&self) -> bool {
		!matches!(self, Self::Default(_))
	}
}
