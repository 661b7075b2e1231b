/* src/config/mod.rs */

//! rc file loading and alias resolution.
//!
//! The rc file is INI text. Connection profiles ("aliases") live in sections
//! named `<name>.alias`, or `<name>_alias` in older files:
//!
//! ```ini
//! [global]
//! default.alias = dev
//!
//! [dev.alias]
//! url = http://namenode:50070
//! user = alice
//! ```

mod error;
mod ini;
mod rcpath;

pub use error::ConfigError;
pub use ini::Section;
pub use rcpath::{DEFAULT_RC_FILE, RCPATH_ENV, RcPath};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexSet;

use ini::Sections;

#[cfg(feature = "logging")]
use log::debug;

/// Section holding crate-wide settings such as the default alias.
pub const GLOBAL_SECTION: &str = "global";

/// Alias section name formats, in lookup priority order.
const ALIAS_SUFFIXES: [&str; 2] = [".alias", "_alias"];

/// A parsed rc file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
	path: Option<PathBuf>,
	sections: Sections,
}

impl Config {
	/// Loads the rc file from `path`, `$HDFSCLI_RCPATH` or `~/.hdfscli.cfg`,
	/// in that order.
	///
	/// A missing default file yields an empty configuration; a missing file
	/// given explicitly or through the environment is an error.
	pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		let Some(rc) = RcPath::resolve(path) else {
			return Ok(Self::default());
		};
		if rc.is_required() {
			return Self::from_path(rc.path());
		}
		match fs::read_to_string(rc.path()) {
			Ok(text) => Self::from_text(&text, rc.path()),
			Err(e) if e.kind() == ErrorKind::NotFound => {
				#[cfg(feature = "logging")]
				debug!("No rc file at {:?}, using empty configuration", rc.path());
				Ok(Self::default())
			}
			Err(source) => Err(ConfigError::Unreadable {
				path: rc.path().to_path_buf(),
				source,
			}),
		}
	}

	/// Loads a single file which must exist.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_text(&text, path)
	}

	/// Loads several files in order; later files override earlier keys.
	pub fn from_paths<I, P>(paths: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut config = Self::default();
		for path in paths {
			let next = Self::from_path(path)?;
			ini::merge(&mut config.sections, next.sections);
			config.path = next.path;
		}
		Ok(config)
	}

	fn from_text(text: &str, path: &Path) -> Result<Self, ConfigError> {
		let sections = ini::parse(text, &path.display().to_string())?;
		#[cfg(feature = "logging")]
		debug!("Loaded {} section(s) from {:?}", sections.len(), path);
		Ok(Self {
			path: Some(path.to_path_buf()),
			sections,
		})
	}

	/// The last file this configuration was read from.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn sections(&self) -> impl Iterator<Item = &str> {
		self.sections.keys().map(String::as_str)
	}

	pub fn section(&self, name: &str) -> Option<&Section> {
		self.sections.get(name)
	}

	pub fn get(&self, section: &str, key: &str) -> Option<&str> {
		self.section(section)?.get(key).map(String::as_str)
	}

	/// Reads a flag; absent keys are `false`. See [`parse_boolean`].
	pub fn get_boolean(&self, section: &str, key: &str) -> bool {
		parse_boolean(&self.get(section, key))
	}

	/// Returns the section backing alias `name`, preferring `<name>.alias`
	/// over the legacy `<name>_alias`.
	pub fn get_alias(&self, name: &str) -> Result<&Section, ConfigError> {
		ALIAS_SUFFIXES
			.iter()
			.find_map(|suffix| self.sections.get(&format!("{name}{suffix}")))
			.ok_or_else(|| ConfigError::AliasNotFound {
				name: name.to_string(),
			})
	}

	/// Deserializes alias `name` into `T`.
	#[cfg(feature = "serde")]
	pub fn get_alias_as<T>(&self, name: &str) -> Result<T, ConfigError>
	where
		T: serde::de::DeserializeOwned,
	{
		let object = self
			.get_alias(name)?
			.iter()
			.map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
			.collect();
		serde_json::from_value(serde_json::Value::Object(object)).map_err(|source| {
			ConfigError::InvalidAlias {
				name: name.to_string(),
				source,
			}
		})
	}

	/// Names of all aliases under either naming convention, in file order.
	pub fn aliases(&self) -> Vec<&str> {
		let names: IndexSet<&str> = self
			.sections
			.keys()
			.filter_map(|section| {
				ALIAS_SUFFIXES
					.iter()
					.find_map(|suffix| section.strip_suffix(*suffix))
			})
			.filter(|name| !name.is_empty())
			.collect();
		names.into_iter().collect()
	}

	/// `default.alias` from the `[global]` section.
	pub fn default_alias(&self) -> Option<&str> {
		self.get(GLOBAL_SECTION, "default.alias")
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		Ok(Self {
			path: None,
			sections: ini::parse(text, "<string>")?,
		})
	}
}

/// Values [`parse_boolean`] accepts.
pub trait Truthy {
	fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
	fn is_truthy(&self) -> bool {
		*self
	}
}

impl Truthy for str {
	fn is_truthy(&self) -> bool {
		self.eq_ignore_ascii_case("true") || self.eq_ignore_ascii_case("yes")
	}
}

impl Truthy for String {
	fn is_truthy(&self) -> bool {
		self.as_str().is_truthy()
	}
}

impl<T: Truthy> Truthy for Option<T> {
	fn is_truthy(&self) -> bool {
		self.as_ref().is_some_and(|v| v.is_truthy())
	}
}

impl<T: Truthy + ?Sized> Truthy for &T {
	fn is_truthy(&self) -> bool {
		(**self).is_truthy()
	}
}

/// Coerces a flag value to a boolean.
///
/// Booleans pass through, `None` is `false`, and strings are `true` only when
/// they equal `"true"` or `"yes"` ignoring ASCII case.
pub fn parse_boolean<V: Truthy + ?Sized>(value: &V) -> bool {
	value.is_truthy()
}
