/* src/config/ini.rs */

use configparser::ini::{Ini, IniDefault};
use indexmap::IndexMap;

use super::ConfigError;

/// Key/value pairs of one rc-file section, in file order.
pub type Section = IndexMap<String, String>;

pub(crate) type Sections = IndexMap<String, Section>;

/// Where `configparser` files keys that appear before any header.
const DEFAULT_SECTION: &str = "default";

/// Parses INI text with Python `configparser` rules. `origin` only shows up
/// in syntax errors.
///
/// Section names keep their case, keys are lower-cased and indented lines
/// continue the previous value. A key without a delimiter maps to `""`.
pub(crate) fn parse(text: &str, origin: &str) -> Result<Sections, ConfigError> {
	let mut defaults = IniDefault::default();
	defaults.case_sensitive = true;
	defaults.multiline = true;
	defaults.default_section = DEFAULT_SECTION.to_string();

	let parsed = Ini::new_from_defaults(defaults)
		.read(text.to_string())
		.map_err(|message| syntax(origin, message))?;

	let mut sections = Sections::new();
	for (name, pairs) in parsed {
		if name == DEFAULT_SECTION && pairs.is_empty() {
			continue;
		}
		let section = sections.entry(name).or_default();
		for (key, value) in pairs {
			section.insert(key.to_lowercase(), value.unwrap_or_default());
		}
	}
	Ok(sections)
}

/// Folds `from` into `into`; keys already present are overwritten in place.
pub(crate) fn merge(into: &mut Sections, from: Sections) {
	for (name, section) in from {
		into.entry(name).or_default().extend(section);
	}
}

/// `configparser` reports errors as `"line N: ..."` strings.
fn syntax(origin: &str, message: String) -> ConfigError {
	let line = message
		.split_once("line ")
		.map(|(_, rest)| rest)
		.and_then(|rest| {
			let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
			digits.parse().ok()
		})
		.unwrap_or(0);
	ConfigError::Syntax {
		origin: origin.to_string(),
		line,
		message,
	}
}
