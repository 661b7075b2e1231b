/* tests/rcpath_env.rs */

#![cfg(feature = "config")]

// Kept in its own test binary: these tests mutate the process environment.

use std::ffi::OsString;
use std::fs;
use std::sync::Mutex;

use hdfs_util::config::{Config, ConfigError, RCPATH_ENV};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets (or removes) `vars`, runs `f`, then restores the previous values.
fn with_env<T>(vars: &[(&str, Option<OsString>)], f: impl FnOnce() -> T) -> T {
	let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
	let previous: Vec<_> = vars
		.iter()
		.map(|(name, _)| (*name, std::env::var_os(name)))
		.collect();

	// SAFETY: every test in this binary holds ENV_LOCK while touching the environment.
	unsafe {
		for (name, value) in vars {
			match value {
				Some(value) => std::env::set_var(name, value),
				None => std::env::remove_var(name),
			}
		}
	}

	let out = f();

	// SAFETY: see above.
	unsafe {
		for (name, value) in previous {
			match value {
				Some(value) => std::env::set_var(name, value),
				None => std::env::remove_var(name),
			}
		}
	}
	out
}

#[test]
fn test_rcpath_from_environment() {
	let dir = tempfile::tempdir().unwrap();
	let rc = dir.path().join("env.cfg");
	fs::write(&rc, "[foo]\nbar=hello").unwrap();

	let loaded = with_env(&[(RCPATH_ENV, Some(rc.clone().into()))], || Config::load(None));
	let config = loaded.unwrap();
	assert_eq!(config.get("foo", "bar"), Some("hello"));
	assert_eq!(config.path(), Some(rc.as_path()));

	let missing = with_env(
		&[(RCPATH_ENV, Some(dir.path().join("absent.cfg").into()))],
		|| Config::load(None),
	);
	assert!(matches!(missing, Err(ConfigError::Unreadable { .. })));
}

#[test]
fn test_missing_default_rc_is_empty() {
	let home = tempfile::tempdir().unwrap();

	let loaded = with_env(
		&[(RCPATH_ENV, None), ("HOME", Some(home.path().into()))],
		|| Config::load(None),
	);

	let config = loaded.unwrap();
	assert_eq!(config.sections().count(), 0);
	assert!(config.path().is_none());
}

#[test]
fn test_default_rc_in_home_is_loaded() {
	let home = tempfile::tempdir().unwrap();
	let rc = home.path().join(hdfs_util::config::DEFAULT_RC_FILE);
	fs::write(&rc, "[dev.alias]\nurl=http://dev:50070\n").unwrap();

	let loaded = with_env(
		&[(RCPATH_ENV, None), ("HOME", Some(home.path().into()))],
		|| Config::load(None),
	);

	let config = loaded.unwrap();
	assert_eq!(config.get_alias("dev").unwrap()["url"], "http://dev:50070");
	assert_eq!(config.path(), Some(rc.as_path()));
}
