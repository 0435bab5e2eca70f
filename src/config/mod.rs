//! Repository configuration storage.
//!
//! A repository does not care how its `config` file is parsed. It only needs
//! something that implements [`ConfigStore`]: load a file, read and write
//! string values addressed by section and key, and save the result back.
//! [`GitConfig`] is the built-in implementation and reads and writes the
//! familiar git-config text format.

mod error;
pub use error::{Error, Result};

mod git_config;
pub use git_config::GitConfig;

use std::path::Path;

/// A key-value store organized into named sections.
///
/// Sections are addressed by name (`"core"`). Implementations that support
/// subsections address them as `"section.subsection"`.
pub trait ConfigStore: Sized {
    /// Read a store from the file at `path`.
    fn load(path: &Path) -> Result<Self>;

    /// Return the raw value for `key` in `section`, if present.
    fn get(&self, section: &str, key: &str) -> Option<&str>;

    /// Set `key` in `section` to `value`, creating the section if needed.
    fn set(&mut self, section: &str, key: &str, value: &str);

    /// Write the store to the file at `path`, replacing its contents.
    fn save(&self, path: &Path) -> Result<()>;

    /// Return the value for `key` in `section` as a signed integer.
    ///
    /// Returns `None` if the key is absent or doesn't parse as an integer.
    fn get_int(&self, section: &str, key: &str) -> Option<i64> {
        self.get(section, key)?.trim().parse().ok()
    }

    /// Return the value for `key` in `section` as a boolean.
    ///
    /// Accepts `true`/`yes`/`on`/`1` and `false`/`no`/`off`/`0`, ignoring case.
    fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        parse_bool(self.get(section, key)?)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" Yes "), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn typed_accessors() {
        let mut config = GitConfig::default();
        config.set("core", "repositoryformatversion", "0");
        config.set("core", "bare", "false");
        config.set("core", "name", "zero");

        assert_eq!(config.get_int("core", "repositoryformatversion"), Some(0));
        assert_eq!(config.get_int("core", "name"), None);
        assert_eq!(config.get_int("core", "missing"), None);

        assert_eq!(config.get_bool("core", "bare"), Some(false));
        assert_eq!(config.get_bool("core", "name"), None);
    }
}
