use std::{fmt, fs, path::Path, str::FromStr};

use tracing::debug;

use super::{ConfigStore, Error, Result};

/// An in-memory copy of a git-style configuration file.
///
/// ```text
/// [core]
///     repositoryformatversion = 0
///     bare = false
/// [remote "origin"]
///     url = https://example.com/repo
/// ```
///
/// Section and key names are case-insensitive. Subsection names are
/// case-sensitive and are addressed as `"remote.origin"`. Sections and keys
/// keep the order in which they were first seen. A key that appears more
/// than once within a section keeps its last value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GitConfig {
    sections: Vec<Section>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl GitConfig {
    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut config = GitConfig::default();
        let mut current: Option<usize> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let name = parse_section_header(line, line_no)?;
                current = Some(config.section_index(&name));
                continue;
            }

            let section = current.ok_or(Error::MissingSection { line: line_no })?;
            let (key, value) = parse_entry(line, line_no)?;
            config.sections[section].set(key, value);
        }

        Ok(config)
    }

    /// Return the section names in file order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    fn section(&self, name: &str) -> Option<&Section> {
        let name = canonical_section(name);
        self.sections.iter().find(|s| s.name == name)
    }

    // Every section and key name must parse back from the text `Display`
    // writes. Line numbers refer to that text.
    fn validate(&self) -> Result<()> {
        let mut line = 0;
        for section in &self.sections {
            line += 1;
            let (name, sub) = split_subsection(&section.name);
            let sub_ok = sub.map_or(true, |s| !s.contains(|c: char| c == '\n' || c == '\0'));
            if !valid_section_name(name) || !sub_ok {
                return Err(Error::BadSectionHeader { line });
            }

            for (key, _) in &section.entries {
                line += 1;
                if !valid_key(key) {
                    return Err(Error::BadKey {
                        line,
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    // Index of the named section, appending an empty one if needed.
    fn section_index(&mut self, name: &str) -> usize {
        let name = canonical_section(name);
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name,
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

impl Section {
    fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: String, value: String) {
        let key = key.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl ConfigStore for GitConfig {
    fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)?;
        GitConfig::parse(&text)
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    fn set(&mut self, section: &str, key: &str, value: &str) {
        let index = self.section_index(section);
        self.sections[index].set(key.to_owned(), value.to_owned());
    }

    fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");
        self.validate()?;
        fs::write(path, self.to_string()).map_err(|e| e.into())
    }
}

impl FromStr for GitConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GitConfig::parse(s)
    }
}

impl fmt::Display for GitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            match split_subsection(&section.name) {
                (name, Some(sub)) => writeln!(f, "[{} \"{}\"]", name, escape(sub))?,
                (name, None) => writeln!(f, "[{}]", name)?,
            }

            for (key, value) in &section.entries {
                if needs_quotes(value) {
                    writeln!(f, "\t{} = \"{}\"", key, escape(value))?;
                } else {
                    writeln!(f, "\t{} = {}", key, value)?;
                }
            }
        }
        Ok(())
    }
}

// Section names are case-insensitive; subsection names are not.
fn canonical_section(name: &str) -> String {
    match split_subsection(name) {
        (name, Some(sub)) => format!("{}.{}", name.to_ascii_lowercase(), sub),
        (name, None) => name.to_ascii_lowercase(),
    }
}

fn split_subsection(name: &str) -> (&str, Option<&str>) {
    match name.find('.') {
        Some(dot) => (&name[..dot], Some(&name[dot + 1..])),
        None => (name, None),
    }
}

fn parse_section_header(line: &str, line_no: usize) -> Result<String> {
    let bad = || Error::BadSectionHeader { line: line_no };

    let close = line.rfind(']').ok_or_else(bad)?;
    let trailing = line[close + 1..].trim_start();
    if !(trailing.is_empty() || trailing.starts_with('#') || trailing.starts_with(';')) {
        return Err(bad());
    }

    let inner = line[1..close].trim();
    let (name, sub) = match inner.find(char::is_whitespace) {
        Some(space) => (&inner[..space], Some(inner[space..].trim())),
        None => (inner, None),
    };

    if !valid_section_name(name) {
        return Err(bad());
    }

    match sub {
        None => Ok(name.to_owned()),
        Some(sub) => {
            if sub.len() < 2 || !sub.starts_with('"') || !sub.ends_with('"') {
                return Err(bad());
            }
            let sub = unescape_subsection(&sub[1..sub.len() - 1]).ok_or_else(bad)?;
            Ok(format!("{}.{}", name, sub))
        }
    }
}

// `.` is allowed for the legacy `[section.subsection]` form, but never first.
fn valid_section_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

fn valid_key(key: &str) -> bool {
    key.starts_with(|c: char| c.is_ascii_alphabetic())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn unescape_subsection(quoted: &str) -> Option<String> {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, String)> {
    let (key, value) = match line.find(|c: char| matches!(c, '=' | '#' | ';')) {
        Some(eq) if line[eq..].starts_with('=') => (line[..eq].trim(), Some(&line[eq + 1..])),
        Some(comment) => (line[..comment].trim(), None),
        None => (line, None),
    };

    if !valid_key(key) {
        return Err(Error::BadKey {
            line: line_no,
            key: key.to_owned(),
        });
    }

    let value = match value {
        Some(raw) => parse_value(raw, line_no)?,
        // A key with no `=` is a boolean set to true.
        None => "true".to_owned(),
    };

    Ok((key.to_owned(), value))
}

fn parse_value(raw: &str, line_no: usize) -> Result<String> {
    let mut value = String::new();
    let mut pending_space = String::new();
    let mut in_quotes = false;
    let mut chars = raw.trim_start().chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                value.push_str(&pending_space);
                pending_space.clear();
                in_quotes = !in_quotes;
            }
            '\\' => {
                let escaped = match chars.next() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('"') => '"',
                    Some('\\') => '\\',
                    _ => return Err(Error::BadEscape { line: line_no }),
                };
                value.push_str(&pending_space);
                pending_space.clear();
                value.push(escaped);
            }
            '#' | ';' if !in_quotes => break,
            c if c.is_whitespace() && !in_quotes => pending_space.push(c),
            c => {
                value.push_str(&pending_space);
                pending_space.clear();
                value.push(c);
            }
        }
    }

    if in_quotes {
        return Err(Error::UnterminatedQuote { line: line_no });
    }

    Ok(value)
}

fn needs_quotes(value: &str) -> bool {
    value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(|c: char| matches!(c, '#' | ';' | '"' | '\\' | '\n' | '\t'))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
