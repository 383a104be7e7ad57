//! Browscap ini reader.
//!
//! # Responsibilities
//! - Stream `Entry` values out of a browscap `.ini` dataset
//! - Capture the dataset version from the `GJK_Browscap_Version` section
//!
//! # Design Decisions
//! - Streaming: one section is buffered at a time, entries keep file order
//! - `;` and `#` start comment lines; values may be wrapped in double quotes
//! - The iterator fuses after the first error

use std::io::{BufRead, Lines};

use crate::catalog::entry::Entry;
use crate::catalog::error::BuildError;

/// Section carrying dataset metadata instead of a pattern.
pub const VERSION_SECTION: &str = "GJK_Browscap_Version";

/// Key of the dataset version inside [`VERSION_SECTION`].
pub const VERSION_KEY: &str = "Version";

/// Iterator over the entries of a browscap ini stream.
pub struct IniEntries<R> {
    lines: Lines<R>,
    line_no: usize,
    current: Option<Entry>,
    in_version_section: bool,
    version: Option<String>,
    done: bool,
}

impl<R: BufRead> IniEntries<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            current: None,
            in_version_section: false,
            version: None,
            done: false,
        }
    }

    /// Dataset version, once the stream has been read past its version section.
    pub fn take_version(&mut self) -> Option<String> {
        self.version.take()
    }

    fn fail(&mut self, err: BuildError) -> Option<Result<Entry, BuildError>> {
        self.done = true;
        self.current = None;
        Some(Err(err))
    }

    /// Open a new section and hand back the one it closes, if any.
    fn open_section(&mut self, title: &str) -> Option<Entry> {
        let finished = self.current.take();
        self.in_version_section = title == VERSION_SECTION;
        if !self.in_version_section {
            self.current = Some(Entry::section(title));
        }
        finished
    }
}

impl<R: BufRead> Iterator for IniEntries<R> {
    type Item = Result<Entry, BuildError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let raw = match self.lines.next() {
                Some(Ok(raw)) => raw,
                Some(Err(e)) => return self.fail(e.into()),
                None => {
                    self.done = true;
                    return self.current.take().map(Ok);
                }
            };
            self.line_no += 1;

            let line = raw.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let Some(title) = header.strip_suffix(']') else {
                    return self.fail(BuildError::malformed(self.line_no, "unterminated section header"));
                };
                if title.is_empty() {
                    return self.fail(BuildError::malformed(self.line_no, "empty section name"));
                }
                let title = title.to_string();
                match self.open_section(&title) {
                    Some(finished) => return Some(Ok(finished)),
                    None => continue,
                }
            }

            let Some((key, value)) = line.split_once('=') else {
                return self.fail(BuildError::malformed(self.line_no, "expected key=value"));
            };
            let key = key.trim();
            let value = unquote(value.trim());

            if self.in_version_section {
                if key == VERSION_KEY {
                    self.version = Some(value.to_string());
                }
                continue;
            }

            match self.current.as_mut() {
                Some(entry) => {
                    entry.properties.insert(key.to_string(), value.to_string());
                }
                None => {
                    return self.fail(BuildError::malformed(self.line_no, "property outside of a section"));
                }
            }
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#";;; Provided courtesy of https://browscap.org/
[GJK_Browscap_Version]
Version=6001000
Released=Mon, 01 Jan 2024 00:00:00 +0000

[DefaultProperties]
Browser="DefaultProperties"
Crawler="false"

; Chrome 37.0
[Chrome 37.0]
Parent="DefaultProperties"
Browser="Chrome"
Version="37.0"

[Mozilla/5.0 (*Mac OS X*)*Chrome/37.0*Safari/*]
Parent="Chrome 37.0"
Platform=MacOSX
"#;

    fn read(input: &str) -> (Vec<Result<Entry, BuildError>>, Option<String>) {
        let mut entries = IniEntries::new(input.as_bytes());
        let items = entries.by_ref().collect();
        (items, entries.take_version())
    }

    #[test]
    fn test_reads_sections_in_order() {
        let (items, version) = read(SAMPLE);
        let entries: Vec<Entry> = items.into_iter().map(Result::unwrap).collect();

        assert_eq!(version.as_deref(), Some("6001000"));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "DefaultProperties",
                "Chrome 37.0",
                "Mozilla/5.0 (*Mac OS X*)*Chrome/37.0*Safari/*",
            ]
        );
        assert_eq!(entries[2].pattern, entries[2].name);
        assert_eq!(entries[2].property("Parent"), Some("Chrome 37.0"));
        assert_eq!(entries[2].property("Platform"), Some("MacOSX"));
        assert_eq!(entries[1].property("Version"), Some("37.0"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Chrome\""), "Chrome");
        assert_eq!(unquote("Chrome"), "Chrome");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn test_property_before_section() {
        let (items, _) = read("Browser=Chrome\n[a]\n");
        assert!(matches!(
            items.as_slice(),
            [Err(BuildError::Malformed { line: 1, .. })]
        ));
    }

    #[test]
    fn test_unterminated_header_fuses() {
        let (items, _) = read("[a]\nBrowser=A\n[b\n[c]\n");
        assert!(matches!(items.as_slice(), [Err(BuildError::Malformed { line: 3, .. })]));
    }

    #[test]
    fn test_line_without_assignment() {
        let (items, _) = read("[a]\nnot a property\n");
        assert!(matches!(items.as_slice(), [Err(BuildError::Malformed { line: 2, .. })]));
    }

    #[test]
    fn test_empty_input() {
        let (items, version) = read("");
        assert!(items.is_empty());
        assert!(version.is_none());
    }
}
