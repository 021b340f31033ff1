use crate::error::{NumberingError, Result};
use phonefield_core::Language;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

const FALLBACK_LANGUAGE: &str = "en";

/// Offline `prefix|description` tables, one per language.
///
/// Files follow the libphonenumber resource layout: `<dir>/<lang>/<code>.txt`,
/// where every prefix starts with the country calling code.
#[derive(Debug, Clone, Default)]
pub struct PrefixDescriptions {
    languages: HashMap<String, PrefixTable>,
}

#[derive(Debug, Clone, Default)]
struct PrefixTable {
    entries: HashMap<String, String>,
    longest: usize,
}

impl PrefixTable {
    fn insert(&mut self, prefix: &str, description: &str) {
        self.longest = self.longest.max(prefix.len());
        self.entries
            .insert(prefix.to_string(), description.to_string());
    }

    fn lookup(&self, digits: &str) -> Option<&str> {
        let upper = self.longest.min(digits.len());
        (1..=upper)
            .rev()
            .find_map(|len| digits.get(..len).and_then(|prefix| self.entries.get(prefix)))
            .map(String::as_str)
    }
}

impl PrefixDescriptions {
    /// Loads every language directory under `dir`. A missing `dir` yields an
    /// empty set of tables.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut descriptions = Self::default();
        if !dir.is_dir() {
            return Ok(descriptions);
        }

        for entry in read_dir(dir)? {
            let lang_dir = entry.path();
            if !lang_dir.is_dir() {
                continue;
            }
            let Some(lang) = lang_dir.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let lang = lang.to_ascii_lowercase();

            for file in read_dir(&lang_dir)? {
                let path = file.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                    continue;
                }
                let table = descriptions.languages.entry(lang.clone()).or_default();
                parse_prefix_file(&path, table)?;
            }
        }

        Ok(descriptions)
    }

    pub fn insert(&mut self, lang: &str, prefix: &str, description: &str) {
        self.languages
            .entry(lang.to_ascii_lowercase())
            .or_default()
            .insert(prefix, description);
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(|table| table.entries.is_empty())
    }

    /// Longest-prefix description of `digits` (E.164 without `+`), trying the
    /// requested language before English.
    pub fn describe(&self, digits: &str, language: &Language) -> Option<&str> {
        let short = language.short();
        let mut candidates = vec![short];
        if short != FALLBACK_LANGUAGE {
            candidates.push(FALLBACK_LANGUAGE);
        }

        candidates
            .into_iter()
            .filter_map(|lang| self.languages.get(lang))
            .find_map(|table| table.lookup(digits))
    }
}

fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let map_err = |source| NumberingError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(map_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(map_err)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

fn parse_prefix_file(path: &Path, table: &mut PrefixTable) -> Result<()> {
    let read_err = |source| NumberingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(read_err)?);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(read_err)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((prefix, description)) = line.split_once('|') else {
            continue;
        };
        let prefix = prefix.trim();
        if prefix.is_empty() || !prefix.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(NumberingError::InvalidPrefix {
                path: path.to_path_buf(),
                line: index + 1,
                prefix: prefix.to_string(),
            });
        }

        let description = description.trim();
        if description.is_empty() {
            continue;
        }
        table.insert(prefix, description);
    }

    Ok(())
}
