//! Tag and attribute name casing.
//!
//! Verbs and attribute keys are written as snake_case identifiers and
//! rendered as `PascalCase` tags and `camelCase` attributes. Conversions are
//! memoised process-wide in a bounded cache since every document converts the
//! same handful of names over and over.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Case {
    /// `end_conference_on_exit` -> `EndConferenceOnExit`
    Pascal,
    /// `finish_on_key` -> `finishOnKey`
    Camel,
}

/// Names kept per case before conversions stop being stored
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Default)]
struct Tables {
    pascal: HashMap<Box<str>, Arc<str>>,
    camel: HashMap<Box<str>, Arc<str>>,
}

impl Tables {
    fn get(&self, case: Case) -> &HashMap<Box<str>, Arc<str>> {
        match case {
            Case::Pascal => &self.pascal,
            Case::Camel => &self.camel,
        }
    }

    fn get_mut(&mut self, case: Case) -> &mut HashMap<Box<str>, Arc<str>> {
        match case {
            Case::Pascal => &mut self.pascal,
            Case::Camel => &mut self.camel,
        }
    }
}

/// Memoised conversions, at most `capacity` names per case.
///
/// Once a case is full, new names are converted on every call and never
/// stored, so keys built from caller data cannot grow the cache.
pub struct NameCache {
    tables: RwLock<Tables>,
    capacity: usize,
}

impl Default for NameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NameCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            capacity,
        }
    }

    pub fn convert(&self, case: Case, name: &str) -> Arc<str> {
        if let Some(converted) = self.tables.read().get(case).get(name) {
            return Arc::clone(converted);
        }

        let converted: Arc<str> = Arc::from(convert_uncached(case, name));
        let mut write_guard = self.tables.write();
        let table = write_guard.get_mut(case);
        if table.len() >= self.capacity && !table.contains_key(name) {
            return converted;
        }
        Arc::clone(table.entry(Box::from(name)).or_insert(converted))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored conversions across both cases.
    pub fn len(&self) -> usize {
        let tables = self.tables.read();
        tables.pascal.len() + tables.camel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static NAMES: LazyLock<NameCache> = LazyLock::new(NameCache::new);

/// Converts a snake_case tag identifier to its `PascalCase` tag name.
pub fn pascal_case(name: &str) -> Arc<str> {
    NAMES.convert(Case::Pascal, name)
}

/// Converts a snake_case attribute key to its `camelCase` attribute name.
pub fn camel_case(name: &str) -> Arc<str> {
    NAMES.convert(Case::Camel, name)
}

fn convert_uncached(case: Case, name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 && case == Case::Camel {
            out.push_str(word);
        } else {
            capitalize_into(word, &mut out);
        }
    }
    out
}

fn capitalize_into(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
