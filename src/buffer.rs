//! Append-only ordered buffers.
//!
//! A document build keeps two of these: one of markup [`Fragment`]s and one of
//! menu options. Items are only ever appended, and come back out in the order
//! they went in.

use std::fmt;

/// One immutable unit of serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(Box<str>);

impl Fragment {
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer<T> {
    items: Vec<T>,
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Buffer<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a buffer pre-seeded with `initial`, in order.
    pub fn with_initial(initial: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: initial.into_iter().collect(),
        }
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn snapshot(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Releases the buffer, handing back everything it held.
    pub fn dispose(self) -> Vec<T> {
        self.items
    }
}

impl Buffer<Fragment> {
    /// Concatenates every fragment in insertion order.
    pub fn render(&self) -> String {
        let capacity = self.items.iter().map(Fragment::len).sum();
        let mut output = String::with_capacity(capacity);
        for fragment in &self.items {
            output.push_str(fragment.as_str());
        }
        output
    }
}
