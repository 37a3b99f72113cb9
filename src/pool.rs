//! Deduplicating string pool used for source-path interning.
//!
//! A pool lives for one encoding session (one resource-table encode, or one
//! output stream) and is flattened into an opaque byte blob at the end.
//! Indices handed out by [`StringPool::make_ref`] are stable only within one
//! pool instance.

use std::collections::HashMap;

/// Index into a [`StringPool`], obtained via a deduplicating insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ref(u32);

impl Ref {
    /// The zero-based index of the interned string.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Ordered sequence of unique strings.
///
/// Lookup is hash-based; insertion order is preserved so that flattened
/// output lists strings in the order they were first interned.
#[derive(Debug, Default)]
pub struct StringPool {
    entries: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `value`, returning the existing ref if it was seen before.
    pub fn make_ref(&mut self, value: &str) -> Ref {
        if let Some(&index) = self.lookup.get(value) {
            return Ref(index);
        }
        let index = self.entries.len() as u32;
        self.entries.push(value.to_string());
        self.lookup.insert(value.to_string(), index);
        Ref(index)
    }

    /// Returns the string behind a ref, if the ref came from this pool.
    pub fn get(&self, r: Ref) -> Option<&str> {
        self.entries.get(r.index() as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes all interned strings, in index order, into one contiguous
    /// blob: a little-endian `u32` count, then per string a little-endian
    /// `u32` byte length, the UTF-8 bytes, and a NUL terminator.
    ///
    /// The blob is embedded in the table output as raw bytes; consumers
    /// decode it with the matching sub-format.
    pub fn flatten(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.entries.iter().map(|s| s.len() + 5).sum::<usize>());
        out.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        for entry in &self.entries {
            out.extend_from_slice(&(entry.len() as u32).to_le_bytes());
            out.extend_from_slice(entry.as_bytes());
            out.push(0);
        }
        out
    }
}
