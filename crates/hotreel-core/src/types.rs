//! Core types shared across the binding, hotkey and playback layers

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of one playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Association between a key combination and a media file path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Key combination in hotkey syntax, e.g. `shift+t`
    pub key: String,
    /// Media file path, not checked for existence
    pub path: String,
}

impl Binding {
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// Ordered mapping from key combination to file path.
///
/// Keys are unique. Re-inserting an existing key replaces its path in
/// place, so display order follows first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    entries: Vec<Binding>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a binding, returning the previous path if any
    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) -> Option<String> {
        let key = key.into();
        let path = path.into();
        match self.entries.iter_mut().find(|b| b.key == key) {
            Some(existing) => Some(std::mem::replace(&mut existing.path, path)),
            None => {
                self.entries.push(Binding { key, path });
                None
            }
        }
    }

    /// Remove a binding, returning its path if it existed
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|b| b.key == key)?;
        Some(self.entries.remove(index).path)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.path.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|b| b.key.as_str())
    }

    /// Tagged display items for the settings list
    pub fn entries(&self) -> Vec<BindingEntry> {
        self.entries.iter().map(BindingEntry::from).collect()
    }
}

impl<K: Into<String>, P: Into<String>> FromIterator<(K, P)> for BindingSet {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut set = BindingSet::new();
        for (key, path) in iter {
            set.insert(key, path);
        }
        set
    }
}

impl Serialize for BindingSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for binding in &self.entries {
            map.serialize_entry(&binding.key, &binding.path)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BindingSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BindingSetVisitor;

        impl<'de> Visitor<'de> for BindingSetVisitor {
            type Value = BindingSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping key combinations to file paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<BindingSet, A::Error> {
                let mut set = BindingSet::new();
                while let Some((key, path)) = map.next_entry::<String, String>()? {
                    set.insert(key, path);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(BindingSetVisitor)
    }
}

/// List item for a binding: the key it refers to plus its rendered text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub key: String,
    pub display: String,
}

impl From<&Binding> for BindingEntry {
    fn from(binding: &Binding) -> Self {
        Self {
            key: binding.key.clone(),
            display: format!("{}: {}", binding.key, binding.path),
        }
    }
}

/// Native video dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Window size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Placement of the display surface inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SurfaceRect {
    /// Rectangle covering the whole window
    pub fn full(window: WindowSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: window.width,
            height: window.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut set = BindingSet::new();
        assert_eq!(set.insert("ctrl+1", "a.mp4"), None);
        set.insert("ctrl+2", "b.mp4");
        assert_eq!(set.insert("ctrl+1", "c.mp4"), Some("a.mp4".to_string()));

        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["ctrl+1", "ctrl+2"]);
        assert_eq!(set.get("ctrl+1"), Some("c.mp4"));
    }

    #[test]
    fn test_remove() {
        let mut set: BindingSet = [("a", "x.mp4"), ("b", "y.mp4")].into_iter().collect();
        assert_eq!(set.remove("a"), Some("x.mp4".to_string()));
        assert_eq!(set.remove("a"), None);
        assert_eq!(set.len(), 1);
        assert!(!set.contains("a"));
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"shift+t":"t.mp4","ctrl+1":"a.mp4","alt+z":"z.mp4"}"#;
        let set: BindingSet = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["shift+t", "ctrl+1", "alt+z"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), json);
    }

    #[test]
    fn test_json_rejects_nested_values() {
        let json = r#"{"ctrl+1": {"path": "a.mp4"}}"#;
        assert!(serde_json::from_str::<BindingSet>(json).is_err());
        assert!(serde_json::from_str::<BindingSet>("[]").is_err());
    }

    #[test]
    fn test_entry_display() {
        let set: BindingSet = [("ctrl+1", "C:/media/a:b.mp4")].into_iter().collect();
        let entries = set.entries();
        assert_eq!(entries[0].key, "ctrl+1");
        assert_eq!(entries[0].display, "ctrl+1: C:/media/a:b.mp4");
    }
}
