use serde::{Deserialize, Serialize};

/// A named emote mapped to a single font glyph, with its source image size in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    pub name: String,
    pub glyph: char,
    pub width: u32,
    pub height: u32,
}

impl Emote {
    /// Returns `None` when either dimension is zero.
    pub fn new(name: impl Into<String>, glyph: char, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            name: name.into(),
            glyph,
            width,
            height,
        })
    }
}

/// Font metadata file (`default.json`): `{ "providers": [ { "file", "chars", ... } ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontMetadata {
    #[serde(default)]
    pub providers: Vec<FontProvider>,
}

/// One font provider. Other keys (`type`, `ascent`, `height`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontProvider {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub chars: Vec<String>,
}

/// Emotes that share a name prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoteGroup {
    pub prefix: String,
    pub emotes: Vec<Emote>,
}

/// Classification of a catalog into three disjoint parts.
///
/// `grouped` keeps the configured prefix order and never holds an empty group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub wide: Vec<Emote>,
    pub grouped: Vec<EmoteGroup>,
    pub ungrouped: Vec<Emote>,
}

impl Partition {
    /// Total number of emotes across all parts.
    pub fn len(&self) -> usize {
        self.wide.len() + self.ungrouped.len() + self.grouped_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn grouped_len(&self) -> usize {
        self.grouped.iter().map(|g| g.emotes.len()).sum()
    }

    pub fn group(&self, prefix: &str) -> Option<&EmoteGroup> {
        self.grouped.iter().find(|g| g.prefix == prefix)
    }

    pub fn stats(&self) -> PartitionStats {
        PartitionStats {
            total: self.len(),
            wide: self.wide.len(),
            groups: self.grouped.len(),
            grouped: self.grouped_len(),
            ungrouped: self.ungrouped.len(),
        }
    }
}

/// Counts per partition, reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub total: usize,
    pub wide: usize,
    /// Number of non-empty prefix groups.
    pub groups: usize,
    /// Emotes placed in any prefix group.
    pub grouped: usize,
    pub ungrouped: usize,
}
