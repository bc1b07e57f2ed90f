//! Tab-aligned text encoding of a [`Partition`].
//!
//! The blob is a sequence of columns `tab_width` characters wide:
//! `<prefix><pad><glyphs><pad>` per group, then the ungrouped section, then the
//! wide section where each glyph is written as `" g "`.
//!
//! Lengths are counted in `char`s. Header padding is `tab_width - header.len()`
//! (applied only when the blob is off a column boundary) rather than the distance
//! to the next boundary; chat symbol maps built by earlier releases depend on that
//! exact byte layout, so it is kept as is.

use crate::config::EmoteConfig;
use crate::model::{Emote, Partition};

/// Wide glyphs are moved to the next column when fewer than this many cells remain.
const WIDE_MIN_ROOM: usize = 3;

/// Layout parameters, usually taken from [`EmoteConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    pub tab_width: usize,
    pub non_grouped_name: String,
    pub wide_name: String,
}

impl From<&EmoteConfig> for LayoutOptions {
    fn from(cfg: &EmoteConfig) -> Self {
        Self {
            tab_width: cfg.tab_width,
            non_grouped_name: cfg.non_grouped_emotes_group_name.clone(),
            wide_name: cfg.wide_emotes_group_name.clone(),
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::from(&EmoteConfig::default())
    }
}

/// Append-only string that tracks its length in chars.
struct Blob {
    text: String,
    len: usize,
    tab: usize,
}

impl Blob {
    fn new(tab: usize) -> Self {
        Self {
            text: String::new(),
            len: 0,
            tab: tab.max(1),
        }
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.len += s.chars().count();
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.len += 1;
    }

    fn spaces(&mut self, n: usize) {
        self.text.extend(std::iter::repeat_n(' ', n));
        self.len += n;
    }

    fn off_boundary(&self) -> usize {
        self.len % self.tab
    }

    fn room_left(&self) -> usize {
        self.tab - self.off_boundary()
    }

    fn header(&mut self, token: &str) {
        self.push_str(token);
        if self.off_boundary() != 0 {
            let n = self.tab.saturating_sub(token.chars().count());
            self.spaces(n);
        }
    }

    fn align(&mut self) {
        if self.off_boundary() != 0 {
            let n = self.room_left();
            self.spaces(n);
        }
    }

    fn glyphs(&mut self, emotes: &[Emote]) {
        for e in emotes {
            self.push_char(e.glyph);
        }
    }
}

/// Encodes `partition` into a single layout string.
pub fn encode(partition: &Partition, opts: &LayoutOptions) -> String {
    let mut blob = Blob::new(opts.tab_width);

    for group in &partition.grouped {
        if group.emotes.is_empty() {
            continue;
        }
        blob.header(&group.prefix);
        blob.glyphs(&group.emotes);
        blob.align();
    }

    blob.header(&opts.non_grouped_name);
    blob.glyphs(&partition.ungrouped);
    blob.align();

    blob.header(&opts.wide_name);
    for e in &partition.wide {
        if blob.off_boundary() != 0 && blob.room_left() < WIDE_MIN_ROOM {
            blob.align();
        }
        blob.push_char(' ');
        blob.push_char(e.glyph);
        blob.push_char(' ');
    }

    blob.text
}
