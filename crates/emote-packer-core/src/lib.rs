//! Core library for turning a resource pack's emote font into a chat symbol layout.
//!
//! - Catalog: reads the font metadata (`default.json`) and probes each emote image for its size
//! - Classify: splits the catalog into wide, prefix-grouped and ungrouped emotes
//! - Layout: encodes the partition as one tab-aligned text blob
//! - Pipeline: `run` extracts the pack, injects the blob into the template and repacks it
//!
//! Quick example:
//! ```ignore
//! use emote_packer_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let cfg = EmoteConfig::builder().tab_width(10).wide_ratio(1.6).build();
//! let catalog = build_catalog(std::path::Path::new("my_pack"), &cfg)?;
//! let partition = classify(&catalog, &cfg.group_prefixes, cfg.wide_width_to_height);
//! let text = encode(&partition, &LayoutOptions::from(&cfg));
//! println!("{text}");
//! # Ok(()) }
//! ```

pub mod archive;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;

pub use catalog::*;
pub use classify::*;
pub use config::*;
pub use error::*;
pub use layout::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `emote_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{EmoteConfig, EmoteConfigBuilder, LoadedConfig, ToolPaths};
    pub use crate::error::{EmotePackerError, Result};
    pub use crate::layout::LayoutOptions;
    pub use crate::model::{Emote, EmoteGroup, Partition, PartitionStats};
    pub use crate::pipeline::{
        Count, LayoutProduct, NullObserver, PipelineObserver, PipelineOutcome, Stage,
    };
    pub use crate::{build_catalog, build_layout, classify, encode, is_wide, run};
}
