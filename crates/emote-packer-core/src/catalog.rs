use crate::config::EmoteConfig;
use crate::error::{EmotePackerError, Result};
use crate::model::{Emote, FontMetadata, FontProvider};
use image::{ImageError, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Finds the first regular file called `name` under `root`.
///
/// Walk order is top-down and deterministic: within a directory, files come
/// before subdirectories and both are visited in name order.
pub fn find_file(root: &Path, name: &str) -> Result<Option<PathBuf>> {
    let walker = WalkDir::new(root).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == name {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// Parses a font metadata file.
pub fn read_metadata(path: &Path) -> Result<FontMetadata> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| EmotePackerError::MetadataParse {
        path: path.to_path_buf(),
        source,
    })
}

/// True when the provider's file path contains the emote designation substring.
pub fn is_emote_entry(provider: &FontProvider, marker: &str) -> bool {
    provider.file.contains(marker)
}

/// Last `/` segment of a provider path (`myemotes:font/emotes/pepeLaugh.png` -> `pepeLaugh.png`).
pub fn image_file_name(file: &str) -> &str {
    file.rsplit('/').next().unwrap_or(file)
}

/// Image file name up to its first `.`.
pub fn emote_name_from_file(file: &str) -> &str {
    let image = image_file_name(file);
    image.split('.').next().unwrap_or(image)
}

/// Reads pixel dimensions from the image header; the pixels are not decoded.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let unreadable = |source: ImageError| EmotePackerError::ImageUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(|e| unreadable(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| unreadable(ImageError::IoError(e)))?;
    reader.into_dimensions().map_err(unreadable)
}

/// Builds the emote catalog for the pack at `root`.
///
/// Order follows the metadata's provider order. An empty result is not an error here;
/// the pipeline decides what "no emotes" means.
pub fn build_catalog(root: &Path, cfg: &EmoteConfig) -> Result<Vec<Emote>> {
    build_catalog_with_progress(root, cfg, &mut |_, _| {})
}

/// Same as [`build_catalog`], calling `progress(done, total)` after each image is probed.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn build_catalog_with_progress(
    root: &Path,
    cfg: &EmoteConfig,
    progress: &mut dyn FnMut(usize, usize),
) -> Result<Vec<Emote>> {
    let metadata_path = find_file(root, &cfg.get_emotes_data_from)?.ok_or_else(|| {
        EmotePackerError::MetadataNotFound {
            file_name: cfg.get_emotes_data_from.clone(),
            root: root.to_path_buf(),
        }
    })?;
    debug!(path = %metadata_path.display(), "metadata found");
    let metadata = read_metadata(&metadata_path)?;

    let candidates: Vec<&FontProvider> = metadata
        .providers
        .iter()
        .filter(|p| is_emote_entry(p, &cfg.how_to_define_if_emote))
        .collect();
    let total = candidates.len();
    let images_dir = root.join(&cfg.emotes_dir);

    let mut emotes = Vec::with_capacity(total);
    for (idx, provider) in candidates.into_iter().enumerate() {
        let Some(glyph) = provider.chars.first().and_then(|c| c.chars().next()) else {
            warn!(file = %provider.file, "emote entry without chars, skipped");
            progress(idx + 1, total);
            continue;
        };
        if provider.chars[0].chars().nth(1).is_some() {
            warn!(
                file = %provider.file,
                row = %provider.chars[0],
                "emote entry maps several chars, only the first is used"
            );
        }
        let image_path = images_dir.join(image_file_name(&provider.file));
        let (w, h) = probe_dimensions(&image_path)?;
        match Emote::new(emote_name_from_file(&provider.file), glyph, w, h) {
            Some(e) => emotes.push(e),
            None => warn!(path = %image_path.display(), "zero-sized emote image, skipped"),
        }
        progress(idx + 1, total);
    }
    debug!(count = emotes.len(), "catalog built");
    Ok(emotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_last_segment_before_first_dot() {
        assert_eq!(emote_name_from_file("myemotes:font/emotes/pepeLaugh.png"), "pepeLaugh");
        assert_eq!(emote_name_from_file("a/b/c.d.png"), "c");
        assert_eq!(emote_name_from_file("plain"), "plain");
        assert_eq!(image_file_name("myemotes:font/emotes/x.png"), "x.png");
    }

    #[test]
    fn marker_is_a_substring_match() {
        let p = FontProvider {
            file: "myemotes:font/emotes/x.png".into(),
            chars: vec!["\u{e000}".into()],
        };
        assert!(is_emote_entry(&p, "myemotes"));
        assert!(is_emote_entry(&p, "font/emo"));
        assert!(!is_emote_entry(&p, "minecraft"));
    }
}
