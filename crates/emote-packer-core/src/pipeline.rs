use crate::archive::{extract_zip, is_zip, zip_dir};
use crate::catalog::{build_catalog_with_progress, find_file};
use crate::classify::classify;
use crate::config::{EmoteConfig, ToolPaths};
use crate::error::{EmotePackerError, Result};
use crate::layout::{LayoutOptions, encode};
use crate::model::{Partition, PartitionStats};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Appended to the directory an archived pack is extracted into.
pub const UNZIPPED_SUFFIX: &str = "_unzipped";
/// Prepended to the output pack name.
pub const MODIFIED_PREFIX: &str = "modified_";
/// File inside the template that receives the layout.
pub const RESULT_TEMPLATE_NAME: &str = "result.txt";
/// Stripped from the template directory name when it is copied into the pack.
pub const TEMPLATE_SUFFIX: &str = ".exemple";

/// Named checkpoints reported to a [`PipelineObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LocatePack,
    Extract,
    Catalog,
    Classify,
    Encode,
    CopyTemplate,
    InjectResult,
    Rename,
    Archive,
    Cleanup,
}

/// Counts reported while building the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Emotes,
    Wide,
    Groups,
    Ungrouped,
}

/// Receives progress from [`run`] and [`build_layout`]. All methods default to no-ops,
/// so the pipeline itself never prints anything.
pub trait PipelineObserver {
    fn stage_started(&mut self, _stage: Stage) {}
    fn stage_completed(&mut self, _stage: Stage) {}
    fn count_found(&mut self, _what: Count, _n: usize) {}
    fn emote_probed(&mut self, _done: usize, _total: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

/// Classified catalog and its encoded text.
#[derive(Debug, Clone)]
pub struct LayoutProduct {
    pub partition: Partition,
    pub text: String,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Final pack location (a `.zip` file when `archived`, otherwise a directory).
    pub output: PathBuf,
    pub archived: bool,
    /// Whether the input pack was a zip.
    pub was_archive: bool,
    pub stats: PartitionStats,
    pub layout: String,
}

/// First entry of `root` (in name order) that is a directory or a zip archive,
/// skipping names listed in `ignore`.
pub fn locate_pack(root: &Path, ignore: &[String]) -> Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(root)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let name = entry.file_name();
        if ignore.iter().any(|i| name == i.as_str()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() || is_zip(&path) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Sibling directory an archive is extracted into: `{parent}/{stem}_unzipped`.
pub fn unzipped_path(archive: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    archive.with_file_name(format!("{stem}{UNZIPPED_SUFFIX}"))
}

/// Sibling path for the finished pack: `modified_` prefix, `_unzipped` marker removed.
pub fn modified_path(pack_root: &Path) -> PathBuf {
    let name = pack_root
        .file_name()
        .map(|s| s.to_string_lossy().replace(UNZIPPED_SUFFIX, ""))
        .unwrap_or_default();
    pack_root.with_file_name(format!("{MODIFIED_PREFIX}{name}"))
}

/// Where the template lands inside the pack.
pub fn template_destination(pack_root: &Path, cfg: &EmoteConfig) -> PathBuf {
    pack_root
        .join(&cfg.where_to_save_symbol_chat_exemple)
        .join(cfg.symbol_chat_exemple_dir.replace(TEMPLATE_SUFFIX, ""))
}

/// Recursively copies `src` into `dest`, overwriting files that already exist.
pub fn copy_dir_all(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Writes `text` into a `result.txt` under `template_dir` and renames it to
/// `{result_name}.txt`, replacing any file of that name. Returns the final path.
///
/// When the template holds several `result.txt` files only the first one in
/// [`find_file`] order (top-down, files before subdirectories, by name) is used.
pub fn inject_result(template_dir: &Path, result_name: &str, text: &str) -> Result<PathBuf> {
    let result_txt = find_file(template_dir, RESULT_TEMPLATE_NAME)?.ok_or_else(|| {
        EmotePackerError::ResultTemplateNotFound {
            dir: template_dir.to_path_buf(),
        }
    })?;
    fs::write(&result_txt, text)?;
    let renamed = result_txt.with_file_name(format!("{result_name}.txt"));
    if renamed != result_txt {
        if renamed.exists() {
            fs::remove_file(&renamed)?;
        }
        fs::rename(&result_txt, &renamed)?;
    }
    Ok(renamed)
}

/// Catalog, classify and encode the pack at `pack_root`. Reads only.
#[instrument(skip_all, fields(pack = %pack_root.display()))]
pub fn build_layout(
    pack_root: &Path,
    cfg: &EmoteConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<LayoutProduct> {
    cfg.validate()?;

    observer.stage_started(Stage::Catalog);
    let catalog = build_catalog_with_progress(pack_root, cfg, &mut |done, total| {
        observer.emote_probed(done, total)
    })?;
    if catalog.is_empty() {
        return Err(EmotePackerError::NoEmotesFound);
    }
    observer.count_found(Count::Emotes, catalog.len());
    observer.stage_completed(Stage::Catalog);

    observer.stage_started(Stage::Classify);
    let partition = classify(&catalog, &cfg.group_prefixes, cfg.wide_width_to_height);
    observer.count_found(Count::Wide, partition.wide.len());
    observer.count_found(Count::Groups, partition.grouped.len());
    observer.count_found(Count::Ungrouped, partition.ungrouped.len());
    observer.stage_completed(Stage::Classify);

    observer.stage_started(Stage::Encode);
    let text = encode(&partition, &LayoutOptions::from(cfg));
    observer.stage_completed(Stage::Encode);

    Ok(LayoutProduct { partition, text })
}

/// Runs the whole transformation: locate the pack, extract it if zipped, build the
/// layout, inject it into the template, rename the pack and re-archive when needed.
///
/// Nothing is rolled back on failure; a half-processed pack stays on disk.
#[instrument(skip_all, fields(root = %paths.root.display()))]
pub fn run(
    paths: &ToolPaths,
    cfg: &EmoteConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<PipelineOutcome> {
    cfg.validate()?;

    observer.stage_started(Stage::LocatePack);
    let pack = locate_pack(&paths.root, &paths.ignore)?.ok_or_else(|| {
        EmotePackerError::NoPackFound {
            root: paths.root.clone(),
        }
    })?;
    let was_archive = is_zip(&pack);
    debug!(pack = %pack.display(), was_archive, "pack located");
    observer.stage_completed(Stage::LocatePack);

    let pack_root = if was_archive {
        observer.stage_started(Stage::Extract);
        let dest = unzipped_path(&pack);
        extract_zip(&pack, &dest)?;
        observer.stage_completed(Stage::Extract);
        dest
    } else {
        pack
    };

    let product = build_layout(&pack_root, cfg, observer)?;

    observer.stage_started(Stage::CopyTemplate);
    let template_dir = template_destination(&pack_root, cfg);
    copy_dir_all(&paths.template_dir(cfg), &template_dir)?;
    observer.stage_completed(Stage::CopyTemplate);

    observer.stage_started(Stage::InjectResult);
    let written = inject_result(&template_dir, &cfg.result_name, &product.text)?;
    debug!(path = %written.display(), "layout written");
    observer.stage_completed(Stage::InjectResult);

    observer.stage_started(Stage::Rename);
    let modified = modified_path(&pack_root);
    fs::rename(&pack_root, &modified)?;
    observer.stage_completed(Stage::Rename);

    let archived = was_archive || cfg.archive_if_was_not;
    let output = if archived {
        observer.stage_started(Stage::Archive);
        let mut zip_name = modified.clone().into_os_string();
        zip_name.push(".zip");
        let zip_path = PathBuf::from(zip_name);
        zip_dir(&modified, &zip_path)?;
        observer.stage_completed(Stage::Archive);

        observer.stage_started(Stage::Cleanup);
        fs::remove_dir_all(&modified)?;
        observer.stage_completed(Stage::Cleanup);
        zip_path
    } else {
        modified
    };

    Ok(PipelineOutcome {
        output,
        archived,
        was_archive,
        stats: product.partition.stats(),
        layout: product.text,
    })
}
