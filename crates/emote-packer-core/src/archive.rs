use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// True if `path` is a regular file with a readable zip central directory.
pub fn is_zip(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match File::open(path) {
        Ok(f) => ZipArchive::new(BufReader::new(f)).is_ok(),
        Err(_) => false,
    }
}

/// Extracts `archive` into `dest`, creating it. Entries whose names would escape
/// `dest` are skipped.
#[instrument(skip_all, fields(archive = %archive.display()))]
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
    fs::create_dir_all(dest)?;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            debug!(name = entry.name(), "unsafe zip entry skipped");
            continue;
        };
        let out = dest.join(rel);
        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(File::create(&out)?);
        io::copy(&mut entry, &mut file)?;
        file.flush()?;
    }
    debug!(entries = zip.len(), dest = %dest.display(), "archive extracted");
    Ok(())
}

/// Writes the contents of `src` (not `src` itself) into a deflated zip at `dest`.
#[instrument(skip_all, fields(src = %src.display()))]
pub fn zip_dir(src: &Path, dest: &Path) -> Result<()> {
    let mut writer = ZipWriter::new(BufWriter::new(File::create(dest)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));
    let mut files = 0usize;
    for entry in walker {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            let mut input = BufReader::new(File::open(entry.path())?);
            io::copy(&mut input, &mut writer)?;
            files += 1;
        }
    }
    writer.finish()?.flush()?;
    debug!(files, dest = %dest.display(), "archive written");
    Ok(())
}
