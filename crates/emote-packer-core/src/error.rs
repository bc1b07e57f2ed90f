use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotePackerError {
    #[error("Config directory not found: {}", dir.display())]
    ConfigUnavailable { dir: PathBuf },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No resource pack found in {}", root.display())]
    NoPackFound { root: PathBuf },
    #[error("Metadata file `{file_name}` not found under {}", root.display())]
    MetadataNotFound { file_name: String, root: PathBuf },
    #[error("Failed to parse metadata {}: {source}", path.display())]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot read emote image {}: {source}", path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("No emotes found in the pack")]
    NoEmotesFound,
    #[error("result.txt not found under {}", dir.display())]
    ResultTemplateNotFound { dir: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, EmotePackerError>;
