use crate::error::{EmotePackerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default name of the settings directory that sits next to the tool.
pub const CONFIG_DIR_NAME: &str = "EmotesParserConfig";
/// Settings file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings for a single emote layout run.
/// Key notes:
///   - JSON keys match the settings file shipped with the tool, including the
///     historical `archive_if_was_not?` key
///   - every field has a default, so older files with missing keys still load
///   - call [`EmoteConfig::validate`] before using `tab_width` or the wide ratio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmoteConfig {
    /// File name of the font metadata (searched anywhere in the pack).
    #[serde(default = "default_metadata_file")]
    pub get_emotes_data_from: String,
    /// Directory holding emote images, relative to the pack root.
    #[serde(default = "default_emotes_dir")]
    pub emotes_dir: String,
    /// Provider entries whose `file` contains this substring are emotes.
    #[serde(default = "default_emote_marker")]
    pub how_to_define_if_emote: String,
    /// Column width of the layout, in characters.
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// An emote is wide when `width >= height * wide_width_to_height`.
    #[serde(default = "default_wide_ratio")]
    pub wide_width_to_height: f64,
    /// Name prefixes that form groups, tested in order.
    #[serde(default = "default_group_prefixes")]
    pub group_prefixes: Vec<String>,
    /// Header token for emotes that match no prefix.
    #[serde(default = "default_non_grouped_name")]
    pub non_grouped_emotes_group_name: String,
    /// Header token for the wide section.
    #[serde(default = "default_wide_name")]
    pub wide_emotes_group_name: String,
    /// Template directory name inside the config directory.
    #[serde(default = "default_template_dir")]
    pub symbol_chat_exemple_dir: String,
    /// Where the template is copied to, relative to the pack root.
    #[serde(default = "default_template_target")]
    pub where_to_save_symbol_chat_exemple: String,
    /// Base name (without `.txt`) of the injected layout file.
    #[serde(default = "default_result_name")]
    pub result_name: String,
    /// Zip the output even when the input pack was a plain directory.
    #[serde(
        rename = "archive_if_was_not?",
        alias = "archive_if_was_not",
        default
    )]
    pub archive_if_was_not: bool,
}

impl Default for EmoteConfig {
    fn default() -> Self {
        Self {
            get_emotes_data_from: default_metadata_file(),
            emotes_dir: default_emotes_dir(),
            how_to_define_if_emote: default_emote_marker(),
            tab_width: default_tab_width(),
            wide_width_to_height: default_wide_ratio(),
            group_prefixes: default_group_prefixes(),
            non_grouped_emotes_group_name: default_non_grouped_name(),
            wide_emotes_group_name: default_wide_name(),
            symbol_chat_exemple_dir: default_template_dir(),
            where_to_save_symbol_chat_exemple: default_template_target(),
            result_name: default_result_name(),
            archive_if_was_not: false,
        }
    }
}

impl EmoteConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - `tab_width` is zero
    /// - `wide_width_to_height` is not a positive finite number
    /// - a name the pipeline needs to find or write files is empty
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(EmotePackerError::InvalidConfig(
                "tab_width must be at least 1".into(),
            ));
        }
        if !self.wide_width_to_height.is_finite() || self.wide_width_to_height <= 0.0 {
            return Err(EmotePackerError::InvalidConfig(format!(
                "wide_width_to_height must be > 0 (got {})",
                self.wide_width_to_height
            )));
        }
        for (key, value) in [
            ("get_emotes_data_from", &self.get_emotes_data_from),
            ("how_to_define_if_emote", &self.how_to_define_if_emote),
            ("result_name", &self.result_name),
        ] {
            if value.is_empty() {
                return Err(EmotePackerError::InvalidConfig(format!(
                    "{key} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Reads and validates a settings file. Malformed JSON is an error, never a silent fallback.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: EmoteConfig =
            serde_json::from_str(&text).map_err(|source| EmotePackerError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Writes pretty-printed JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            EmotePackerError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads `config.json` from `config_dir`, writing the defaults first if the file is missing.
    /// The directory itself must exist (it also carries the template asset).
    pub fn load_or_create(config_dir: &Path) -> Result<LoadedConfig> {
        if !config_dir.is_dir() {
            return Err(EmotePackerError::ConfigUnavailable {
                dir: config_dir.to_path_buf(),
            });
        }
        let path = config_dir.join(CONFIG_FILE_NAME);
        let created = if path.exists() {
            false
        } else {
            EmoteConfig::default().save(&path)?;
            debug!(path = %path.display(), "default config created");
            true
        };
        let config = EmoteConfig::load(&path)?;
        Ok(LoadedConfig { config, created })
    }

    /// Create a fluent builder for `EmoteConfig`.
    pub fn builder() -> EmoteConfigBuilder {
        EmoteConfigBuilder::new()
    }
}

/// Result of [`EmoteConfig::load_or_create`].
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: EmoteConfig,
    /// True when the defaults were written during this call.
    pub created: bool,
}

fn default_metadata_file() -> String {
    "default.json".into()
}
fn default_emotes_dir() -> String {
    "assets/myemotes/textures/font/emotes".into()
}
fn default_emote_marker() -> String {
    "myemotes".into()
}
fn default_tab_width() -> usize {
    10
}
fn default_wide_ratio() -> f64 {
    1.6
}
fn default_group_prefixes() -> Vec<String> {
    ["pwgood", "peepo", "pepe", "forsen", "feels"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_non_grouped_name() -> String {
    "other".into()
}
fn default_wide_name() -> String {
    "wide".into()
}
fn default_template_dir() -> String {
    "symbol-chat.exemple".into()
}
fn default_template_target() -> String {
    "assets".into()
}
fn default_result_name() -> String {
    "peepo".into()
}

/// Builder for `EmoteConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct EmoteConfigBuilder {
    cfg: EmoteConfig,
}

impl EmoteConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: EmoteConfig::default(),
        }
    }
    pub fn metadata_file(mut self, v: impl Into<String>) -> Self {
        self.cfg.get_emotes_data_from = v.into();
        self
    }
    pub fn emotes_dir(mut self, v: impl Into<String>) -> Self {
        self.cfg.emotes_dir = v.into();
        self
    }
    pub fn emote_marker(mut self, v: impl Into<String>) -> Self {
        self.cfg.how_to_define_if_emote = v.into();
        self
    }
    pub fn tab_width(mut self, v: usize) -> Self {
        self.cfg.tab_width = v;
        self
    }
    pub fn wide_ratio(mut self, v: f64) -> Self {
        self.cfg.wide_width_to_height = v;
        self
    }
    pub fn group_prefixes<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.group_prefixes = v.into_iter().map(Into::into).collect();
        self
    }
    pub fn non_grouped_name(mut self, v: impl Into<String>) -> Self {
        self.cfg.non_grouped_emotes_group_name = v.into();
        self
    }
    pub fn wide_name(mut self, v: impl Into<String>) -> Self {
        self.cfg.wide_emotes_group_name = v.into();
        self
    }
    pub fn template_dir(mut self, v: impl Into<String>) -> Self {
        self.cfg.symbol_chat_exemple_dir = v.into();
        self
    }
    pub fn template_target(mut self, v: impl Into<String>) -> Self {
        self.cfg.where_to_save_symbol_chat_exemple = v.into();
        self
    }
    pub fn result_name(mut self, v: impl Into<String>) -> Self {
        self.cfg.result_name = v.into();
        self
    }
    pub fn archive_if_was_not(mut self, v: bool) -> Self {
        self.cfg.archive_if_was_not = v;
        self
    }
    pub fn build(self) -> EmoteConfig {
        self.cfg
    }
}

/// Locations the pipeline works against. Everything is relative to `root`;
/// nothing reads the process working directory.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    /// Directory scanned for the pack; outputs are written next to it.
    pub root: PathBuf,
    /// Settings directory (holds `config.json` and the template asset).
    pub config_dir: PathBuf,
    /// Entry names in `root` that are never treated as a pack.
    pub ignore: Vec<String>,
}

impl ToolPaths {
    /// Standard layout: `{root}/EmotesParserConfig`, ignoring the config dir and
    /// the running executable.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_dir = root.join(CONFIG_DIR_NAME);
        let mut ignore = vec![CONFIG_DIR_NAME.to_string()];
        if let Some(exe) = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            ignore.push(exe);
        }
        Self {
            root,
            config_dir,
            ignore,
        }
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Some(name) = dir.file_name() {
            self.ignore.push(name.to_string_lossy().into_owned());
        }
        self.config_dir = dir;
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Source template directory inside the config dir.
    pub fn template_dir(&self, cfg: &EmoteConfig) -> PathBuf {
        self.config_dir.join(&cfg.symbol_chat_exemple_dir)
    }
}
