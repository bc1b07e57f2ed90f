use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use emote_packer_core::archive::is_zip;
use emote_packer_core::config::{EmoteConfig, ToolPaths};
use emote_packer_core::pipeline::{Count, PipelineObserver, Stage, build_layout, run};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "emote-packer",
    about = "Build a chat symbol layout from a resource pack's emotes",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Directory holding the pack and the config directory (default: current dir)
    #[arg(long, global = true, help_heading = "Input/Output")]
    root: Option<PathBuf>,
    /// Config directory (default: <root>/EmotesParserConfig)
    #[arg(long, global = true, help_heading = "Input/Output")]
    config_dir: Option<PathBuf>,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
    /// Keep the console open this many seconds before exiting
    #[arg(long, default_value_t = 0, global = true, help_heading = "Logging/UX")]
    hold: u64,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Transform the pack found in the root directory (default)
    Run,
    /// Print or write the layout for a pack directory without modifying it
    Layout(LayoutArgs),
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective configuration as JSON and exit
    PrintConfig,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    /// Unpacked pack directory
    pack: PathBuf,
    /// Write the layout to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Also print partition counts as JSON
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let paths = tool_paths(&cli)?;
    let show_progress = cli.progress && !cli.quiet;
    let result = match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => run_pipeline(&paths, show_progress),
        Commands::Layout(args) => run_layout(&paths, &args, show_progress),
        Commands::InitConfig { force } => run_init_config(&paths, force),
        Commands::PrintConfig => run_print_config(&paths),
    };
    if cli.hold > 0 {
        info!("window will close in {} seconds", cli.hold);
        std::thread::sleep(Duration::from_secs(cli.hold));
    }
    result
}

fn tool_paths(cli: &Cli) -> anyhow::Result<ToolPaths> {
    let root = match &cli.root {
        Some(r) => r.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let mut paths = ToolPaths::new(root);
    if let Some(dir) = &cli.config_dir {
        paths = paths.with_config_dir(dir);
    }
    Ok(paths)
}

fn load_config(paths: &ToolPaths) -> anyhow::Result<EmoteConfig> {
    let loaded = EmoteConfig::load_or_create(&paths.config_dir)
        .with_context(|| format!("load config from {}", paths.config_dir.display()))?;
    if loaded.created {
        info!(path = %paths.config_file().display(), "default config created");
    }
    Ok(loaded.config)
}

fn run_pipeline(paths: &ToolPaths, show_progress: bool) -> anyhow::Result<()> {
    let cfg = load_config(paths)?;
    let mut observer = CliObserver::new(show_progress);
    let outcome = run(paths, &cfg, &mut observer)?;
    info!(
        output = %outcome.output.display(),
        was_archive = outcome.was_archive,
        archived = outcome.archived,
        "modified pack created"
    );
    info!(
        total = outcome.stats.total,
        groups = outcome.stats.groups,
        wide = outcome.stats.wide,
        ungrouped = outcome.stats.ungrouped,
        "emotes parsing completed"
    );
    Ok(())
}

fn run_layout(paths: &ToolPaths, args: &LayoutArgs, show_progress: bool) -> anyhow::Result<()> {
    if is_zip(&args.pack) {
        anyhow::bail!(
            "{} is an archive; extract it first or use `run`",
            args.pack.display()
        );
    }
    let cfg = load_config(paths)?;
    let mut observer = CliObserver::new(show_progress);
    let product = build_layout(&args.pack, &cfg, &mut observer)
        .with_context(|| format!("build layout for {}", args.pack.display()))?;
    match &args.out {
        Some(out) => {
            write_text(out, &product.text)?;
            info!(path = %out.display(), "layout written");
        }
        None => emit_layout(&mut io::stdout().lock(), &product.text)?,
    }
    if args.stats {
        println!(
            "{}",
            serde_json::to_string_pretty(&product.partition.stats())?
        );
    }
    Ok(())
}

fn run_init_config(paths: &ToolPaths, force: bool) -> anyhow::Result<()> {
    let path = paths.config_file();
    if path.exists() && !force {
        warn!(path = %path.display(), "config already exists (use --force to overwrite)");
        return Ok(());
    }
    EmoteConfig::default()
        .save(&path)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "default config written");
    Ok(())
}

fn run_print_config(paths: &ToolPaths) -> anyhow::Result<()> {
    let cfg = load_config(paths)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

/// Writes the blob as-is: no trailing newline, the text is pasted verbatim.
fn emit_layout(out: &mut impl Write, text: &str) -> anyhow::Result<()> {
    out.write_all(text.as_bytes()).context("write layout")?;
    out.flush().context("flush layout")
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

/// Console narration for the pipeline: log lines per stage plus a bar while images are probed.
struct CliObserver {
    progress: bool,
    bar: Option<ProgressBar>,
}

impl CliObserver {
    fn new(progress: bool) -> Self {
        Self {
            progress,
            bar: None,
        }
    }
}

impl PipelineObserver for CliObserver {
    fn stage_started(&mut self, stage: Stage) {
        let msg = match stage {
            Stage::LocatePack => "looking for a resource pack",
            Stage::Extract => "extracting pack",
            Stage::Catalog => "parsing emotes",
            Stage::Classify => "grouping emotes",
            Stage::Encode => "building layout",
            Stage::CopyTemplate => "copying symbol chat template",
            Stage::InjectResult => "writing layout",
            Stage::Rename => "finalizing",
            Stage::Archive => "creating archive",
            Stage::Cleanup => "cleaning up",
        };
        info!("{msg}...");
    }

    fn stage_completed(&mut self, stage: Stage) {
        if stage == Stage::Catalog {
            if let Some(b) = self.bar.take() {
                b.finish_and_clear();
            }
        }
    }

    fn count_found(&mut self, what: Count, n: usize) {
        match what {
            Count::Emotes => info!(count = n, "emotes found"),
            Count::Wide => info!(count = n, "wide emotes"),
            Count::Groups => info!(count = n, "groups"),
            Count::Ungrouped => info!(count = n, "ungrouped emotes"),
        }
    }

    fn emote_probed(&mut self, done: usize, total: usize) {
        if !self.progress {
            return;
        }
        let bar = self.bar.get_or_insert_with(|| {
            let b = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.green} probing {pos}/{len} [{elapsed_precise}]",
            ) {
                b.set_style(style);
            }
            b
        });
        bar.set_position(done as u64);
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["emote-packer"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.progress);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "emote-packer",
            "layout",
            "pack",
            "--out",
            "peepo.txt",
            "--root",
            "/tmp/x",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Layout(a)) => {
                assert_eq!(a.pack, PathBuf::from("pack"));
                assert_eq!(a.out, Some(PathBuf::from("peepo.txt")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_dir_override_is_ignored_as_pack() {
        let cli = Cli::try_parse_from(["emote-packer", "--root", "/r", "--config-dir", "/r/cfg"])
            .expect("parse");
        let paths = tool_paths(&cli).expect("paths");
        assert_eq!(paths.config_dir, PathBuf::from("/r/cfg"));
        assert!(paths.ignore.iter().any(|n| n == "cfg"));
    }

    #[test]
    fn layout_is_emitted_without_trailing_newline() {
        let blob = "pwgood    \u{e000}         wide       \u{e001} ";
        let mut out = Vec::new();
        emit_layout(&mut out, blob).expect("emit");
        assert_eq!(out, blob.as_bytes());
    }
}
