//! picopb - Generate embedded-runtime Python message classes from compiled
//! protobuf descriptors
//!
//! This tool loads a pre-built descriptor set for one schema module and
//! writes one source artifact per message and enum type into the output
//! directory.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use picopb_core::{Generator, GeneratorConfig, Profile, SchemaSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// File extensions recognized for pre-built descriptor sets
const DESCRIPTOR_EXTENSIONS: [&str; 2] = ["pb", "bin"];

/// Generate embedded-runtime Python message classes from compiled protobuf descriptors
#[derive(Parser, Debug)]
#[command(name = "picopb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Name of the schema module to generate artifacts for
    module: String,

    /// Output directory for generated artifacts
    outdir: PathBuf,

    /// Runtime-support module imported by generated message classes
    #[arg(short = 'P', long, default_value = "protobuf")]
    runtime_module: String,

    /// Append an import line per generated artifact to this manifest file
    #[arg(short = 'l', long)]
    manifest: Option<PathBuf>,

    /// Search path for pre-built descriptor sets
    #[arg(short = 'p', long, default_value = ".")]
    proto_path: PathBuf,

    /// Output profile for the runtime-support import
    #[arg(long, value_enum, default_value = "embedded")]
    profile: ProfileArg,

    /// Do not emit typing annotations in generated artifacts
    #[arg(long)]
    no_typing: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output profile for generated artifacts
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Flat namespace import for frozen embedded modules
    Embedded,
    /// Package-relative import for a full package layout
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Embedded => Profile::Embedded,
            ProfileArg::Full => Profile::Full,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.proto_path.exists() {
        bail!(
            "Descriptor search path does not exist: {}",
            cli.proto_path.display()
        );
    }

    let descriptor_path = locate_descriptor_set(&cli.proto_path, &cli.module).ok_or_else(|| {
        picopb_core::Error::schema_import(
            &cli.module,
            format!("no descriptor set found under '{}'", cli.proto_path.display()),
        )
    })?;
    debug!("using descriptor set {}", descriptor_path.display());

    let set = SchemaSet::from_file(&cli.module, &descriptor_path)?;
    let unit = set.module_unit()?;
    let wire_ids = set.wire_registry();
    trace!("wire registry holds {} entries", wire_ids.len());

    let mut config = GeneratorConfig::new()
        .profile(cli.profile.into())
        .runtime_module(cli.runtime_module.as_str())
        .typing(!cli.no_typing);
    if let Some(manifest) = &cli.manifest {
        config = config.manifest(manifest);
    }

    let stats = Generator::with_config(config).generate(&unit, &wire_ids, &cli.outdir)?;
    info!(
        "generated {} message(s) and {} enum(s) into {}",
        stats.messages,
        stats.enums,
        cli.outdir.display()
    );

    Ok(())
}

/// Locates the pre-built descriptor set for a module under the search path.
///
/// Direct children are tried first; the search then descends recursively,
/// skipping hidden files. The first match wins.
fn locate_descriptor_set(search: &Path, module: &str) -> Option<PathBuf> {
    for ext in DESCRIPTOR_EXTENSIONS {
        let candidate = search.join(format!("{module}.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    for entry in WalkDir::new(search)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        // Skip hidden files
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s == module)
            .unwrap_or(false);
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| DESCRIPTOR_EXTENSIONS.contains(&e))
            .unwrap_or(false);

        if stem_matches && ext_matches {
            trace!("found descriptor set {}", path.display());
            return Some(path.to_path_buf());
        }
    }

    None
}
