//! Source artifact emission.
//!
//! This module turns a [`ModuleUnit`](crate::schema::ModuleUnit) into one
//! Python source artifact per message and enum type:
//!
//! 1. Each field is resolved against the fixed primitive table
//! 2. Wire-type IDs are looked up in the global registry
//! 3. The message/enum emitters render the artifact bodies
//! 4. The writer persists artifacts and manifest lines
//!
//! The run is a single-threaded, single-pass batch: messages are processed
//! in name-sorted order, enums in declaration order, and the first error
//! aborts without rolling back artifacts already written.

mod enums;
mod field;
mod message;
mod writer;

pub use enums::{emit_enum, normalize_enum_value};
pub use field::{resolve, FieldRecord};
pub use message::{cross_imports, emit_message};
pub use writer::{write_artifact, Manifest, GENERATED_HEADER};

use crate::error::{Error, Result};
use crate::schema::{MessageDef, ModuleUnit, WireRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Output profile selecting the runtime-support import form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Flat namespace import for frozen embedded modules
    Embedded,
    /// Package-relative import for a full package layout
    Full,
}

/// Configuration for artifact generation.
///
/// A read-only value threaded from the caller through the driver into the
/// emitters; there is no global state.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Output profile (default: embedded)
    pub profile: Profile,
    /// Runtime-support module imported by generated artifacts
    pub runtime_module: String,
    /// Whether typing annotations are emitted at all
    pub typing: bool,
    /// Shared manifest file collecting import lines, if configured
    pub manifest: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Embedded,
            runtime_module: "protobuf".to_string(),
            typing: true,
            manifest: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output profile
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the runtime-support module name
    pub fn runtime_module(mut self, module: impl Into<String>) -> Self {
        self.runtime_module = module.into();
        self
    }

    /// Sets whether typing annotations are emitted
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    /// Sets the shared manifest file path
    pub fn manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest = Some(path.into());
        self
    }
}

/// Counts of artifacts written by one generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenStats {
    /// Number of message artifacts written
    pub messages: usize,
    /// Number of enum artifacts written
    pub enums: usize,
}

/// Drives generation for one schema module.
#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator's configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one artifact per message and enum type into `out_dir`.
    ///
    /// Messages are iterated in name-sorted order, enums in declaration
    /// order. A message name missing from the wire registry emits no
    /// wire-type constant and is not an error. Artifacts written before a
    /// failure are left in place.
    pub fn generate(
        &self,
        unit: &ModuleUnit,
        wire_ids: &WireRegistry,
        out_dir: &Path,
    ) -> Result<GenStats> {
        // The manifest commonly lives inside the output directory, so the
        // directory must exist before the manifest handle is opened
        fs::create_dir_all(out_dir).map_err(|e| Error::directory_create(out_dir, e))?;

        let mut manifest = match &self.config.manifest {
            Some(path) => Some(Manifest::open(path)?),
            None => None,
        };
        let mut stats = GenStats::default();

        let mut by_name: Vec<&MessageDef> = unit.messages.iter().collect();
        by_name.sort_by(|a, b| a.name.cmp(&b.name));

        for msg in by_name {
            let fields = msg
                .fields
                .iter()
                .map(field::resolve)
                .collect::<Result<Vec<_>>>()?;
            trace!("resolved {} field(s) for message {}", fields.len(), msg.name);

            let wire_id = wire_ids.lookup(&msg.name);
            let body = message::emit_message(msg, &fields, wire_id, &self.config);
            let path = writer::write_artifact(out_dir, &msg.name, &body)?;
            debug!("wrote message artifact {}", path.display());

            if let Some(manifest) = manifest.as_mut() {
                manifest.append(&format!("from .{0} import {0}", msg.name))?;
            }
            stats.messages += 1;
        }

        for enum_def in &unit.enums {
            let body = enums::emit_enum(enum_def);
            let path = writer::write_artifact(out_dir, &enum_def.name, &body)?;
            debug!("wrote enum artifact {}", path.display());

            if let Some(manifest) = manifest.as_mut() {
                manifest.append(&format!("from . import {}", enum_def.name))?;
            }
            stats.enums += 1;
        }

        Ok(stats)
    }
}
