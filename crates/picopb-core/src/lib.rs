//! # picopb-core
//!
//! A library for generating lightweight Python message classes from compiled
//! Protocol Buffer descriptors.
//!
//! This crate provides the core functionality for:
//! - Loading pre-built `FileDescriptorSet` binaries into a fixed schema IR
//! - Resolving field types against the minimal embedded runtime's encoders
//! - Emitting one standalone source artifact per message and enum type
//!
//! The generated artifacts target resource-constrained runtimes where a full
//! schema-interpretation library is undesirable: every message and enum
//! becomes a statically readable unit ahead of time, and the companion
//! runtime module performs the actual wire encoding/decoding.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`schema`]: Descriptor loading and the schema IR
//! - [`emit`]: Field resolution, source emission, and the generation driver
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use picopb_core::{Generator, SchemaSet};
//!
//! // Load a descriptor set compiled ahead of time by protoc
//! let set = SchemaSet::from_file("messages-lisk", "messages-lisk.pb".as_ref())?;
//! let unit = set.module_unit()?;
//! let wire_ids = set.wire_registry();
//!
//! // Write one artifact per message and enum
//! let stats = Generator::new().generate(&unit, &wire_ids, "out".as_ref())?;
//! println!("{} messages, {} enums", stats.messages, stats.enums);
//! # Ok::<(), picopb_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod emit;
pub mod error;
pub mod schema;

// Re-export primary types for convenience
pub use emit::{GenStats, Generator, GeneratorConfig, Profile, GENERATED_HEADER};
pub use error::{Error, Result};
pub use schema::{ModuleUnit, SchemaSet, WireRegistry};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
