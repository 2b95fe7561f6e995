//! Error types for the picopb-core library.
//!
//! This module provides comprehensive error handling using the `thiserror` crate,
//! with detailed error variants for different failure modes.
//!
//! Generation is an offline, idempotent batch process: every variant here is
//! fatal to the run, and the recovery path is fixing the schema and rerunning.
//! Artifacts written before the failure are left in place.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for picopb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all picopb operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The named schema module could not be located or imported
    #[error("failed to import schema module '{module}': {detail}")]
    SchemaImport {
        /// Name of the schema module that failed to import
        module: String,
        /// Detailed description of the failure
        detail: String,
    },

    /// A field uses a primitive type absent from the resolution table
    #[error("unsupported field type {type_code} on field '{field}'")]
    UnsupportedFieldType {
        /// Name of the offending field
        field: String,
        /// Raw descriptor type code of the field
        type_code: i32,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new schema import error
    pub fn schema_import(module: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaImport {
            module: module.into(),
            detail: detail.into(),
        }
    }

    /// Creates a new unsupported field type error
    pub fn unsupported_field_type(field: impl Into<String>, type_code: i32) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            type_code,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
