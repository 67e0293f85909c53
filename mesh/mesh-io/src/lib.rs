//! STL export for generated parts.
//!
//! This crate validates triangle meshes and writes them as ASCII or binary
//! STL, optionally welding or reorienting first, and records a JSON metadata
//! sidecar:
//!
//! - [`write_stl`] and the `write_ascii*`/`write_binary*` shorthands return
//!   an [`ExportResult`]. A mesh that fails validation is not written.
//! - [`write_metadata`] writes `<stem>_metadata.json` next to a part.
//! - [`load_stl`] and [`read_binary_header`] read STL files back.
//!
//! Files are written through a guard that removes them again if anything
//! fails before they are flushed and synced.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{ExportSettings, StlFormat, write_stl};
//! use mesh_types::unit_cube;
//!
//! let settings = ExportSettings::default();
//! let result = write_stl(&unit_cube(), "cube.stl", "cube", StlFormat::Binary, &settings).unwrap();
//! assert!(result.success);
//! assert_eq!(result.byte_size, StlFormat::binary_size(12));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod export;
mod metadata;
mod settings;
mod stl;

pub use error::{IoError, IoResult};
pub use export::{
    ExportResult, prepare_for_export, write_ascii, write_ascii_with, write_binary,
    write_binary_with, write_stl,
};
pub use metadata::{metadata_path, write_metadata};
pub use settings::ExportSettings;
pub use stl::{
    HEADER_SIZE, StlFormat, StlHeader, TRIANGLE_SIZE, encode_ascii, encode_binary, load_stl,
    parse_stl, read_binary_header,
};
