//! Nether-ASE: Aseprite sprite file decoder for Nethercore
//!
//! This crate decodes `.ase`/`.aseprite` files from an in-memory buffer into
//! a [`Document`]: canvas header, layers, animation tags and per-frame cels
//! with their RGBA pixels.
//!
//! # Supported Features
//!
//! - **32-bit RGBA** raw and zlib-compressed cels
//! - **Layers** with flags, blend mode, opacity and nesting depth
//! - **Tags** with loop direction
//! - **User data** attached to the preceding tag, layer or cel
//!
//! Indexed and grayscale color depths, tilemap layers, linked cels and
//! palettes are recognized but not decoded. Affected layers and cels carry an
//! [`Unsupported`] marker instead of failing the decode.
//!
//! # File Layout
//!
//! ```text
//! Header (128 bytes)
//! Frame * frame_count
//!   Frame header (16 bytes)
//!   Chunk * chunk_count
//!     size: u32, type: u16, payload
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use nether_ase::decode;
//!
//! let data = std::fs::read("player.aseprite").unwrap();
//! let doc = decode(&data).unwrap();
//!
//! println!("Canvas: {}x{}", doc.header.width, doc.header.height);
//! for tag in &doc.tags {
//!     println!("{}: frames {}-{}", tag.name, tag.from_frame, tag.to_frame);
//! }
//! ```
//!
//! # Format Reference
//!
//! - <https://github.com/aseprite/aseprite/blob/main/docs/ase-file-specs.md>

mod cursor;
mod document;
mod error;
mod options;
mod parser;
mod pixels;

pub use cursor::ByteCursor;
pub use document::{
    Cel, CelSize, CelType, Color, Document, Frame, Header, Layer, LayerFlags, LayerType,
    LoopDirection, Tag, UserData,
};
pub use error::{AseError, ErrorKind, Unsupported};
pub use options::DecodeOptions;
pub use parser::{decode, decode_with_options, resolve_chunk_count, ChunkType};
pub use pixels::{inflate_pixels, read_raw_pixels, BYTES_PER_PIXEL};

// =============================================================================
// Constants
// =============================================================================

/// File header magic number
pub const ASE_MAGIC: u16 = 0xA5E0;

/// Frame header magic number
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Size of the file header block
pub const HEADER_SIZE: usize = 128;

/// Size of each frame header
pub const FRAME_HEADER_SIZE: usize = 16;

/// Size of the size + type prefix of every chunk
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Legacy chunk count value meaning "too many, see the new field"
pub const LEGACY_CHUNK_COUNT_OVERFLOW: u16 = 0xFFFF;

/// The only color depth whose pixels are decoded
pub const RGBA_COLOR_DEPTH: u16 = 32;
