//! Error types for Aseprite decoding

/// Broad category of a decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A read or seek went past the end of the buffer
    OutOfBounds,
    /// A fixed field held a value the format does not allow
    Format,
    /// A chunk or frame ended at the wrong offset
    ChunkBoundary,
    /// A cel referenced a layer that has not been decoded
    IndexOutOfRange,
    /// Cel pixel data could not be decoded
    PixelDecode,
}

/// Fatal errors that abort decoding of a whole document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AseError {
    /// Read of `len` bytes at `offset` runs past the buffer
    #[error("read of {len} bytes at offset {offset} exceeds buffer length {buffer_len}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// Seek target lies behind the current offset
    #[error("cannot seek backward from offset {from} to {to}")]
    BackwardSeek { from: usize, to: usize },

    /// Header magic number mismatch
    #[error("invalid header magic 0x{found:04X} (expected 0x{expected:04X})")]
    InvalidMagic { found: u16, expected: u16 },

    /// Frame magic number mismatch
    #[error("invalid magic 0x{found:04X} in frame {frame} (expected 0x{expected:04X})")]
    InvalidFrameMagic {
        frame: usize,
        found: u16,
        expected: u16,
    },

    /// Tag loop direction byte outside {0, 1, 2}
    #[error("invalid tag loop direction {0} (must be 0-2)")]
    InvalidLoopDirection(u8),

    /// Layer type outside {0, 1, 2}
    #[error("invalid layer type {0} (must be 0-2)")]
    InvalidLayerType(u16),

    /// A chunk decoder did not stop at the chunk's declared end
    #[error(
        "chunk 0x{chunk_type:04X} starting at {chunk_start} ended at offset {offset}, expected {expected_end}"
    )]
    ChunkBoundary {
        chunk_type: u16,
        chunk_start: usize,
        offset: usize,
        expected_end: usize,
    },

    /// Chunks of a frame ran past the frame's declared size
    #[error("frame {frame} chunks ended at offset {offset}, past frame end {expected_end}")]
    FrameBoundary {
        frame: usize,
        offset: usize,
        expected_end: usize,
    },

    /// Cel references a layer index that does not exist yet
    #[error("cel references layer {index} but only {layer_count} layers are defined")]
    LayerIndexOutOfRange { index: usize, layer_count: usize },

    /// Cel dimensions overflow the addressable pixel byte count
    #[error("cel size {width}x{height} is too large")]
    CelTooLarge { width: u16, height: u16 },

    /// Inflated cel data is shorter than width * height * 4
    #[error("inflated cel data is {actual} bytes, expected {expected}")]
    InflatedSizeMismatch { expected: usize, actual: usize },

    /// Inflated cel data would exceed width * height * 4
    #[error("inflated cel data exceeds expected {expected} bytes")]
    InflateOverflow { expected: usize },

    /// DEFLATE stream is corrupt
    #[error("cel decompression failed: {0}")]
    Inflate(String),
}

impl AseError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } | Self::BackwardSeek { .. } => ErrorKind::OutOfBounds,
            Self::InvalidMagic { .. }
            | Self::InvalidFrameMagic { .. }
            | Self::InvalidLoopDirection(_)
            | Self::InvalidLayerType(_) => ErrorKind::Format,
            Self::ChunkBoundary { .. } | Self::FrameBoundary { .. } => ErrorKind::ChunkBoundary,
            Self::LayerIndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::CelTooLarge { .. }
            | Self::InflatedSizeMismatch { .. }
            | Self::InflateOverflow { .. }
            | Self::Inflate(_) => ErrorKind::PixelDecode,
        }
    }
}

/// Recognized features this decoder skips instead of decoding
///
/// These never abort a decode. They are stored on the layer or cel they
/// affect so callers can see what was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, thiserror::Error)]
pub enum Unsupported {
    /// Pixel data in a color depth other than 32-bit RGBA
    #[error("{0}-bit color depth is not supported (only 32-bit RGBA)")]
    ColorDepth(u16),

    /// Tilemap layer
    #[error("tilemap layers are not supported")]
    TilemapLayer,

    /// Linked cel (type 1)
    #[error("linked cels are not supported")]
    LinkedCel,

    /// Compressed tilemap cel (type 3)
    #[error("compressed tilemap cels are not supported")]
    CompressedTilemapCel,

    /// Cel type this decoder does not know
    #[error("unknown cel type {0}")]
    UnknownCelType(u16),
}
