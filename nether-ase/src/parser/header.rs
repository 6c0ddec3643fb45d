//! File and frame header decoding

use tracing::warn;

use crate::cursor::ByteCursor;
use crate::document::Header;
use crate::error::AseError;
use crate::options::DecodeOptions;
use crate::{ASE_MAGIC, FRAME_MAGIC, HEADER_SIZE};

/// Frame header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameHeader {
    pub byte_size: u32,
    pub legacy_chunk_count: u16,
    pub duration_ms: u16,
    pub chunk_count: u32,
}

/// Read the 128-byte file header
///
/// Leaves the cursor at the first frame.
pub(crate) fn read_header(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
) -> Result<Header, AseError> {
    let start = cursor.position();

    let header = Header {
        file_size: cursor.read_u32()?,
        magic: cursor.read_u16()?,
        frame_count: cursor.read_u16()?,
        width: cursor.read_u16()?,
        height: cursor.read_u16()?,
        color_depth: cursor.read_u16()?,
    };

    if header.magic != ASE_MAGIC {
        if options.strict_magic {
            return Err(AseError::InvalidMagic {
                found: header.magic,
                expected: ASE_MAGIC,
            });
        }
        warn!("header magic 0x{:04X} does not match, continuing", header.magic);
    }

    // Flags, speed, palette info and grid settings are not used
    cursor.skip_to(start + HEADER_SIZE)?;

    Ok(header)
}

/// Read a 16-byte frame header
pub(crate) fn read_frame_header(
    cursor: &mut ByteCursor<'_>,
    frame: usize,
    options: &DecodeOptions,
) -> Result<FrameHeader, AseError> {
    let byte_size = cursor.read_u32()?;
    let magic = cursor.read_u16()?;
    let legacy_chunk_count = cursor.read_u16()?;
    let duration_ms = cursor.read_u16()?;
    cursor.skip(2)?; // Reserved
    let chunk_count = cursor.read_u32()?;

    if magic != FRAME_MAGIC {
        if options.strict_magic {
            return Err(AseError::InvalidFrameMagic {
                frame,
                found: magic,
                expected: FRAME_MAGIC,
            });
        }
        warn!(frame, "frame magic 0x{:04X} does not match, continuing", magic);
    }

    Ok(FrameHeader {
        byte_size,
        legacy_chunk_count,
        duration_ms,
        chunk_count,
    })
}
