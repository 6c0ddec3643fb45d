//! Cel chunk (0x2005)

use tracing::warn;

use crate::cursor::ByteCursor;
use crate::document::{normalize_opacity, Cel, CelSize, CelType, Color};
use crate::error::{AseError, Unsupported};
use crate::pixels::{inflate_pixels, read_raw_pixels};
use crate::RGBA_COLOR_DEPTH;

use super::chunk::ChunkHeader;
use super::state::{DocumentState, LastDecoded};

/// Pixel block of a cel, or why it was skipped
struct PixelBlock {
    size: Option<CelSize>,
    pixels: Option<Vec<Color>>,
    unsupported: Option<Unsupported>,
}

pub(crate) fn decode_cel(
    cursor: &mut ByteCursor<'_>,
    chunk: &ChunkHeader,
    state: &mut DocumentState,
) -> Result<(), AseError> {
    let layer_index = cursor.read_u16()? as usize;
    if layer_index >= state.layers.len() {
        return Err(AseError::LayerIndexOutOfRange {
            index: layer_index,
            layer_count: state.layers.len(),
        });
    }

    let x = cursor.read_i16()?;
    let y = cursor.read_i16()?;
    let opacity = normalize_opacity(cursor.read_u8()?);
    let cel_type = CelType::from_u16(cursor.read_u16()?);
    cursor.skip(7)?; // Z-index and reserved

    let block = match cel_type {
        CelType::Raw | CelType::Compressed => {
            read_pixel_block(cursor, chunk, cel_type, state.color_depth)?
        }
        CelType::Linked => skip_payload(cursor, chunk, Unsupported::LinkedCel)?,
        CelType::CompressedTilemap => {
            skip_payload(cursor, chunk, Unsupported::CompressedTilemapCel)?
        }
        CelType::Unknown(value) => {
            skip_payload(cursor, chunk, Unsupported::UnknownCelType(value))?
        }
    };

    state.cels.push(Cel {
        layer_index,
        x,
        y,
        opacity,
        cel_type,
        size: block.size,
        pixels: block.pixels,
        user_data: None,
        unsupported: block.unsupported,
    });
    state.last = LastDecoded::Cel(state.cels.len() - 1);

    Ok(())
}

fn read_pixel_block(
    cursor: &mut ByteCursor<'_>,
    chunk: &ChunkHeader,
    cel_type: CelType,
    color_depth: u16,
) -> Result<PixelBlock, AseError> {
    let size = CelSize {
        width: cursor.read_u16()?,
        height: cursor.read_u16()?,
    };

    if color_depth != RGBA_COLOR_DEPTH {
        warn!(color_depth, "skipping cel pixels in unsupported color depth");
        cursor.skip_to(chunk.end)?;
        return Ok(PixelBlock {
            size: Some(size),
            pixels: None,
            unsupported: Some(Unsupported::ColorDepth(color_depth)),
        });
    }

    let pixels = if cel_type == CelType::Raw {
        read_raw_pixels(cursor, size)?
    } else {
        // Compressed data runs to the end of the chunk
        let len = chunk.remaining(cursor)?;
        let compressed = cursor.read_bytes(len)?;
        inflate_pixels(compressed, size)?
    };

    Ok(PixelBlock {
        size: Some(size),
        pixels: Some(pixels),
        unsupported: None,
    })
}

fn skip_payload(
    cursor: &mut ByteCursor<'_>,
    chunk: &ChunkHeader,
    reason: Unsupported,
) -> Result<PixelBlock, AseError> {
    warn!("{reason}, skipping cel payload");
    cursor.skip_to(chunk.end)?;
    Ok(PixelBlock {
        size: None,
        pixels: None,
        unsupported: Some(reason),
    })
}
