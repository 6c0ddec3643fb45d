//! Aseprite document decoder

use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::document::{Document, Frame};
use crate::error::AseError;
use crate::options::DecodeOptions;

mod cel;
mod chunk;
mod header;
mod layer;
mod state;
mod tag;
mod user_data;

use chunk::{decoder_for, ChunkHeader};
use header::{read_frame_header, read_header};
use state::{DocumentState, LastDecoded};

pub use chunk::{resolve_chunk_count, ChunkType};

/// Decode an Aseprite file with default options
///
/// # Arguments
/// * `data` - Complete file contents
///
/// # Returns
/// * `Ok(Document)` - Decoded document
/// * `Err(AseError)` - First fatal error; no partial document is returned
pub fn decode(data: &[u8]) -> Result<Document, AseError> {
    decode_with_options(data, &DecodeOptions::default())
}

/// Decode an Aseprite file
///
/// # Example
/// ```ignore
/// let options = DecodeOptions::default().with_strict_magic(false);
/// let doc = decode_with_options(&data, &options)?;
/// ```
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> Result<Document, AseError> {
    let mut cursor = ByteCursor::new(data);

    let header = read_header(&mut cursor, options)?;
    if header.file_size as usize != data.len() {
        debug!(
            declared = header.file_size,
            actual = data.len(),
            "file size in header does not match buffer length"
        );
    }

    let mut state = DocumentState::new(header.color_depth);
    let mut frames = Vec::with_capacity(header.frame_count as usize);
    for index in 0..header.frame_count as usize {
        let frame = decode_frame(&mut cursor, &mut state, index, options)?;
        frames.push(frame);
    }

    debug!(
        frames = frames.len(),
        layers = state.layers.len(),
        tags = state.tags.len(),
        "decoded document"
    );

    Ok(Document {
        header,
        frames,
        layers: state.layers,
        tags: state.tags,
        user_data: state.user_data,
    })
}

fn decode_frame(
    cursor: &mut ByteCursor<'_>,
    state: &mut DocumentState,
    index: usize,
    options: &DecodeOptions,
) -> Result<Frame, AseError> {
    let frame_start = cursor.position();
    let frame_header = read_frame_header(cursor, index, options)?;

    let chunk_count =
        resolve_chunk_count(frame_header.legacy_chunk_count, frame_header.chunk_count);
    if chunk_count == 0 && frame_header.legacy_chunk_count != 0 {
        debug!(frame = index, "legacy chunk count overflowed, frame treated as empty");
    }

    state.begin_frame();
    for _ in 0..chunk_count {
        decode_chunk(cursor, state)?;
    }

    let frame_end = frame_start.saturating_add(frame_header.byte_size as usize);
    if cursor.position() > frame_end {
        return Err(AseError::FrameBoundary {
            frame: index,
            offset: cursor.position(),
            expected_end: frame_end,
        });
    }
    if cursor.position() < frame_end {
        trace!(
            frame = index,
            skipped = frame_end - cursor.position(),
            "skipping to frame end"
        );
        cursor.skip_to(frame_end)?;
    }

    Ok(Frame {
        byte_size: frame_header.byte_size,
        chunk_count,
        duration_ms: frame_header.duration_ms,
        cels: state.take_cels(),
    })
}

/// Decode one chunk and check it ended where it declared
fn decode_chunk(cursor: &mut ByteCursor<'_>, state: &mut DocumentState) -> Result<(), AseError> {
    let chunk = ChunkHeader::read(cursor)?;

    let Some(decoder) = ChunkType::from_u16(chunk.chunk_type).and_then(decoder_for) else {
        trace!(offset = chunk.start, "skipping chunk 0x{:04X}", chunk.chunk_type);
        cursor.skip_to(chunk.end)?;
        state.last = LastDecoded::None;
        return Ok(());
    };

    decoder(cursor, &chunk, state)?;

    if cursor.position() != chunk.end {
        return Err(chunk.boundary_error(cursor));
    }
    Ok(())
}
