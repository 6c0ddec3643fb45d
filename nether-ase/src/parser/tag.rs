//! Tags chunk (0x2018)

use crate::cursor::ByteCursor;
use crate::document::{Color, LoopDirection, Tag};
use crate::error::AseError;

use super::chunk::ChunkHeader;
use super::state::{DocumentState, LastDecoded};

pub(crate) fn decode_tags(
    cursor: &mut ByteCursor<'_>,
    _chunk: &ChunkHeader,
    state: &mut DocumentState,
) -> Result<(), AseError> {
    let count = cursor.read_u16()?;
    cursor.skip(8)?; // Reserved

    for _ in 0..count {
        let tag = read_tag(cursor)?;
        state.tags.push(tag);
    }

    state.last = if count > 0 {
        LastDecoded::Tag(state.tags.len() - 1)
    } else {
        LastDecoded::None
    };
    Ok(())
}

fn read_tag(cursor: &mut ByteCursor<'_>) -> Result<Tag, AseError> {
    let from_frame = cursor.read_u16()?;
    let to_frame = cursor.read_u16()?;

    let direction_byte = cursor.read_u8()?;
    let direction = LoopDirection::from_u8(direction_byte)
        .ok_or(AseError::InvalidLoopDirection(direction_byte))?;

    // Repeat count and reserved bytes
    cursor.skip(8)?;

    // Deprecated tag color, stored without alpha
    let r = cursor.read_u8()?;
    let g = cursor.read_u8()?;
    let b = cursor.read_u8()?;
    cursor.skip(1)?;

    let name = cursor.read_string()?;

    Ok(Tag {
        name,
        from_frame,
        to_frame,
        direction,
        color: Color::rgba(r, g, b, 255),
        user_data: None,
    })
}
