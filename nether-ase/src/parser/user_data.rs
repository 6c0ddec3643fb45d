//! User data chunk (0x2020)

use tracing::debug;

use crate::cursor::ByteCursor;
use crate::document::{Color, UserData};
use crate::error::AseError;

use super::chunk::ChunkHeader;
use super::state::{DocumentState, LastDecoded};

const HAS_TEXT: u32 = 1 << 0;
const HAS_COLOR: u32 = 1 << 1;

pub(crate) fn decode_user_data(
    cursor: &mut ByteCursor<'_>,
    _chunk: &ChunkHeader,
    state: &mut DocumentState,
) -> Result<(), AseError> {
    let flags = cursor.read_u32()?;

    let text = if flags & HAS_TEXT != 0 {
        Some(cursor.read_string()?)
    } else {
        None
    };

    let color = if flags & HAS_COLOR != 0 {
        Some(Color::rgba(
            cursor.read_u8()?,
            cursor.read_u8()?,
            cursor.read_u8()?,
            cursor.read_u8()?,
        ))
    } else {
        None
    };

    attach(state, UserData { text, color });
    Ok(())
}

/// Store user data on the entity decoded just before it
fn attach(state: &mut DocumentState, user_data: UserData) {
    let last = state.last;
    let slot = match last {
        LastDecoded::Tag(i) => &mut state.tags[i].user_data,
        LastDecoded::Layer(i) => &mut state.layers[i].user_data,
        LastDecoded::Cel(i) => &mut state.cels[i].user_data,
        LastDecoded::None => {
            debug!("user data without a preceding entity, keeping it on the document");
            state.user_data.push(user_data);
            return;
        }
    };

    if slot.is_some() {
        debug!(entity = ?last, "replacing earlier user data");
    }
    *slot = Some(user_data);
}
