//! Layer chunk (0x2004)

use tracing::warn;

use crate::cursor::ByteCursor;
use crate::document::{normalize_opacity, Layer, LayerFlags, LayerType};
use crate::error::{AseError, Unsupported};

use super::chunk::ChunkHeader;
use super::state::{DocumentState, LastDecoded};

pub(crate) fn decode_layer(
    cursor: &mut ByteCursor<'_>,
    _chunk: &ChunkHeader,
    state: &mut DocumentState,
) -> Result<(), AseError> {
    let flags = LayerFlags::from_bits(cursor.read_u16()?);

    let type_value = cursor.read_u16()?;
    let layer_type =
        LayerType::from_u16(type_value).ok_or(AseError::InvalidLayerType(type_value))?;

    let child_level = cursor.read_u16()?;
    cursor.skip(4)?; // Default width/height, ignored by Aseprite
    let blend_mode = cursor.read_u16()?;
    let opacity = normalize_opacity(cursor.read_u8()?);
    cursor.skip(3)?; // Reserved
    let name = cursor.read_string()?;

    let unsupported = if layer_type == LayerType::Tilemap {
        // Tileset index
        cursor.skip(4)?;
        warn!(layer = %name, "tilemap layers are not supported");
        Some(Unsupported::TilemapLayer)
    } else {
        None
    };

    state.layers.push(Layer {
        name,
        flags,
        layer_type,
        child_level,
        blend_mode,
        opacity,
        user_data: None,
        unsupported,
    });
    state.last = LastDecoded::Layer(state.layers.len() - 1);

    Ok(())
}
