//! Chunk headers, chunk type tags and the chunk decoder table

use crate::cursor::ByteCursor;
use crate::error::AseError;
use crate::LEGACY_CHUNK_COUNT_OVERFLOW;

use super::state::DocumentState;
use super::{cel, layer, tag, user_data};

/// Known chunk type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    OldPaletteA,
    OldPaletteB,
    Layer,
    Cel,
    CelExtra,
    ColorProfile,
    Mask,
    Path,
    Tags,
    Palette,
    UserData,
    Slice,
}

impl ChunkType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0004 => Some(Self::OldPaletteA),
            0x0011 => Some(Self::OldPaletteB),
            0x2004 => Some(Self::Layer),
            0x2005 => Some(Self::Cel),
            0x2006 => Some(Self::CelExtra),
            0x2007 => Some(Self::ColorProfile),
            0x2016 => Some(Self::Mask),
            0x2017 => Some(Self::Path),
            0x2018 => Some(Self::Tags),
            0x2019 => Some(Self::Palette),
            0x2020 => Some(Self::UserData),
            0x2022 => Some(Self::Slice),
            _ => None,
        }
    }
}

/// Pick the number of chunks to decode in a frame
///
/// The new 32-bit field wins when set. Otherwise the legacy 16-bit field is
/// used unless it holds the overflow sentinel, in which case the frame is
/// treated as empty.
pub fn resolve_chunk_count(legacy: u16, new: u32) -> u32 {
    if new != 0 {
        new
    } else if legacy != LEGACY_CHUNK_COUNT_OVERFLOW {
        legacy as u32
    } else {
        0
    }
}

/// Size and type prefix of a chunk, plus where it must end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkHeader {
    pub start: usize,
    pub chunk_type: u16,
    pub end: usize,
}

impl ChunkHeader {
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, AseError> {
        let start = cursor.position();
        let size = cursor.read_u32()?;
        let chunk_type = cursor.read_u16()?;
        let header = Self {
            start,
            chunk_type,
            end: start.saturating_add(size as usize),
        };

        // Size must at least cover the prefix just read
        if header.end < cursor.position() {
            return Err(header.boundary_error(cursor));
        }
        Ok(header)
    }

    /// Bytes left in the chunk after the cursor
    pub fn remaining(&self, cursor: &ByteCursor<'_>) -> Result<usize, AseError> {
        self.end
            .checked_sub(cursor.position())
            .ok_or_else(|| self.boundary_error(cursor))
    }

    pub fn boundary_error(&self, cursor: &ByteCursor<'_>) -> AseError {
        AseError::ChunkBoundary {
            chunk_type: self.chunk_type,
            chunk_start: self.start,
            offset: cursor.position(),
            expected_end: self.end,
        }
    }
}

/// Decodes one chunk's payload into the document state
///
/// Called with the cursor just past the chunk header. The caller checks that
/// the cursor ends at [`ChunkHeader::end`].
pub(crate) type ChunkDecoder =
    fn(&mut ByteCursor<'_>, &ChunkHeader, &mut DocumentState) -> Result<(), AseError>;

/// Decoder for a chunk type, or `None` if the chunk is skipped
pub(crate) fn decoder_for(chunk_type: ChunkType) -> Option<ChunkDecoder> {
    match chunk_type {
        ChunkType::Tags => Some(tag::decode_tags),
        ChunkType::Layer => Some(layer::decode_layer),
        ChunkType::Cel => Some(cel::decode_cel),
        ChunkType::UserData => Some(user_data::decode_user_data),
        ChunkType::OldPaletteA
        | ChunkType::OldPaletteB
        | ChunkType::CelExtra
        | ChunkType::ColorProfile
        | ChunkType::Mask
        | ChunkType::Path
        | ChunkType::Palette
        | ChunkType::Slice => None,
    }
}
