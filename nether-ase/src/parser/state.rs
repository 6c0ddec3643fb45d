//! Document state shared by the chunk decoders

use crate::document::{Cel, Layer, Tag, UserData};

/// Entity decoded by the most recent tag, layer or cel chunk
///
/// User data chunks attach to whatever this points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LastDecoded {
    #[default]
    None,
    /// Index into [`DocumentState::tags`]
    Tag(usize),
    /// Index into [`DocumentState::layers`]
    Layer(usize),
    /// Index into the current frame's [`DocumentState::cels`]
    Cel(usize),
}

/// Entities decoded so far
#[derive(Debug, Default)]
pub(crate) struct DocumentState {
    pub color_depth: u16,
    /// Append-only; cels refer to layers by index
    pub layers: Vec<Layer>,
    pub tags: Vec<Tag>,
    /// Cels of the frame being decoded
    pub cels: Vec<Cel>,
    /// User data with no entity to attach to
    pub user_data: Vec<UserData>,
    pub last: LastDecoded,
}

impl DocumentState {
    pub fn new(color_depth: u16) -> Self {
        Self {
            color_depth,
            ..Self::default()
        }
    }

    /// Reset per-frame state before decoding a frame's chunks
    pub fn begin_frame(&mut self) {
        self.cels.clear();
        self.last = LastDecoded::None;
    }

    /// Hand over the cels of the finished frame
    pub fn take_cels(&mut self) -> Vec<Cel> {
        self.last = LastDecoded::None;
        std::mem::take(&mut self.cels)
    }
}
