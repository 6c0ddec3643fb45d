//! Decoded document model
//!
//! Layers and tags live in document-wide lists. Cels belong to the frame
//! they were decoded in and refer to their layer by index into
//! [`Document::layers`].

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::error::Unsupported;

/// One RGBA pixel or display color
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Convert a stored opacity byte to 0.0-1.0
pub(crate) fn normalize_opacity(byte: u8) -> f32 {
    byte as f32 / 255.0
}

/// Optional text and color trailing a tag, layer or cel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserData {
    pub text: Option<String>,
    pub color: Option<Color>,
}

/// Document header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Declared total file size in bytes
    pub file_size: u32,
    /// Magic number as read (0xA5E0 for a well-formed file)
    pub magic: u16,
    pub frame_count: u16,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel: 32 (RGBA), 16 (grayscale) or 8 (indexed)
    pub color_depth: u16,
}

/// Layer flag bits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerFlags(u16);

impl LayerFlags {
    pub const VISIBLE: Self = Self(0x0001);
    pub const EDITABLE: Self = Self(0x0002);
    pub const LOCK_MOVEMENT: Self = Self(0x0004);
    pub const BACKGROUND: Self = Self(0x0008);
    pub const PREFER_LINKED_CELS: Self = Self(0x0010);
    /// Group is displayed collapsed
    pub const COLLAPSED: Self = Self(0x0020);
    /// Reference layer
    pub const REFERENCE: Self = Self(0x0040);

    /// Create flags from raw u16
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if flag is set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for LayerFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Layer kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayerType {
    Normal,
    Group,
    Tilemap,
}

impl LayerType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Group),
            2 => Some(Self::Tilemap),
            _ => None,
        }
    }
}

/// A drawing layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub flags: LayerFlags,
    pub layer_type: LayerType,
    /// Nesting depth below group layers (0 = top level)
    pub child_level: u16,
    pub blend_mode: u16,
    /// Opacity in 0.0-1.0
    pub opacity: f32,
    pub user_data: Option<UserData>,
    /// Set for tilemap layers, whose tileset data is not decoded
    pub unsupported: Option<Unsupported>,
}

impl Layer {
    pub fn is_visible(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE)
    }
}

/// Tag playback direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopDirection {
    Forward,
    Reverse,
    PingPong,
}

impl LoopDirection {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Forward),
            1 => Some(Self::Reverse),
            2 => Some(Self::PingPong),
            _ => None,
        }
    }
}

/// A named range of frames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,
    /// First frame index
    pub from_frame: u16,
    /// Last frame index, inclusive
    pub to_frame: u16,
    pub direction: LoopDirection,
    /// Deprecated display color; alpha is always 255
    pub color: Color,
    pub user_data: Option<UserData>,
}

impl Tag {
    /// Number of frames covered by the tag
    pub fn frame_count(&self) -> usize {
        (self.to_frame as usize + 1).saturating_sub(self.from_frame as usize)
    }
}

/// How a cel stores its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CelType {
    Raw,
    Linked,
    Compressed,
    CompressedTilemap,
    Unknown(u16),
}

impl CelType {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::Raw,
            1 => Self::Linked,
            2 => Self::Compressed,
            3 => Self::CompressedTilemap,
            other => Self::Unknown(other),
        }
    }
}

/// Cel dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CelSize {
    pub width: u16,
    pub height: u16,
}

impl CelSize {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Pixel region placed on one layer within one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cel {
    /// Index into [`Document::layers`], validated at decode time
    pub layer_index: usize,
    pub x: i16,
    pub y: i16,
    /// Opacity in 0.0-1.0
    pub opacity: f32,
    pub cel_type: CelType,
    /// Present for raw and compressed cels
    pub size: Option<CelSize>,
    /// RGBA pixels in row-major order, absent when decoding was skipped
    #[serde(skip)]
    pub pixels: Option<Vec<Color>>,
    pub user_data: Option<UserData>,
    pub unsupported: Option<Unsupported>,
}

/// One animation frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Declared size of the frame in bytes, header included
    pub byte_size: u32,
    /// Number of chunks decoded for this frame
    pub chunk_count: u32,
    pub duration_ms: u16,
    pub cels: Vec<Cel>,
}

/// Fully decoded sprite file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub header: Header,
    pub frames: Vec<Frame>,
    pub layers: Vec<Layer>,
    pub tags: Vec<Tag>,
    /// User data that followed no tag, layer or cel
    pub user_data: Vec<UserData>,
}

impl Document {
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Layer a cel is placed on
    ///
    /// Cel layer indices are checked during decoding, so this cannot fail
    /// for cels taken from this document.
    pub fn cel_layer(&self, cel: &Cel) -> &Layer {
        &self.layers[cel.layer_index]
    }

    /// Sum of all frame durations in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms as u64).sum()
    }
}
