//! End-to-end decoding of synthetic Aseprite documents

use miniz_oxide::deflate::compress_to_vec_zlib;
use nether_ase::{
    decode, decode_with_options, AseError, CelType, Color, DecodeOptions, ErrorKind,
    LoopDirection, Unsupported, ASE_MAGIC, FRAME_MAGIC, HEADER_SIZE,
};

/// Little helper for assembling documents chunk by chunk
#[derive(Default)]
struct AseWriter {
    frames: Vec<Vec<u8>>,
    current: Vec<Vec<u8>>,
    color_depth: u16,
}

impl AseWriter {
    fn new(color_depth: u16) -> Self {
        Self {
            color_depth,
            ..Self::default()
        }
    }

    fn chunk(mut self, chunk_type: u16, payload: Vec<u8>) -> Self {
        let mut buf = ((payload.len() + 6) as u32).to_le_bytes().to_vec();
        buf.extend_from_slice(&chunk_type.to_le_bytes());
        buf.extend_from_slice(&payload);
        self.current.push(buf);
        self
    }

    fn layer(self, name: &str, layer_type: u16) -> Self {
        let mut p = Vec::new();
        p.extend_from_slice(&1u16.to_le_bytes());
        p.extend_from_slice(&layer_type.to_le_bytes());
        p.extend_from_slice(&[0; 6]);
        p.extend_from_slice(&0u16.to_le_bytes());
        p.push(255);
        p.extend_from_slice(&[0; 3]);
        p.extend_from_slice(&(name.len() as u16).to_le_bytes());
        p.extend_from_slice(name.as_bytes());
        if layer_type == 2 {
            p.extend_from_slice(&7u32.to_le_bytes());
        }
        self.chunk(0x2004, p)
    }

    fn cel(self, layer: u16, cel_type: u16, size: (u16, u16), data: &[u8]) -> Self {
        let mut p = Vec::new();
        p.extend_from_slice(&layer.to_le_bytes());
        p.extend_from_slice(&0i16.to_le_bytes());
        p.extend_from_slice(&0i16.to_le_bytes());
        p.push(255);
        p.extend_from_slice(&cel_type.to_le_bytes());
        p.extend_from_slice(&[0; 7]);
        p.extend_from_slice(&size.0.to_le_bytes());
        p.extend_from_slice(&size.1.to_le_bytes());
        p.extend_from_slice(data);
        self.chunk(0x2005, p)
    }

    fn tag(self, from: u16, to: u16, direction: u8, name: &str) -> Self {
        let mut p = Vec::new();
        p.extend_from_slice(&1u16.to_le_bytes());
        p.extend_from_slice(&[0; 8]);
        p.extend_from_slice(&from.to_le_bytes());
        p.extend_from_slice(&to.to_le_bytes());
        p.push(direction);
        p.extend_from_slice(&[0; 8]);
        p.extend_from_slice(&[0, 0, 0, 0]);
        p.extend_from_slice(&(name.len() as u16).to_le_bytes());
        p.extend_from_slice(name.as_bytes());
        self.chunk(0x2018, p)
    }

    fn text(self, text: &str) -> Self {
        let mut p = 1u32.to_le_bytes().to_vec();
        p.extend_from_slice(&(text.len() as u16).to_le_bytes());
        p.extend_from_slice(text.as_bytes());
        self.chunk(0x2020, p)
    }

    fn end_frame(mut self, duration_ms: u16) -> Self {
        let chunks = std::mem::take(&mut self.current);
        let body = chunks.concat();
        let mut f = ((body.len() + 16) as u32).to_le_bytes().to_vec();
        f.extend_from_slice(&FRAME_MAGIC.to_le_bytes());
        f.extend_from_slice(&(chunks.len() as u16).to_le_bytes());
        f.extend_from_slice(&duration_ms.to_le_bytes());
        f.extend_from_slice(&[0, 0]);
        f.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
        f.extend_from_slice(&body);
        self.frames.push(f);
        self
    }

    fn finish(self) -> Vec<u8> {
        let body = self.frames.concat();
        let mut d = ((body.len() + HEADER_SIZE) as u32).to_le_bytes().to_vec();
        d.extend_from_slice(&ASE_MAGIC.to_le_bytes());
        d.extend_from_slice(&(self.frames.len() as u16).to_le_bytes());
        d.extend_from_slice(&8u16.to_le_bytes());
        d.extend_from_slice(&8u16.to_le_bytes());
        d.extend_from_slice(&self.color_depth.to_le_bytes());
        d.resize(HEADER_SIZE, 0);
        d.extend_from_slice(&body);
        d
    }
}

#[test]
fn test_minimal_document() {
    let data = AseWriter::new(32)
        .layer("Layer 1", 0)
        .cel(0, 0, (1, 1), &[255, 0, 0, 255])
        .text("hi")
        .end_frame(100)
        .finish();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.header.frame_count, 1);
    assert_eq!(doc.header.file_size as usize, data.len());
    assert_eq!(doc.layers.len(), 1);
    assert_eq!(doc.frames.len(), 1);

    let cel = &doc.frames[0].cels[0];
    assert_eq!(cel.pixels, Some(vec![Color::rgba(255, 0, 0, 255)]));
    assert_eq!(
        cel.user_data.as_ref().and_then(|u| u.text.as_deref()),
        Some("hi")
    );
}

#[test]
fn test_animation_with_compressed_cels() {
    let red = [255u8, 0, 0, 255].repeat(4);
    let blue = [0u8, 0, 255, 255].repeat(4);

    let data = AseWriter::new(32)
        .layer("Body", 0)
        .layer("Tiles", 2)
        .tag(0, 1, 2, "blink")
        .text("loops forever")
        .cel(0, 2, (2, 2), &compress_to_vec_zlib(&red, 9))
        .end_frame(80)
        .cel(0, 2, (2, 2), &compress_to_vec_zlib(&blue, 1))
        .cel(1, 3, (1, 1), &[0xDE, 0xAD])
        .end_frame(120)
        .finish();

    let doc = decode(&data).unwrap();
    assert_eq!(doc.frames.len(), 2);
    assert_eq!(doc.total_duration_ms(), 200);

    let tiles = doc.layer_by_name("Tiles").unwrap();
    assert_eq!(tiles.unsupported, Some(Unsupported::TilemapLayer));

    let blink = doc.tag_by_name("blink").unwrap();
    assert_eq!(blink.direction, LoopDirection::PingPong);
    assert_eq!(
        blink.user_data.as_ref().unwrap().text.as_deref(),
        Some("loops forever")
    );

    let first = doc.frames[0].cels[0].pixels.as_ref().unwrap();
    assert!(first.iter().all(|&p| p == Color::rgba(255, 0, 0, 255)));

    let second = &doc.frames[1];
    assert_eq!(second.cels.len(), 2);
    let pixels = second.cels[0].pixels.as_ref().unwrap();
    assert!(pixels.iter().all(|&p| p == Color::rgba(0, 0, 255, 255)));

    let tilemap_cel = &second.cels[1];
    assert_eq!(tilemap_cel.cel_type, CelType::CompressedTilemap);
    assert_eq!(tilemap_cel.unsupported, Some(Unsupported::CompressedTilemapCel));
    assert_eq!(doc.cel_layer(tilemap_cel).name, "Tiles");
}

#[test]
fn test_cel_before_any_layer() {
    let data = AseWriter::new(32)
        .cel(0, 0, (1, 1), &[0; 4])
        .end_frame(100)
        .finish();

    let err = decode(&data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
}

#[test]
fn test_header_magic_option() {
    let mut data = AseWriter::new(32).layer("L", 0).end_frame(50).finish();
    data[4..6].copy_from_slice(&0xA5E1u16.to_le_bytes());

    assert!(matches!(
        decode(&data),
        Err(AseError::InvalidMagic { found: 0xA5E1, .. })
    ));

    let options = DecodeOptions::default().with_strict_magic(false);
    let doc = decode_with_options(&data, &options).unwrap();
    assert_eq!(doc.header.magic, 0xA5E1);
    assert_eq!(doc.layers[0].name, "L");
}

#[test]
fn test_truncated_buffer() {
    let data = AseWriter::new(32)
        .layer("L", 0)
        .cel(0, 0, (2, 2), &[7; 16])
        .end_frame(100)
        .finish();

    for len in [0, 10, HEADER_SIZE + 8, data.len() - 1] {
        let err = decode(&data[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds, "truncated at {len}");
    }
}

#[test]
fn test_repeated_decodes_are_independent() {
    let a = AseWriter::new(32).layer("A", 0).end_frame(10).finish();
    let b = AseWriter::new(32).layer("B", 0).end_frame(10).finish();

    let first = decode(&a).unwrap();
    let second = decode(&b).unwrap();
    assert_eq!(first.layers.len(), 1);
    assert_eq!(second.layers.len(), 1);
    assert_eq!(second.layers[0].name, "B");
    assert_eq!(decode(&a).unwrap(), first);
}
