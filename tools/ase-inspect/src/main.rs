//! ase-inspect - Aseprite file inspector
//!
//! Loads an .ase/.aseprite file, decodes it with nether-ase and prints what
//! was found.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nether_ase::{decode_with_options, DecodeOptions, Document};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ase-inspect")]
#[command(about = "Inspect Aseprite sprite files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print header, layers, tags and a per-frame summary
    Info {
        /// Input .ase/.aseprite file
        input: PathBuf,

        /// Print the document as JSON instead
        #[arg(long)]
        json: bool,

        /// Continue past header and frame magic mismatches
        #[arg(long)]
        lenient_magic: bool,
    },

    /// List every cel of every frame
    Cels {
        /// Input .ase/.aseprite file
        input: PathBuf,

        /// Continue past header and frame magic mismatches
        #[arg(long)]
        lenient_magic: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info {
            input,
            json,
            lenient_magic,
        } => {
            let doc = load(&input, lenient_magic)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_info(&doc);
            }
        }

        Commands::Cels {
            input,
            lenient_magic,
        } => {
            let doc = load(&input, lenient_magic)?;
            print_cels(&doc);
        }
    }

    Ok(())
}

fn load(path: &Path, lenient_magic: bool) -> Result<Document> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    tracing::info!("Decoding {:?} ({} bytes)", path, data.len());

    let options = DecodeOptions::default().with_strict_magic(!lenient_magic);
    let doc = decode_with_options(&data, &options)
        .with_context(|| format!("Failed to decode {:?}", path))?;
    Ok(doc)
}

fn print_info(doc: &Document) {
    let header = &doc.header;
    println!(
        "Canvas: {}x{}, {} bpp, {} frames ({} ms)",
        header.width,
        header.height,
        header.color_depth,
        header.frame_count,
        doc.total_duration_ms()
    );

    println!("Layers ({}):", doc.layers.len());
    for (index, layer) in doc.layers.iter().enumerate() {
        let indent = "  ".repeat(layer.child_level as usize + 1);
        print!(
            "{}[{}] {} ({:?}, opacity {:.2}{})",
            indent,
            index,
            layer.name,
            layer.layer_type,
            layer.opacity,
            if layer.is_visible() { "" } else { ", hidden" }
        );
        if let Some(reason) = &layer.unsupported {
            print!(" - {}", reason);
        }
        println!();
    }

    println!("Tags ({}):", doc.tags.len());
    for tag in &doc.tags {
        println!(
            "  {}: frames {}-{} {:?} {}",
            tag.name, tag.from_frame, tag.to_frame, tag.direction, tag.color
        );
    }

    println!("Frames ({}):", doc.frames.len());
    for (index, frame) in doc.frames.iter().enumerate() {
        println!(
            "  {}: {} ms, {} chunks, {} cels",
            index,
            frame.duration_ms,
            frame.chunk_count,
            frame.cels.len()
        );
    }

    for user_data in &doc.user_data {
        if let Some(text) = &user_data.text {
            println!("Note: {}", text);
        }
    }
}

fn print_cels(doc: &Document) {
    for (index, frame) in doc.frames.iter().enumerate() {
        println!("Frame {}:", index);
        for cel in &frame.cels {
            let layer = doc.cel_layer(cel);
            let size = cel
                .size
                .map(|s| format!("{}x{}", s.width, s.height))
                .unwrap_or_else(|| "-".to_string());
            let status = match (&cel.pixels, &cel.unsupported) {
                (Some(pixels), _) => format!("{} pixels", pixels.len()),
                (None, Some(reason)) => reason.to_string(),
                (None, None) => "no pixels".to_string(),
            };
            println!(
                "  {} @ ({}, {}) {} {:?}: {}",
                layer.name, cel.x, cel.y, size, cel.cel_type, status
            );
            if let Some(text) = cel.user_data.as_ref().and_then(|u| u.text.as_ref()) {
                println!("    \"{}\"", text);
            }
        }
    }
}
