//! Full pixel decode through the `image` codec, used to cross-check the
//! geometry the marker parser reported.

use anyhow::{Context, Result};
use image::GenericImageView;
use lupa_core::jpeg::FrameInfo;
use std::path::Path;
use tracing::debug;

pub struct Decoded {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

pub fn decode_image(path: &Path) -> Result<Decoded> {
    let img = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    let (width, height) = img.dimensions();
    let channels = img.color().channel_count();
    debug!(width, height, channels, "decoded pixel data");

    Ok(Decoded {
        width,
        height,
        channels,
    })
}

pub fn print_summary(decoded: &Decoded, frame: Option<&FrameInfo>) {
    println!(
        "Decoded: {}x{}, {} channels",
        decoded.width, decoded.height, decoded.channels
    );

    let Some(frame) = frame else { return };
    if decoded.width != u32::from(frame.width) || decoded.height != u32::from(frame.height) {
        eprintln!(
            "Warning: decoder reports {}x{} but the frame header declares {}x{}",
            decoded.width, decoded.height, frame.width, frame.height
        );
    } else if decoded.channels != frame.components {
        eprintln!(
            "Warning: decoder reports {} channels but the frame header declares {} components",
            decoded.channels, frame.components
        );
    } else {
        println!("Frame header agrees with the decoded output");
    }
}
