//! lupa - command-line JPEG inspector
//!
//! Sniffs a file's signature, walks the JPEG marker stream for frame
//! geometry, and cross-checks the result against a full pixel decode.

mod decode;
mod report;
mod sink;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use lupa_core::jpeg::{self, FrameInfo};
use lupa_core::{CoreError, FileType};
use lupa_io::FileSource;
use report::FileReport;
use sink::TracePrinter;

#[derive(Parser, Debug)]
#[command(name = "lupa")]
#[command(version, about = "Inspect and validate JPEG files", long_about = None)]
struct Args {
    /// Print every marker encountered while parsing
    #[arg(short, long)]
    verbose: bool,

    /// Print file and frame metadata instead of decoding
    #[arg(short, long)]
    info: bool,

    /// Run the JPEG parser even when the signature sniff disagrees
    #[arg(short, long)]
    force_jpeg: bool,

    /// Image file to inspect
    path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let file_report = FileReport::inspect(&args.path)
        .with_context(|| format!("failed to inspect {}", args.path.display()))?;

    if args.verbose && !args.info {
        file_report.print();
    }

    if !args.force_jpeg && file_report.file_type != FileType::Jpeg {
        bail!(
            "{} is not a JPEG file (signature {:02X} {:02X}); pass --force-jpeg to try anyway",
            args.path.display(),
            file_report.signature[0],
            file_report.signature[1]
        );
    }

    let frame = match parse_markers(&args.path, args.verbose) {
        Ok(frame) => Some(frame),
        Err(err) if args.force_jpeg => {
            eprintln!("JPEG parse error: {err} (forced mode: continuing)");
            None
        }
        Err(err) => return Err(err).context("JPEG parse failed"),
    };

    if args.info {
        file_report.print();
        file_report.print_metadata()?;
        match frame {
            Some(frame) => println!(
                "JPEG: {}x{}, components={}, precision={}, SOF={}",
                frame.width,
                frame.height,
                frame.components,
                frame.precision,
                frame.variant_name().unwrap_or("?")
            ),
            None => println!("JPEG parser: failed (forced mode active)"),
        }
        return Ok(());
    }

    let decoded = decode::decode_image(&args.path)?;
    decode::print_summary(&decoded, frame.as_ref());
    Ok(())
}

fn parse_markers(path: &Path, verbose: bool) -> std::result::Result<FrameInfo, CoreError> {
    let mut src = FileSource::open(path)?;
    if verbose {
        jpeg::parse_stream(&mut src, &mut TracePrinter)
    } else {
        jpeg::parse(&mut src)
    }
}
