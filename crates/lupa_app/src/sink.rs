use lupa_core::jpeg::{ScanEvent, ScanSink};

/// Verbose diagnostics sink: one trace line per marker event.
pub struct TracePrinter;

impl ScanSink for TracePrinter {
    fn record(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Marker { code, name } => {
                println!("[jpeg] marker 0xFF{code:02X} ({name})");
            }
            ScanEvent::Segment {
                code,
                name,
                segment_len,
                payload_len,
            } => {
                println!(
                    "[jpeg] marker 0xFF{code:02X} ({name}), segment_len={segment_len}, payload={payload_len}"
                );
            }
            ScanEvent::FrameParsed(info) => {
                println!(
                    "[jpeg] SOF parsed: width={} height={} components={} precision={}",
                    info.width, info.height, info.components, info.precision
                );
            }
        }
    }
}
