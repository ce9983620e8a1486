//! Marker-stream scanner: walks the segment sequence of a JPEG container
//! and extracts frame geometry without decoding pixel data.

use super::{FILL_BYTE, FrameInfo, MarkerType, SOI, STUFFING, is_restart_marker, marker_name};
use crate::error::{CoreError, Result};
use crate::traits::ByteSource;

/// A frame header carries at least precision, height, width and component
/// count: 1 + 2 + 2 + 1 bytes.
const SOF_FIXED_LEN: u16 = 6;

/// Where the scan loop gets its next marker from.
///
/// After an entropy-coded region the terminating marker has already been
/// consumed by [`skip_entropy`], so the loop must dispatch it directly
/// instead of hunting for a new fill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    NeedScan,
    HaveMarker(u8),
}

/// Observational event emitted while scanning. Consuming these never
/// affects the parse outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// A standalone marker (no length field).
    Marker { code: u8, name: &'static str },
    /// A lengthed segment header.
    Segment {
        code: u8,
        name: &'static str,
        segment_len: u16,
        payload_len: u16,
    },
    /// Geometry extracted from a frame-header segment.
    FrameParsed(FrameInfo),
}

/// Receiver for [`ScanEvent`]s. Recording is infallible so a sink can
/// never corrupt or abort a parse.
pub trait ScanSink {
    fn record(&mut self, event: ScanEvent);
}

impl ScanSink for Vec<ScanEvent> {
    #[inline]
    fn record(&mut self, event: ScanEvent) {
        self.push(event);
    }
}

/// Sink that discards every event.
pub struct NullSink;

impl ScanSink for NullSink {
    #[inline]
    fn record(&mut self, _event: ScanEvent) {}
}

/// Reads until a fill byte appears, collapses the fill run, and returns the
/// first non-fill byte as the marker code.
fn next_marker<S: ByteSource>(src: &mut S) -> Result<u8> {
    while src.read_u8()? != FILL_BYTE {}
    loop {
        let byte = src.read_u8()?;
        if byte != FILL_BYTE {
            return Ok(byte);
        }
    }
}

/// Consumes entropy-coded bytes following a scan header until a genuine
/// marker terminates the region, and returns that marker code.
///
/// Stuffed `FF 00` pairs are literal data and restart markers are
/// resynchronization points inside the coded stream; neither ends the
/// region. Restart markers are reported to the sink as they are consumed.
pub fn skip_entropy<S: ByteSource, K: ScanSink>(src: &mut S, sink: &mut K) -> Result<u8> {
    loop {
        if src.read_u8()? != FILL_BYTE {
            continue;
        }

        let mut marker = src.read_u8()?;
        while marker == FILL_BYTE {
            marker = src.read_u8()?;
        }

        if marker == STUFFING {
            continue;
        }
        if is_restart_marker(marker) {
            sink.record(ScanEvent::Marker {
                code: marker,
                name: marker_name(marker),
            });
            continue;
        }

        return Ok(marker);
    }
}

/// Interprets a frame-header payload into `info`.
///
/// Consumes exactly six bytes; any payload beyond that is the caller's to
/// skip. Note the wire order: height precedes width.
pub fn read_frame_header<S: ByteSource>(
    src: &mut S,
    payload_len: u16,
    marker: u8,
    info: &mut FrameInfo,
) -> Result<()> {
    if payload_len < SOF_FIXED_LEN {
        return Err(CoreError::BadFormat(format!(
            "frame header payload of {payload_len} bytes is shorter than {SOF_FIXED_LEN}"
        )));
    }

    info.precision = src.read_u8()?;
    info.height = src.read_u16_be()?;
    info.width = src.read_u16_be()?;
    info.components = src.read_u8()?;
    info.sof_marker = Some(marker);
    Ok(())
}

/// Walks the marker stream of a positioned byte source and returns the
/// frame geometry, reporting every marker to `sink` along the way.
///
/// Fails with [`CoreError::BadSignature`] when the stream does not open
/// with SOI, [`CoreError::BadFormat`] on structural violations, and
/// [`CoreError::Io`] when the source runs dry mid-structure. On any error
/// the returned `FrameInfo` never escapes; partial state is not observable.
pub fn parse_stream<S: ByteSource, K: ScanSink>(src: &mut S, sink: &mut K) -> Result<FrameInfo> {
    let b0 = src.read_u8()?;
    let b1 = src.read_u8()?;
    if b0 != FILL_BYTE || b1 != SOI {
        return Err(CoreError::BadSignature);
    }
    sink.record(ScanEvent::Marker {
        code: SOI,
        name: marker_name(SOI),
    });

    let mut info = FrameInfo::default();
    let mut step = ScanStep::NeedScan;

    loop {
        let marker = match step {
            ScanStep::HaveMarker(code) => code,
            ScanStep::NeedScan => next_marker(src)?,
        };
        step = ScanStep::NeedScan;

        match MarkerType::from_byte(marker) {
            MarkerType::Eoi => {
                sink.record(ScanEvent::Marker {
                    code: marker,
                    name: marker_name(marker),
                });
                if !info.has_geometry() {
                    return Err(CoreError::BadFormat(
                        "end of image reached without frame dimensions".into(),
                    ));
                }
                return Ok(info);
            }

            // TEM and restart markers stand alone; no length field follows.
            MarkerType::Tem | MarkerType::Rst(_) => continue,

            marker_type => {
                let segment_len = src.read_u16_be()?;
                if segment_len < 2 {
                    return Err(CoreError::BadFormat(format!(
                        "segment length {segment_len} does not cover its own length field"
                    )));
                }
                let payload_len = segment_len - 2;
                sink.record(ScanEvent::Segment {
                    code: marker,
                    name: marker_name(marker),
                    segment_len,
                    payload_len,
                });

                match marker_type {
                    MarkerType::Sos => {
                        if payload_len > 0 {
                            src.skip(payload_len)?;
                        }
                        step = ScanStep::HaveMarker(skip_entropy(src, sink)?);
                    }
                    MarkerType::Sof(code) => {
                        read_frame_header(src, payload_len, code, &mut info)?;
                        sink.record(ScanEvent::FrameParsed(info));
                        if payload_len > SOF_FIXED_LEN {
                            src.skip(payload_len - SOF_FIXED_LEN)?;
                        }
                    }
                    _ => {
                        if payload_len > 0 {
                            src.skip(payload_len)?;
                        }
                    }
                }
            }
        }
    }
}

/// [`parse_stream`] without diagnostics.
pub fn parse<S: ByteSource>(src: &mut S) -> Result<FrameInfo> {
    parse_stream(src, &mut NullSink)
}
