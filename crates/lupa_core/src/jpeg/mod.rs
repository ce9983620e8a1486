//! JPEG marker table and the container-level marker-stream parser.
//!
//! Only the segment structure is interpreted here; entropy-coded data is
//! skipped, not decoded, and metadata segment payloads are never read.

mod scanner;

pub use scanner::{
    NullSink, ScanEvent, ScanSink, ScanStep, parse, parse_stream, read_frame_header, skip_entropy,
};

/// Fill byte prefixing every marker; runs of it are legal padding.
pub const FILL_BYTE: u8 = 0xFF;
/// A zero after a fill byte inside entropy data escapes a literal 0xFF.
pub const STUFFING: u8 = 0x00;

pub const TEM: u8 = 0x01;
pub const SOF0: u8 = 0xC0;
pub const SOF1: u8 = 0xC1;
pub const SOF2: u8 = 0xC2;
pub const SOF3: u8 = 0xC3;
pub const DHT: u8 = 0xC4;
pub const DAC: u8 = 0xCC;
pub const RST0: u8 = 0xD0;
pub const RST1: u8 = 0xD1;
pub const RST2: u8 = 0xD2;
pub const RST3: u8 = 0xD3;
pub const RST4: u8 = 0xD4;
pub const RST5: u8 = 0xD5;
pub const RST6: u8 = 0xD6;
pub const RST7: u8 = 0xD7;
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;
pub const DQT: u8 = 0xDB;
pub const DNL: u8 = 0xDC;
pub const DRI: u8 = 0xDD;
pub const DHP: u8 = 0xDE;
pub const EXP: u8 = 0xDF;
pub const APP0: u8 = 0xE0;
pub const APP15: u8 = 0xEF;
pub const COM: u8 = 0xFE;

#[inline]
pub const fn is_restart_marker(marker: u8) -> bool {
    marker >= RST0 && marker <= RST7
}

/// Frame-header family: baseline, extended, progressive and lossless
/// variants, Huffman and arithmetic alike. 0xC4 (DHT) and 0xC8 (JPG) sit
/// in the same numeric neighborhood and are excluded.
#[inline]
pub const fn is_sof_marker(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

#[inline]
pub const fn is_app_marker(marker: u8) -> bool {
    marker >= APP0 && marker <= APP15
}

/// Human-readable marker name, decoupled from any diagnostics transport.
#[must_use]
pub const fn marker_name(code: u8) -> &'static str {
    match code {
        TEM => "TEM",
        SOF0 => "SOF0",
        SOF1 => "SOF1",
        SOF2 => "SOF2",
        SOF3 => "SOF3",
        DHT => "DHT",
        0xC5 => "SOF5",
        0xC6 => "SOF6",
        0xC7 => "SOF7",
        0xC8 => "JPG",
        0xC9 => "SOF9",
        0xCA => "SOF10",
        0xCB => "SOF11",
        DAC => "DAC",
        0xCD => "SOF13",
        0xCE => "SOF14",
        0xCF => "SOF15",
        RST0 => "RST0",
        RST1 => "RST1",
        RST2 => "RST2",
        RST3 => "RST3",
        RST4 => "RST4",
        RST5 => "RST5",
        RST6 => "RST6",
        RST7 => "RST7",
        SOI => "SOI",
        EOI => "EOI",
        SOS => "SOS",
        DQT => "DQT",
        DNL => "DNL",
        DRI => "DRI",
        DHP => "DHP",
        EXP => "EXP",
        0xE0 => "APP0",
        0xE1 => "APP1",
        0xE2 => "APP2",
        0xE3 => "APP3",
        0xE4 => "APP4",
        0xE5 => "APP5",
        0xE6 => "APP6",
        0xE7 => "APP7",
        0xE8 => "APP8",
        0xE9 => "APP9",
        0xEA => "APP10",
        0xEB => "APP11",
        0xEC => "APP12",
        0xED => "APP13",
        0xEE => "APP14",
        0xEF => "APP15",
        0xF0..=0xFD => "JPG",
        COM => "COM",
        _ => "MARKER",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerType {
    Soi,
    Eoi,
    Sos,
    Dqt,
    Dht,
    Sof(u8),
    Dri,
    App(u8),
    Com,
    Rst(u8),
    Tem,
    Other(u8),
}

impl MarkerType {
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            SOI => Self::Soi,
            EOI => Self::Eoi,
            SOS => Self::Sos,
            DQT => Self::Dqt,
            DHT => Self::Dht,
            DRI => Self::Dri,
            COM => Self::Com,
            TEM => Self::Tem,
            b if is_restart_marker(b) => Self::Rst(b - RST0),
            b if is_app_marker(b) => Self::App(b - APP0),
            b if is_sof_marker(b) => Self::Sof(b),
            b => Self::Other(b),
        }
    }

    #[inline]
    pub fn to_byte(&self) -> u8 {
        match self {
            Self::Soi => SOI,
            Self::Eoi => EOI,
            Self::Sos => SOS,
            Self::Dqt => DQT,
            Self::Dht => DHT,
            Self::Dri => DRI,
            Self::Com => COM,
            Self::Tem => TEM,
            Self::Rst(n) => RST0 + n,
            Self::App(n) => APP0 + n,
            Self::Sof(b) | Self::Other(b) => *b,
        }
    }
}

/// Frame geometry extracted from a frame-header segment.
///
/// Zero-valued until the first SOF segment is parsed; when a stream carries
/// several, the last one parsed wins. Only trust the contents after the
/// scan reports success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: u16,
    pub height: u16,
    pub components: u8,
    pub precision: u8,
    pub sof_marker: Option<u8>,
}

impl FrameInfo {
    #[inline]
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn variant_name(&self) -> Option<&'static str> {
        self.sof_marker.map(marker_name)
    }
}
