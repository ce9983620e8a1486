//! Byte-source adapters backing the lupa marker parser with real storage.

mod source;

pub use source::{FileSource, MmapSource};
