//! File-backed implementations of the `ByteSource` cursor.

use lupa_core::{ByteSource, CoreError, Result};
use memmap2::Mmap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read};
use std::path::Path;

/// Buffered sequential reader over a regular file.
///
/// Skips go through `seek_relative`, which preserves the read buffer where
/// possible and accepts positions past the end of the file; a skip that
/// overshoots only fails on the next read.
pub struct FileSource {
    inner: BufReader<File>,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(false)
            .open(path.as_ref())?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{Advice, fadvise};

            let _ = fadvise(&file, 0, None, Advice::Sequential);
            let _ = fadvise(&file, 0, None, Advice::NoReuse);
        }

        Ok(Self {
            inner: BufReader::new(file),
        })
    }
}

impl ByteSource for FileSource {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn skip(&mut self, n: u16) -> Result<()> {
        self.inner.seek_relative(i64::from(n))?;
        Ok(())
    }
}

/// Memory-mapped source with a logical read position.
pub struct MmapSource {
    mmap: Mmap,
    pos: usize,
}

impl MmapSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        if file.metadata()?.len() == 0 {
            return Err(CoreError::BadFormat("cannot map an empty file".into()));
        }

        let mmap = unsafe { Mmap::map(&file) }?;

        #[cfg(target_os = "linux")]
        {
            use memmap2::Advice;
            let _ = mmap.advise(Advice::Sequential);
        }

        Ok(Self { mmap, pos: 0 })
    }
}

impl ByteSource for MmapSource {
    fn read_u8(&mut self) -> Result<u8> {
        match self.mmap.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()),
        }
    }

    fn skip(&mut self, n: u16) -> Result<()> {
        // Moving past the end is legal; the next read reports the failure.
        self.pos = self.pos.saturating_add(usize::from(n));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_file_source_reads_and_skips() {
        let file = temp_with(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        let mut src = FileSource::open(file.path()).unwrap();

        assert_eq!(src.read_u8().unwrap(), 0x01);
        src.skip(2).unwrap();
        assert_eq!(src.read_u16_be().unwrap(), 0x0405);
    }

    #[test]
    fn test_file_source_skip_past_end_is_lazy() {
        let file = temp_with(&[0xAA, 0xBB]);
        let mut src = FileSource::open(file.path()).unwrap();

        src.skip(1000).unwrap();
        assert!(matches!(src.read_u8(), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_file_source_exhaustion() {
        let file = temp_with(&[0xAA]);
        let mut src = FileSource::open(file.path()).unwrap();

        assert_eq!(src.read_u8().unwrap(), 0xAA);
        assert!(matches!(src.read_u8(), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_mmap_source_reads_and_skips() {
        let file = temp_with(&[0x10, 0x20, 0x30, 0x40]);
        let mut src = MmapSource::open(file.path()).unwrap();

        assert_eq!(src.read_u16_be().unwrap(), 0x1020);
        src.skip(1).unwrap();
        assert_eq!(src.read_u8().unwrap(), 0x40);
    }

    #[test]
    fn test_mmap_source_skip_past_end_is_lazy() {
        let file = temp_with(&[0x10]);
        let mut src = MmapSource::open(file.path()).unwrap();

        src.skip(50).unwrap();
        assert!(matches!(src.read_u8(), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_mmap_source_rejects_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            MmapSource::open(file.path()),
            Err(CoreError::BadFormat(_))
        ));
    }

    #[test]
    fn test_sources_feed_the_parser() {
        let mut stream = vec![0xFF, 0xD8];
        stream.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x08, 0x08, 0x00, 0x40, 0x00, 0x50, 0x01]);
        stream.extend_from_slice(&[0xFF, 0xD9]);
        let file = temp_with(&stream);

        let mut src = FileSource::open(file.path()).unwrap();
        let info = lupa_core::jpeg::parse(&mut src).unwrap();
        assert_eq!((info.width, info.height), (80, 64));

        let mut src = MmapSource::open(file.path()).unwrap();
        let info = lupa_core::jpeg::parse(&mut src).unwrap();
        assert_eq!((info.width, info.height), (80, 64));
    }
}
