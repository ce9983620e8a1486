//! Filesystem-level report: signature sniff, size and metadata formatting.

use anyhow::{Result, ensure};
use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use lupa_core::FileType;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

// Long enough for the largest magic we sniff (the 8-byte PNG signature).
const SNIFF_LEN: usize = 8;

pub struct FileReport {
    pub path: PathBuf,
    pub size: u64,
    pub file_type: FileType,
    pub signature: [u8; 2],
}

impl FileReport {
    pub fn inspect(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut prefix = [0u8; SNIFF_LEN];
        let n = file.read(&mut prefix)?;
        ensure!(n >= 2, "file too short to carry a signature");

        let file_type = FileType::sniff(&prefix[..n]);
        let size = file.metadata()?.len();
        debug!(path = %path.display(), size, %file_type, "sniffed file");

        Ok(Self {
            path: path.to_path_buf(),
            size,
            file_type,
            signature: [prefix[0], prefix[1]],
        })
    }

    pub fn print(&self) {
        println!("Path: {}", self.path.display());
        println!("Size: {} ({} bytes)", format_size(self.size, BINARY), self.size);
        println!("Type: {}", self.file_type);
        println!(
            "Signature: {:02X} {:02X}",
            self.signature[0], self.signature[1]
        );
    }

    pub fn print_metadata(&self) -> Result<()> {
        let meta = std::fs::metadata(&self.path)?;
        if let Ok(modified) = meta.modified() {
            let modified: DateTime<Local> = modified.into();
            println!("Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = meta.permissions().mode();
            println!("Permissions: {:04o} ({})", mode & 0o7777, mode_string(mode));
        }

        Ok(())
    }
}

#[cfg(unix)]
fn mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(9);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_inspect_jpeg_signature() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        file.flush().unwrap();

        let report = FileReport::inspect(file.path()).unwrap();
        assert_eq!(report.file_type, FileType::Jpeg);
        assert_eq!(report.signature, [0xFF, 0xD8]);
        assert_eq!(report.size, 6);
    }

    #[test]
    fn test_inspect_unknown_signature() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"GIF89a").unwrap();
        file.flush().unwrap();

        let report = FileReport::inspect(file.path()).unwrap();
        assert_eq!(report.file_type, FileType::Unknown);
        assert_eq!(report.signature, [b'G', b'I']);
    }

    #[test]
    fn test_inspect_rejects_tiny_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF]).unwrap();
        file.flush().unwrap();

        assert!(FileReport::inspect(file.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_string() {
        assert_eq!(mode_string(0o644), "rw-r--r--");
        assert_eq!(mode_string(0o755), "rwxr-xr-x");
        assert_eq!(mode_string(0o000), "---------");
    }
}
