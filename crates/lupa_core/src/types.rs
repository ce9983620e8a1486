#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Jpeg,
    Png,
    Unknown,
}

impl FileType {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Unknown => "bin",
        }
    }

    #[must_use]
    pub const fn header_bytes(&self) -> &'static [u8] {
        match self {
            Self::Jpeg => &[0xFF, 0xD8],
            Self::Png => &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            Self::Unknown => &[],
        }
    }

    /// Identifies a file from its leading signature bytes.
    #[must_use]
    pub fn sniff(prefix: &[u8]) -> Self {
        if prefix.starts_with(Self::Jpeg.header_bytes()) {
            Self::Jpeg
        } else if prefix.starts_with(Self::Png.header_bytes()) {
            Self::Png
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        assert_eq!(FileType::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), FileType::Jpeg);
    }

    #[test]
    fn test_sniff_png() {
        assert_eq!(
            FileType::sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            FileType::Png
        );
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(FileType::sniff(&[0x00, 0x01]), FileType::Unknown);
        assert_eq!(FileType::sniff(&[]), FileType::Unknown);
        // A PNG prefix shorter than the full signature stays unknown
        assert_eq!(FileType::sniff(&[0x89, 0x50]), FileType::Unknown);
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileType::Jpeg.extension(), "jpg");
        assert_eq!(FileType::Png.extension(), "png");
        assert_eq!(FileType::Unknown.extension(), "bin");
    }
}
