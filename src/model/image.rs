/// Tagged interpretation of a record's `image` field.
///
/// Replaces prefix-sniffing scattered through the request path with one
/// parse: absolute URLs are stored verbatim at ingest, local paths are
/// media-store relative, and empty means the record has no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Url(String),
    LocalPath(String),
    Absent,
}

impl ImageRef {
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Absent
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::LocalPath(raw.to_string())
        }
    }
}
