/// A user-submitted file, alive for the duration of a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Audio,
}

impl MediaType {
    /// Dispatch on the MIME-type prefix. Anything outside `image/*` and
    /// `audio/*` has no pipeline and must be rejected before any
    /// inference call is made.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            m if m.starts_with("image/") => Some(Self::Image),
            m if m.starts_with("audio/") => Some(Self::Audio),
            _ => None,
        }
    }
}

impl Upload {
    pub fn new(filename: String, mime_type: String, data: Vec<u8>) -> Self {
        Self {
            filename,
            mime_type,
            data,
        }
    }

    pub fn media_type(&self) -> Option<MediaType> {
        MediaType::from_mime(&self.mime_type)
    }
}
