use std::time::SystemTime;

/// Last observed state of one monitored source.
///
/// `digest` is only filled once the change detector has had to fall back to
/// hashing; when present it matches the bytes seen at that read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub name: String,
    pub modified: SystemTime,
    pub digest: Option<String>,
}

impl SourceFingerprint {
    #[must_use]
    pub fn new(name: impl Into<String>, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            modified,
            digest: None,
        }
    }
}
