//! Recording descriptor value object

/// A call recording as announced by the recordings API listing.
///
/// `file_id` is the primary key for the whole pipeline: storage object keys,
/// record store rows, and callback payloads are all derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingDescriptor {
    file_id: String,
    project_id: Option<String>,
    file_extension: String,
}

impl RecordingDescriptor {
    /// Create a descriptor from listing fields
    pub fn new(
        file_id: impl Into<String>,
        project_id: Option<String>,
        file_extension: impl Into<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            project_id,
            file_extension: file_extension.into(),
        }
    }

    /// The unique, source-assigned identifier of the recording
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// The opaque project grouping identifier, if the listing carried one
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// The audio container extension (e.g. "wav", "mp3")
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let descriptor = RecordingDescriptor::new("f1", Some("p9".to_string()), "mp3");
        assert_eq!(descriptor.file_id(), "f1");
        assert_eq!(descriptor.project_id(), Some("p9"));
        assert_eq!(descriptor.file_extension(), "mp3");
    }
}
