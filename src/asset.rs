//! Uploaded source asset
//!
//! The asset is an opaque, already-resolved payload: the core never
//! fetches, validates, or transforms it. It is read-only for the lifetime
//! of a view and cheap to clone (the payload is shared).

use bytes::Bytes;

use crate::utils::string::format_bytes;

/// Fixed suffix appended to the derived output name
pub const OUTPUT_SUFFIX: &str = "_vr180.mp4";

/// One uploaded 2D video, held as an opaque blob
#[derive(Debug, Clone)]
pub struct SourceAsset {
    name: String,
    data: Bytes,
}

impl SourceAsset {
    pub fn new(name: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Original file name as uploaded
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw payload
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Human readable payload size for the upload readout
    pub fn display_size(&self) -> String {
        format_bytes(self.size_bytes())
    }

    /// Derive the download file name
    ///
    /// Takes the original name up to its first `.` and appends the fixed
    /// VR180 suffix.
    pub fn output_name(&self) -> String {
        let base = match self.name.split_once('.') {
            Some((base, _)) => base,
            None => self.name.as_str(),
        };
        format!("{}{}", base, OUTPUT_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_name_cuts_at_first_dot() {
        let asset = SourceAsset::new("holiday.clip.mp4", Bytes::new());
        assert_eq!(asset.output_name(), "holiday_vr180.mp4");
    }

    #[test]
    fn test_output_name_without_extension() {
        let asset = SourceAsset::new("holiday", Bytes::new());
        assert_eq!(asset.output_name(), "holiday_vr180.mp4");
    }

    #[test]
    fn test_clone_shares_payload() {
        let asset = SourceAsset::new("a.mp4", Bytes::from(vec![0u8; 2048]));
        let copy = asset.clone();
        assert_eq!(copy.size_bytes(), 2048);
        assert_eq!(copy.display_size(), "2.00 KB");
    }
}
