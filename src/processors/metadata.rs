// boxfit/src/processors/metadata.rs
use crate::core::Result;
use exif::{Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// What a re-encode drops from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedMetadata {
    pub icc_profile_bytes: usize,
    pub exif_fields: usize,
}

impl EmbeddedMetadata {
    pub fn is_empty(&self) -> bool {
        self.icc_profile_bytes == 0 && self.exif_fields == 0
    }
}

pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Output encoders never receive the profile or EXIF block, so stripping
    /// amounts to recording what the source carried.
    pub fn strip(&self, icc_profile: Option<&[u8]>, path: &Path) -> EmbeddedMetadata {
        let stripped = EmbeddedMetadata {
            icc_profile_bytes: icc_profile.map_or(0, <[u8]>::len),
            exif_fields: self
                .read_exif(path)
                .map(|exif| exif.fields().count())
                .unwrap_or(0),
        };

        if !stripped.is_empty() {
            log::debug!(
                "Stripping metadata from {}: {} byte colour profile, {} EXIF fields",
                path.display(),
                stripped.icc_profile_bytes,
                stripped.exif_fields
            );
        }

        stripped
    }

    /// `None` when the container has no EXIF block or is not one kamadak-exif reads.
    pub fn read_exif(&self, path: &Path) -> Option<Exif> {
        let file = File::open(path).ok()?;
        let mut bufreader = BufReader::new(&file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => Some(exif),
            Err(exif::Error::NotFound(_)) => None,
            Err(e) => {
                log::debug!("No readable EXIF in {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn describe(&self, path: &Path) -> Result<Vec<(String, String)>> {
        let Some(exif) = self.read_exif(path) else {
            return Ok(Vec::new());
        };

        let common = [
            Tag::Make,
            Tag::Model,
            Tag::DateTimeOriginal,
            Tag::Orientation,
            Tag::XResolution,
            Tag::YResolution,
            Tag::Software,
            Tag::ColorSpace,
        ];

        Ok(common
            .iter()
            .filter_map(|tag| exif.get_field(*tag, In::PRIMARY))
            .map(|field| {
                (
                    field.tag.to_string(),
                    field.display_value().with_unit(&exif).to_string(),
                )
            })
            .collect())
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
