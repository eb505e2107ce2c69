//! Image references
//!
//! Only two raster formats are accepted for the cover, an image title page
//! and auxiliary images. JPEG files are expected to use the `.jpeg`
//! extension.

use serde::{Deserialize, Serialize};

/// Accepted image media types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    /// Map a file extension to a media type
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(MediaType::Png),
            "jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }

    /// MIME string used in the package manifest
    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }
}

/// An image file referenced by the book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// File name with extension, relative to the source directory
    pub file_name: String,
    /// Media type derived from the extension
    pub media_type: MediaType,
}

impl ImageRef {
    /// Build a reference from a file name, or `None` for an unsupported extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let media_type = MediaType::from_extension(ext)?;
        Some(Self {
            file_name: file_name.to_string(),
            media_type,
        })
    }
}
