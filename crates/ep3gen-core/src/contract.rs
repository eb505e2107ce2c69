//! Attribute contract
//!
//! Checks the attributes every book must declare, resolves the cover and
//! auxiliary images, and stamps the creation and modification timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use ep3gen_ast::{Attributes, ImageRef};

use crate::error::{ParseError, Result};

/// Attributes that must be present before body processing starts
pub const REQUIRED_ATTRIBUTES: [&str; 9] = [
    "version",
    "title",
    "title-sort",
    "author",
    "author-sort",
    "published",
    "publisher",
    "language",
    "cover-image",
];

/// The only accepted value of the `version` attribute
pub const FORMAT_VERSION: &str = "epub3";

/// Images resolved from the header attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImages {
    pub cover: ImageRef,
    pub images: Vec<ImageRef>,
}

/// Check the mandatory attributes and resolve image references
pub fn validate_attributes(attributes: &Attributes) -> Result<ResolvedImages> {
    for key in REQUIRED_ATTRIBUTES {
        if !attributes.contains(key) {
            return Err(ParseError::MissingAttribute { key });
        }
    }

    let version = attributes.get_or_empty("version");
    if version != FORMAT_VERSION {
        return Err(ParseError::InvalidAttribute {
            key: "version",
            value: version.to_string(),
            expected: FORMAT_VERSION,
        });
    }

    let cover = resolve_image(attributes.get_or_empty("cover-image"))?;
    let images = match attributes.get("images") {
        Some(list) => parse_image_list(list)?,
        None => Vec::new(),
    };

    Ok(ResolvedImages { cover, images })
}

/// Resolve one image file name, checking its extension
pub fn resolve_image(file_name: &str) -> Result<ImageRef> {
    ImageRef::from_file_name(file_name).ok_or_else(|| ParseError::UnsupportedImageExtension {
        file: file_name.to_string(),
    })
}

/// Parse a comma-separated image list, keeping the first of any duplicates
pub fn parse_image_list(list: &str) -> Result<Vec<ImageRef>> {
    let mut images: Vec<ImageRef> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let image = resolve_image(name)?;
        if !images.iter().any(|i| i.file_name == image.file_name) {
            images.push(image);
        }
    }
    Ok(images)
}

/// Set `created` when absent and always refresh `modified`
pub fn stamp_timestamps(attributes: &mut Attributes, now: &str) {
    if !attributes.contains("created") {
        attributes.set("created", now);
    }
    attributes.set("modified", now);
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`
pub fn current_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_timestamp(secs)
}

/// Format seconds since the Unix epoch as an RFC 3339 UTC timestamp
pub fn format_timestamp(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

// Howard Hinnant's days-to-civil conversion
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
