/// Maximum accepted size of a report image (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Image content types accepted on report submission
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Multipart field carrying the report image
pub const IMAGE_FIELD: &str = "image";

// =============================================================================
// COLUMN LIMITS
// =============================================================================

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_LOCATION_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_EMAIL_LENGTH: u64 = 100;

/// Default status given to new reports
pub const DEFAULT_REPORT_STATUS: &str = "open";
