//! File naming for downloaded images
//!
//! Names must stay stable across reruns: re-downloading the same page
//! number overwrites the same file instead of creating a duplicate, which
//! is what makes a resumed crawl's output identical to an uninterrupted one.

use url::Url;

/// Characters that are illegal in path segments on common filesystems
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Width reserved in a file name for the numeric prefix plus separator space
const PREFIX_RESERVED: usize = 10;

/// Width reserved in a file name for the dot plus extension
const EXTENSION_RESERVED: usize = 4;

/// Sanitizes arbitrary caption text into a filesystem-safe name component
///
/// Removes characters illegal in path segments, strips trailing periods
/// (illegal as a trailing character on Windows), and truncates so that the
/// caller's numeric prefix and extension still fit inside `max_length`.
/// The bound is counted in bytes, since that is what filesystem name limits
/// measure, but truncation never splits a multibyte character. Pure and
/// deterministic; empty or fully-illegal input yields an empty string,
/// which is still a valid name component.
pub fn sanitize(text: &str, max_length: usize) -> String {
    let cleaned: String = text.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect();
    let cleaned = cleaned.trim_end_matches('.');

    let reserved = PREFIX_RESERVED + EXTENSION_RESERVED;
    let budget = max_length.saturating_sub(reserved);

    let mut result = String::with_capacity(budget.min(cleaned.len()));
    for c in cleaned.chars() {
        if result.len() + c.len_utf8() > budget {
            break;
        }
        result.push(c);
    }
    result
}

/// Derives a file extension from the final path segment of an image URL
///
/// Returns the text after the last `.` of the last path segment, or an
/// empty string when the segment has no `.`. No validation is done that
/// the result is a genuine image extension.
pub fn image_extension(image_url: &Url) -> String {
    let last_segment = image_url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}

/// Builds the output file name for one page's image
///
/// Format: `"{cursor:04} {sanitizedCaption}.{extension}"`, e.g.
/// `"0007 A Sunny Day.png"`. The prefix is zero-padded to at least four
/// digits and widens naturally past 9999, so lexical sorting matches page
/// order for archives of any realistic size.
pub fn image_file_name(cursor: u64, caption: &str, extension: &str, max_length: usize) -> String {
    format!("{:04} {}.{}", cursor, sanitize(caption, max_length), extension)
}
