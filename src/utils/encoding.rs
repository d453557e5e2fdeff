//! UTF-8 file reading for settings sources.
//!
//! Settings files are UTF-8 text. A leading BOM is tolerated, and
//! invalid byte sequences are decoded with replacement characters
//! rather than rejected.

use encoding_rs::UTF_8;
use std::io;
use std::path::Path;

/// Read a settings file as UTF-8 text.
///
/// `UTF_8.decode` strips a UTF-8 BOM when present and substitutes
/// U+FFFD for invalid sequences, so only I/O failures surface as
/// errors.
pub fn read_utf8(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let (decoded, _, _) = UTF_8.decode(&bytes);
    Ok(decoded.into_owned())
}
