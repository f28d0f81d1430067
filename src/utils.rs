/*!
 * Utility functions for codescan
 */

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected for NUL bytes
const BINARY_SNIFF_LEN: usize = 1024;

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = size as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{:.2} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.2} {}", value, UNITS[UNITS.len() - 1])
}

/// Suffix of a file name, including the leading dot.
///
/// A dot that starts or ends the name does not begin a suffix, so
/// `.bashrc` and `notes.` have none.
pub fn suffix(name: &str) -> Option<&str> {
    let idx = name.rfind('.')?;
    if idx == 0 || idx == name.len() - 1 {
        return None;
    }
    Some(&name[idx..])
}

/// Lower-cased single extension, or an empty string
pub fn extension_lower(name: &str) -> String {
    suffix(name).map(str::to_lowercase).unwrap_or_default()
}

/// Two trailing suffixes joined, lower-cased (`vite.config.js` -> `.config.js`)
pub fn double_extension(name: &str) -> Option<String> {
    let last = suffix(name)?;
    let stem = &name[..name.len() - last.len()];
    let previous = suffix(stem)?;
    Some(format!("{}{}", previous, last).to_lowercase())
}

/// Heuristic binary check.
///
/// A file is binary when its extension is in `binary_extensions`, when a
/// NUL byte occurs in its first 1024 bytes, or when it cannot be read.
pub fn is_binary(path: &Path, binary_extensions: &HashSet<String>) -> bool {
    if !binary_extensions.is_empty() {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if binary_extensions.contains(&extension_lower(&name)) {
            return true;
        }
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return true,
    };

    let mut buffer = [0u8; BINARY_SNIFF_LEN];
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return true,
        }
    }

    buffer[..filled].contains(&0)
}

/// Decode bytes as UTF-8, dropping invalid sequences and normalising line
/// endings to `\n`.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix is well-formed
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    None => break,
                }
            }
        }
    }

    if text.contains('\r') {
        text = text.replace("\r\n", "\n").replace('\r', "\n");
    }
    text
}
