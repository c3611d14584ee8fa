use sha2::{Digest, Sha256};

/// Deterministic, filesystem-safe name: `{sanitized_stem}--{short_hash(url)}.{extension}`.
///
/// The same URL and options always map to the same name, so repeated
/// downloads overwrite rather than accumulate.
pub fn deterministic_filename(stem: &str, url: &str, extension: &str) -> String {
    let sanitized = sanitize_stem(stem);
    let hash = short_hash(url);
    format!("{sanitized}--{hash}.{extension}")
}

fn sanitize_stem(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            compacted.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            // Runs of separators and forbidden characters collapse to one dash.
            compacted.push('-');
            prev_dash = true;
        }
    }
    let mut cleaned = compacted.trim_matches('-').to_string();
    if cleaned.is_empty() {
        cleaned = "download".to_string();
    }
    if cleaned.len() > 60 {
        cleaned.truncate(60);
    }
    cleaned
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
