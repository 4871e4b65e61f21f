use std::fmt::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Makes an uploaded filename safe to use as a single path component.
pub fn sanitize_filename(name: &str) -> String {
    // Browsers may send a full client path.
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut s = base.trim().trim_start_matches('.').to_string();
    let invalid = [':', '*', '?', '"', '<', '>', '|', '\0'];
    for ch in invalid {
        s = s.replace(ch, "-");
    }
    s = s.replace(' ', "_");
    if s.len() > 100 {
        let mut cut = 100;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    if s.is_empty() {
        s = "file".into();
    }
    s
}

/// Splits into a non-empty stem and a lowercase extension (possibly empty).
pub fn split_name(name: &str) -> (String, String) {
    let p = Path::new(name);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("file")
        .to_string();
    let ext = p
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    (stem, ext)
}

pub fn join_name(stem: &str, ext: &str) -> String {
    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, ext)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(&mut out, "{:02x}", byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_client_paths_and_hidden_prefixes() {
        assert_eq!(sanitize_filename(r"C:\Users\me\My Cover.PNG"), "My_Cover.PNG");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(".env"), "env");
        assert_eq!(sanitize_filename("   "), "file");
        assert_eq!(sanitize_filename("a:b?.pdf"), "a-b-.pdf");
    }

    #[test]
    fn splits_and_lowercases_extension() {
        assert_eq!(split_name("Cover.JPG"), ("Cover".into(), "jpg".into()));
        assert_eq!(split_name("noext"), ("noext".into(), String::new()));
        assert_eq!(join_name("a", ""), "a");
        assert_eq!(join_name("a", "pdf"), "a.pdf");
    }

    #[test]
    fn hashes_as_lowercase_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
