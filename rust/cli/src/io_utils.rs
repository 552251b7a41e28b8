//! File helpers shared by the commands that read and write game records.
//!
//! `.zst` inputs are decompressed transparently, and output directories are
//! created before anything is written.

/// Reads a whole record file into a string.
///
/// Paths ending in `.zst` are decompressed first. A leading UTF-8 BOM is
/// dropped so the first JSON line parses.
///
/// ```rust,no_run
/// # use rinkside_cli::io_utils::read_text_auto;
/// let games = read_text_auto("data/games.jsonl").unwrap();
/// let archived = read_text_auto("data/2025-season.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let packed = std::fs::read(path).map_err(|e| format!("{}: {}", path, e))?;
        let raw = zstd::stream::decode_all(packed.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(raw).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Creates the directory a file is about to be written into.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e)),
        _ => Ok(()),
    }
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped_once() {
        let mut s = "\u{feff}{}".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
        strip_utf8_bom(&mut s);
        assert_eq!(s, "{}");
    }

    #[test]
    fn parent_dirs_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("season").join("week1").join("games.jsonl");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("season").join("week1").is_dir());
        ensure_parent_dir(std::path::Path::new("games.jsonl")).unwrap();
    }

    #[test]
    fn zst_input_is_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.jsonl.zst");
        let body = "\u{feff}{\"game_id\":\"20260101-000001\"}\n";
        let packed = zstd::bulk::compress(body.as_bytes(), 3).unwrap();
        std::fs::write(&path, packed).unwrap();

        let text = read_text_auto(&path.to_string_lossy()).unwrap();
        assert_eq!(text, "{\"game_id\":\"20260101-000001\"}\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_text_auto("definitely/not/here.jsonl").is_err());
    }
}
