use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::conversation::Message;

/// Reads each path into a `system` message, preserving order.
///
/// Fails on the first path that cannot be read; the error names the path.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn load_context<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Message>> {
    paths
        .iter()
        .map(|path| read_context_file(path.as_ref()).map(Message::system))
        .collect()
}

fn read_context_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;

    debug!(path = %path.display(), bytes = bytes.len(), "loaded context file");

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_no_files() {
        let paths: Vec<&Path> = vec![];
        assert!(load_context(paths.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn test_load_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.txt");
        fs::write(&path, "Hello").unwrap();

        let messages = load_context(&[&path]).unwrap();

        assert_eq!(messages, vec![Message::system("Hello")]);
    }

    #[test]
    fn test_load_preserves_order_and_content() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.md");
        let second = temp_dir.path().join("second.rs");
        fs::write(&first, "# Notes\n\nline two\n").unwrap();
        fs::write(&second, "fn main() {}\n").unwrap();

        let messages = load_context(&[&second, &first]).unwrap();

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.role() == Role::System));
        assert_eq!(messages[0].content(), "fn main() {}\n");
        assert_eq!(messages[1].content(), "# Notes\n\nline two\n");
    }

    #[test]
    fn test_load_same_file_twice() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "twice").unwrap();

        let messages = load_context(&[temp_file.path(), temp_file.path()]).unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_load_unicode_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let content = "こんにちは世界！🌍\n日本語テスト";
        write!(temp_file, "{content}").unwrap();

        let messages = load_context(&[temp_file.path()]).unwrap();
        assert_eq!(messages[0].content(), content);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        let messages = load_context(&[temp_file.path()]).unwrap();
        assert_eq!(messages[0].content(), "");
    }

    #[test]
    fn test_load_binary_file_is_not_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0x68, 0x69, 0xff, 0xfe, 0x00]).unwrap();

        let messages = load_context(&[temp_file.path()]).unwrap();
        assert!(messages[0].content().starts_with("hi"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.txt");
        let missing = temp_dir.path().join("missing.txt");
        fs::write(&good, "ok").unwrap();

        let err = load_context(&[&good, &missing]).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_load_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_context(&[temp_dir.path()]).is_err());
    }
}
