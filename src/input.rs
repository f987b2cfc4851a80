//! Address list input
//!
//! Address files hold one address per line. Blank lines and lines starting
//! with `#` are skipped; surrounding whitespace is trimmed.

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Parse an address list
pub fn parse_addresses(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read an address list from a file, or from stdin when `path` is `-`
pub fn read_addresses(path: &Path) -> Result<Vec<String>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(parse_addresses(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_addresses() {
        let text = "https://a.example\n\n  # comment\n  https://b.example  \r\n";
        assert_eq!(
            parse_addresses(text),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_read_addresses_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://a.example").unwrap();
        writeln!(file, "https://b.example").unwrap();
        let addresses = read_addresses(file.path()).unwrap();
        assert_eq!(addresses.len(), 2);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_addresses(Path::new("/nonexistent/addresses.txt")).is_err());
    }
}
