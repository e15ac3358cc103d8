use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;

/// Header of the column holding target language codes.
pub const LANGUAGE_COLUMN: &str = "language_code";

/// Reads target language codes from a CSV file, in row order.
pub fn read_language_codes(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open languages file: {}", path.display()))?;
    parse_language_codes(file)
        .with_context(|| format!("Failed to parse languages file: {}", path.display()))
}

/// Parses CSV with a `language_code` header column.
///
/// Other columns are ignored and blank cells skipped.
pub fn parse_language_codes<R: Read>(input: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().context("Failed to read CSV header")?;
    let Some(column) = headers.iter().position(|h| h == LANGUAGE_COLUMN) else {
        bail!(
            "CSV must contain a '{LANGUAGE_COLUMN}' header column (found: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    };

    let mut codes = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV row")?;
        if let Some(code) = record.get(column).filter(|c| !c.is_empty()) {
            codes.push(code.to_string());
        }
    }

    Ok(codes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_single_column() {
        let codes = parse_language_codes("language_code\nes\nfr\nxx\n".as_bytes()).unwrap();
        assert_eq!(codes, vec!["es", "fr", "xx"]);
    }

    #[test]
    fn test_parse_picks_named_column() {
        let csv = "name,language_code,notes\nSpanish,es,\nFrench, fr ,main\n";
        let codes = parse_language_codes(csv.as_bytes()).unwrap();
        assert_eq!(codes, vec!["es", "fr"]);
    }

    #[test]
    fn test_parse_skips_blank_cells() {
        let csv = "language_code,name\nes,Spanish\n,Nothing\nde,German\n";
        let codes = parse_language_codes(csv.as_bytes()).unwrap();
        assert_eq!(codes, vec!["es", "de"]);
    }

    #[test]
    fn test_parse_missing_header() {
        let err = parse_language_codes("code\nes\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("language_code"));
    }

    #[test]
    fn test_parse_header_only() {
        let codes = parse_language_codes("language_code\n".as_bytes()).unwrap();
        assert!(codes.is_empty());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let err = read_language_codes(Path::new("/nonexistent/languages.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("languages.csv");
        std::fs::write(&path, "language_code\nja\nzh-TW\n").unwrap();

        assert_eq!(read_language_codes(&path).unwrap(), vec!["ja", "zh-TW"]);
    }
}
