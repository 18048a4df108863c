use std::collections::HashMap;
use std::path::Path;

/// Additive code to human-readable name, loaded once at startup.
///
/// Built from a comma-delimited reference file with columns
/// `id, code, title, ...`. Rows that don't fit are skipped rather than
/// failing the load.
#[derive(Debug, Clone, Default)]
pub struct AdditiveTable {
    entries: HashMap<String, String>,
}

impl AdditiveTable {
    /// Builds the table from reference lines. Later rows overwrite earlier
    /// rows with the same code.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = HashMap::new();

        for line in lines {
            if let Some((code, title)) = parse_line(line.as_ref()) {
                entries.insert(code, title);
            }
        }

        Self { entries }
    }

    /// Loads the table from a file on disk.
    ///
    /// A missing or unreadable file yields an empty table so the service can
    /// still start; additives then resolve to their bare codes.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let table = Self::from_lines(text.lines());
                log::info!(
                    "Loaded {} additives from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::error!("Error loading additives from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves an upstream additive tag such as `en:e322` into a display
    /// string: `E322 - Lecithins` when the code is known, `E322` otherwise.
    pub fn describe(&self, tag: &str) -> String {
        let code = tag.strip_prefix("en:").unwrap_or(tag);
        let code_upper = code.to_uppercase();

        // Keys are stored upper-cased, so the second lookup only matters for
        // tables built some other way.
        let title = self
            .get(&code_upper)
            .filter(|t| !t.is_empty())
            .or_else(|| self.get(code).filter(|t| !t.is_empty()));

        match title {
            Some(title) => format!("{code_upper} - {title}"),
            None => code_upper,
        }
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    if line.trim().is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let code = parts[1].trim().to_uppercase();
    let title = parts[2].trim();

    if !code.starts_with('E') || title.is_empty() || title == "title" {
        return None;
    }

    let title = title.trim_matches('"').trim_matches('\'');
    Some((code, title.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parses_plain_and_quoted_rows() {
        let table = AdditiveTable::from_lines(["1,E322,Lecithins", "2,e101a,'Riboflavin'"]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("E322"), Some("Lecithins"));
        assert_eq!(table.get("E101A"), Some("Riboflavin"));
        assert_eq!(table.get("e101a"), None);
    }

    #[test]
    fn test_skips_short_rows() {
        let table = AdditiveTable::from_lines(["1,E100", "E200", "", "   "]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_skips_codes_not_starting_with_e() {
        let table = AdditiveTable::from_lines(["1,X100,Something", "2, 100,Numeric", "3,,Blank"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_skips_header_and_empty_titles() {
        let table = AdditiveTable::from_lines([
            "id,e_code,title,info",
            "1,E100,title",
            "2,E101,   ",
            "3,E102,Tartrazine",
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("E102"), Some("Tartrazine"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let table = AdditiveTable::from_lines(["1,E330,Citric acid", "2,e330,Citric Acid (updated)"]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("E330"), Some("Citric Acid (updated)"));
    }

    #[test]
    fn test_strips_double_then_single_quotes() {
        let table = AdditiveTable::from_lines([
            r#"1,E150a,"Plain caramel""#,
            r#"2,E160,"'Carotenes'""#,
        ]);

        assert_eq!(table.get("E150A"), Some("Plain caramel"));
        assert_eq!(table.get("E160"), Some("Carotenes"));
    }

    #[test]
    fn test_embedded_comma_misaligns_title() {
        // No quoting awareness: only the text before the embedded comma is kept.
        let table = AdditiveTable::from_lines([r#"1,E471,"Mono- and diglycerides, of fatty acids""#]);
        assert_eq!(table.get("E471"), Some("Mono- and diglycerides"));
    }

    #[test]
    fn test_describe_known_and_unknown() {
        let table = AdditiveTable::from_lines(["1,E322,Lecithins"]);

        assert_eq!(table.describe("en:e322"), "E322 - Lecithins");
        assert_eq!(table.describe("en:e999"), "E999");
        assert_eq!(table.describe("e322"), "E322 - Lecithins");
    }

    #[test]
    fn test_describe_does_not_fall_back_to_base_code() {
        let table = AdditiveTable::from_lines(["1,E322,Lecithins"]);
        assert_eq!(table.describe("en:e322i"), "E322I");
    }

    #[test]
    fn test_describe_treats_empty_description_as_unknown() {
        let table = AdditiveTable::from_lines([r#"1,E123,"""#]);

        assert_eq!(table.get("E123"), Some(""));
        assert_eq!(table.describe("en:e123"), "E123");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,e_code,title").unwrap();
        writeln!(file, "1,E322,Lecithins").unwrap();
        writeln!(file, "malformed line").unwrap();
        writeln!(file, "2,e101a,\"Riboflavin\"").unwrap();

        let table = AdditiveTable::load(file.path());

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("E101A"), Some("Riboflavin"));
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1,E950,Acesulfame \xff K\n2,E951,Aspartame\n").unwrap();

        let table = AdditiveTable::load(file.path());

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("E951"), Some("Aspartame"));
    }

    #[test]
    fn test_load_missing_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = AdditiveTable::load(dir.path().join("missing.csv"));

        assert!(table.is_empty());
        assert_eq!(table.describe("en:e322"), "E322");
    }
}
