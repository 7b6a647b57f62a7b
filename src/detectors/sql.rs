use crate::detectors::{DetectError, DetectionInput, Detector};
use crate::schema::{DetectorId, Preview, SqlPreview};
use sqlformat::{FormatOptions, QueryParams};

const KEYWORDS: [&str; 10] = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "FROM", "WHERE", "JOIN",
];

/// At least one of these must also appear, so a stray `FROM` in prose is not enough.
const SHAPE_KEYWORDS: [&str; 4] = ["SELECT", "TABLE", "INTO", "VALUES"];

fn looks_like_sql(val: &str) -> bool {
    let upper = val.to_uppercase();
    KEYWORDS.iter().any(|k| upper.contains(k)) && SHAPE_KEYWORDS.iter().any(|k| upper.contains(k))
}

pub fn format_sql(val: &str) -> String {
    sqlformat::format(val, &QueryParams::None, FormatOptions::default())
}

pub struct SqlDetector {
    max_bytes: usize,
}

impl SqlDetector {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for SqlDetector {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_PARSE_BYTES)
    }
}

impl Detector for SqlDetector {
    fn id(&self) -> DetectorId {
        DetectorId::Sql
    }

    fn detect(&self, input: &DetectionInput) -> Result<Option<Preview>, DetectError> {
        let val = input.as_str();
        if !looks_like_sql(val) {
            return Ok(None);
        }
        input.ensure_within(self.max_bytes)?;

        let formatted = format_sql(val);
        // Only report when the formatter actually reshaped the text.
        if formatted == val {
            return Ok(None);
        }
        Ok(Some(Preview::Sql(SqlPreview { formatted })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(s: &str) -> Option<String> {
        match SqlDetector::default().detect(&DetectionInput::new(s)) {
            Ok(Some(Preview::Sql(sql))) => Some(sql.formatted),
            _ => None,
        }
    }

    #[test]
    fn formats_select_statements() {
        let formatted = detect("select id, name from users where id = 1").unwrap();
        assert!(formatted.contains("FROM") || formatted.contains("from"));
        assert!(formatted.contains('\n'));
        assert_ne!(formatted, "select id, name from users where id = 1");
    }

    #[test]
    fn formats_insert_statements() {
        assert!(detect("INSERT INTO t (a, b) VALUES (1, 2)").is_some());
    }

    #[test]
    fn keyword_without_shape_is_ignored() {
        assert_eq!(detect("where are you from"), None);
        assert_eq!(detect("DROP it"), None);
    }

    #[test]
    fn shape_without_keyword_is_ignored() {
        assert_eq!(detect("a table for two"), None);
    }

    #[test]
    fn keyword_check_is_case_insensitive() {
        assert!(looks_like_sql("Select * From t"));
        assert!(!looks_like_sql("hello world"));
    }

    #[test]
    fn unchanged_output_is_not_a_match() {
        let already = format_sql("SELECT * FROM t");
        assert_eq!(format_sql(&already), already);
        assert_eq!(detect(&already), None);
    }
}
