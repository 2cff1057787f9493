//! CSV import parsing.
//!
//! Columns: `source_url` (required), `target_url`, `action_type`,
//! `action_code`, `match_type`, `title`. Hand-written RFC-4180-style line
//! parser; quoted fields may contain commas and doubled quotes.

use shared::{ActionType, MatchType};

use super::{ImportRecord, ParseError, ParseResult};

fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    fields.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            }
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn field<'a>(fields: &'a [String], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| fields.get(i))
        .map(String::as_str)
        .filter(|s| !s.is_empty())
}

pub fn parse_csv(source: &str) -> ParseResult {
    let mut result = ParseResult::default();

    let lines: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return result;
    }

    let header: Vec<String> = parse_csv_line(lines[0])
        .into_iter()
        .map(|h| h.to_lowercase())
        .collect();
    let col = |name: &str| header.iter().position(|h| h == name);

    let Some(src_idx) = col("source_url") else {
        result.errors.push(ParseError {
            row: 0,
            message: "Missing source_url column in header".to_string(),
        });
        return result;
    };
    let tgt_idx = col("target_url");
    let action_type_idx = col("action_type");
    let action_code_idx = col("action_code");
    let match_type_idx = col("match_type");
    let title_idx = col("title");

    for (row, line) in lines.iter().enumerate().skip(1) {
        let fields = parse_csv_line(line);

        let Some(source_url) = field(&fields, Some(src_idx)) else {
            result.errors.push(ParseError {
                row,
                message: "Empty source_url".to_string(),
            });
            continue;
        };

        let match_type = match field(&fields, match_type_idx) {
            None => MatchType::Url,
            Some(s) => match MatchType::parse(s) {
                Some(v) => v,
                None => {
                    result.errors.push(ParseError {
                        row,
                        message: format!("Invalid match_type: {s}"),
                    });
                    continue;
                }
            },
        };

        let action_type = match field(&fields, action_type_idx) {
            None => ActionType::Redirect,
            Some(s) => match ActionType::parse(s) {
                Some(v) => v,
                None => {
                    result.errors.push(ParseError {
                        row,
                        message: format!("Invalid action_type: {s}"),
                    });
                    continue;
                }
            },
        };

        let mut record = ImportRecord::with_source(source_url.to_string());
        record.match_type = match_type;
        record.action_type = action_type;
        record.action_code = field(&fields, action_code_idx)
            .and_then(|s| s.parse::<u16>().ok())
            .filter(|&code| code != 0)
            .unwrap_or(301);
        record.target_url = field(&fields, tgt_idx).map(str::to_string);
        record.title = field(&fields, title_idx).map(str::to_string);

        result.records.push(record);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rows() {
        let csv = "source_url,target_url,action_type,action_code\n\
                   /old,/new,redirect,301\n\
                   /gone,,error,410\n";
        let result = parse_csv(csv);
        assert!(result.errors.is_empty());
        assert_eq!(result.records.len(), 2);

        assert_eq!(result.records[0].source_url, "/old");
        assert_eq!(result.records[0].target_url.as_deref(), Some("/new"));
        assert_eq!(result.records[0].action_code, 301);

        assert_eq!(result.records[1].action_type, ActionType::Error);
        assert_eq!(result.records[1].action_code, 410);
        assert_eq!(result.records[1].target_url, None);
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "source_url,title\n\
                   /a,\"hello, \"\"world\"\"\"\n";
        let result = parse_csv(csv);
        assert_eq!(result.records[0].title.as_deref(), Some("hello, \"world\""));
    }

    #[test]
    fn test_header_column_order_is_free() {
        let csv = "title,action_code,source_url\nfirst,302,/a\n";
        let result = parse_csv(csv);
        assert_eq!(result.records[0].source_url, "/a");
        assert_eq!(result.records[0].action_code, 302);
        assert_eq!(result.records[0].title.as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_source_url_column() {
        let result = parse_csv("target_url\n/new\n");
        assert!(result.records.is_empty());
        assert_eq!(result.errors[0].row, 0);
        assert!(result.errors[0].message.contains("source_url"));
    }

    #[test]
    fn test_empty_source_url_is_a_row_error() {
        let csv = "source_url,target_url\n,/new\n/ok,/fine\n";
        let result = parse_csv(csv);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 1);
    }

    #[test]
    fn test_invalid_action_code_defaults() {
        let csv = "source_url,action_code\n/a,abc\n/b,0\n";
        let result = parse_csv(csv);
        assert_eq!(result.records[0].action_code, 301);
        assert_eq!(result.records[1].action_code, 301);
    }

    #[test]
    fn test_invalid_match_type_is_a_row_error() {
        let csv = "source_url,match_type\n/a,telepathy\n";
        let result = parse_csv(csv);
        assert!(result.records.is_empty());
        assert!(result.errors[0].message.contains("telepathy"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "source_url\n\n/a\n\n";
        let result = parse_csv(csv);
        assert_eq!(result.records.len(), 1);
    }
}
