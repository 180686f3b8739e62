// crates/dinedb-core/src/loader/decode.rs
//! Tabular decoder: delimited text to header-keyed rows.
//!
//! Decoding never fails. Unbalanced quotes simply keep the quote state open
//! until the end of the line.

use crate::text::strip_bom;
use std::collections::HashMap;

/// One data line keyed by header name.
///
/// Missing trailing fields are stored as empty strings, extra fields past the
/// header count are dropped. When a header repeats, the right-most column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Value of the given column, if the header exists.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Decode CSV text into rows.
///
/// The first non-blank line is the header line. Blank and whitespace-only
/// lines are skipped everywhere. A leading BOM is removed from the input and
/// again from every header token.
pub fn decode_table(content: &str) -> Vec<RawRow> {
    let content = strip_bom(content);
    let mut lines = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = split_line(header_line)
        .into_iter()
        .map(|h| strip_bom(&h).trim().to_string())
        .collect();

    lines
        .map(|line| {
            let mut values = split_line(line).into_iter();
            headers
                .iter()
                .map(|h| (h.clone(), values.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Split one line into trimmed fields with RFC 4180-style quoting.
///
/// `""` inside a quoted section is a literal quote; any other quote toggles
/// the quoted state; commas inside quotes are data.
pub fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);

    values.into_iter().map(|v| v.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_comma_and_escaped_quote() {
        let fields = split_line(r#"x,"a, ""b"" c",y"#);
        assert_eq!(fields, vec!["x", r#"a, "b" c"#, "y"]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(split_line("  a ,\" b \" , c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quote_toggles_mid_field() {
        assert_eq!(split_line("a\"b,c\"d,e"), vec!["ab,cd", "e"]);
        assert_eq!(split_line(r#"x"y"z,w"#), vec!["xyz", "w"]);
    }

    #[test]
    fn unmatched_quote_runs_to_end_of_line() {
        assert_eq!(split_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn empty_input_and_blank_lines() {
        assert!(decode_table("").is_empty());
        assert!(decode_table("\r\n   \n\t\n").is_empty());
        assert!(decode_table("\u{FEFF}").is_empty());
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(decode_table("name,address\n").is_empty());
    }

    #[test]
    fn crlf_and_blank_lines_skipped() {
        let rows = decode_table("name,tel\r\n\r\nA,1\r\n   \r\nB,2\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[1].get("tel"), Some("2"));
    }

    #[test]
    fn short_rows_pad_and_long_rows_truncate() {
        let rows = decode_table("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(rows[0].get("b"), Some(""));
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get("c"), Some("3"));
    }

    #[test]
    fn bom_in_header_is_stripped() {
        let rows = decode_table("\u{FEFF}餐廳名稱,地址\n綠食堂,臺北市\n");
        assert_eq!(rows[0].get("餐廳名稱"), Some("綠食堂"));

        // A BOM that survives the whole-input strip (e.g. after a quote).
        let rows = decode_table("\"\u{FEFF}name\",addr\nA,B\n");
        assert_eq!(rows[0].get("name"), Some("A"));
    }

    #[test]
    fn header_whitespace_after_bom_is_trimmed() {
        let rows = decode_table("\"\u{FEFF} name \",b\nA,B\n");
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[0].get(" name"), None);

        let rows = decode_table("\u{FEFF}\u{FEFF} name,b\nA,B\n");
        assert_eq!(rows[0].get("name"), Some("A"));
    }

    #[test]
    fn redecoding_rejoined_rows_is_stable() {
        let text = "name,address,note\nA,Taipei,plain\nB,Kaohsiung,x\n";
        let first = decode_table(text);

        let headers = ["name", "address", "note"];
        let mut rejoined = headers.join(",");
        for row in &first {
            rejoined.push('\n');
            let line: Vec<&str> = headers.iter().map(|h| row.get(h).unwrap_or("")).collect();
            rejoined.push_str(&line.join(","));
        }
        assert_eq!(decode_table(&rejoined), first);
    }
}
