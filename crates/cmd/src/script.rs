// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Splitting a SQL script into executable statements
//!
//! The split is purely textual: every `;` ends a statement, including one
//! inside a string literal or a `--` comment.

/// Split script text on `;` and keep the fragments worth executing
///
/// Fragments are trimmed. Empty fragments and fragments made only of blank
/// lines and `--` comment lines are dropped. File order is preserved.
pub fn split_statements(content: &str) -> Vec<String> {
    content
        .split(';')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty() && !is_comment_only(fragment))
        .map(str::to_string)
        .collect()
}

/// True when every line is blank or a `--` comment
pub fn is_comment_only(fragment: &str) -> bool {
    fragment.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with("--")
    })
}

/// First `max_chars` characters of a statement, with `...` when cut
pub fn preview(statement: &str, max_chars: usize) -> String {
    match statement.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &statement[..cut]),
        None => statement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_and_empty_fragments_dropped() {
        let statements = split_statements("SELECT 1; -- comment only\n; SELECT 2;");
        assert_eq!(statements, vec!["SELECT 1".to_string(), "SELECT 2".to_string()]);
    }

    #[test]
    fn test_leading_comment_kept_with_statement() {
        let script = "-- totals per customer\nSELECT customer, SUM(amount)\nFROM orders\nGROUP BY customer;\n\n";
        let statements = split_statements(script);
        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("-- totals per customer"));
        assert!(statements[0].ends_with("GROUP BY customer"));
    }

    #[test]
    fn test_indented_comment_lines() {
        let script = "  -- first\n    -- second\n\n;\nSELECT 3";
        assert_eq!(split_statements(script), vec!["SELECT 3".to_string()]);
    }

    #[test]
    fn test_nothing_executable() {
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ; ;\n-- only a comment\n;").is_empty());
    }

    #[test]
    fn test_preview_short_statement_unchanged() {
        let statement = "SELECT * FROM orders";
        assert_eq!(preview(statement, 120), statement);

        let exact = "x".repeat(120);
        assert_eq!(preview(&exact, 120), exact);
    }

    #[test]
    fn test_preview_long_statement_truncated() {
        let statement = format!("SELECT {} FROM orders", "amount, ".repeat(30));
        let shown = preview(&statement, 120);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 123);
        assert!(statement.starts_with(shown.trim_end_matches("...")));
    }

    #[test]
    fn test_preview_counts_characters() {
        let statement = "é".repeat(130);
        let shown = preview(&statement, 120);
        assert_eq!(shown, format!("{}...", "é".repeat(120)));
    }
}
