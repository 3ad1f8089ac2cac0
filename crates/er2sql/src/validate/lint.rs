//! Static lint checker.
//!
//! Tokenises the script with the SQLite dialect and reports positional
//! diagnostics without executing anything. Rule codes follow the usual SQL
//! linter naming:
//!
//! | code   | rule |
//! |--------|------|
//! | `PRS`  | the script cannot be tokenised or parsed |
//! | `CP01` | keyword capitalisation differs from the first keyword |
//! | `LT01` | trailing whitespace |
//! | `LT05` | line longer than the configured maximum |
//! | `LT12` | script does not end with exactly one newline |

use std::collections::HashSet;

use log::debug;
use sqlparser::{
    dialect::SQLiteDialect,
    keywords::Keyword,
    parser::Parser,
    tokenizer::{Token, TokenWithSpan, Tokenizer},
};

use crate::{config::LintConfig, validate::LintIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
    Capitalised,
}

impl Case {
    fn of(word: &str) -> Self {
        if word == word.to_uppercase() {
            Case::Upper
        } else if word == word.to_lowercase() {
            Case::Lower
        } else {
            Case::Capitalised
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Case::Upper => "upper",
            Case::Lower => "lower",
            Case::Capitalised => "capitalised",
        }
    }
}

/// Runs the lint rules over a DDL script.
#[derive(Debug, Clone, Default)]
pub struct LintChecker {
    config: LintConfig,
}

impl LintChecker {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Lints `sql`, returning issues ordered by position with duplicates
    /// (same code, line, position and description) removed.
    pub fn check(&self, sql: &str) -> Vec<LintIssue> {
        let mut issues = Vec::new();
        check_syntax(sql, &mut issues);
        self.check_lines(sql, &mut issues);
        check_trailing_newline(sql, &mut issues);

        issues.retain(|issue| !self.config.is_excluded(&issue.code));
        issues.sort_by_key(|issue| (issue.line, issue.position));

        let issues = dedup(issues);
        debug!(issue_count = issues.len(); "Lint finished");
        issues
    }

    fn check_lines(&self, sql: &str, issues: &mut Vec<LintIssue>) {
        let max = self.config.max_line_length();

        for (idx, line) in sql.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim_end_matches('\r');
            let trimmed = line.trim_end();

            if trimmed.len() < line.len() {
                issues.push(LintIssue::new(
                    "LT01",
                    line_no,
                    trimmed.chars().count() + 1,
                    "Unnecessary trailing whitespace.",
                ));
            }

            let length = line.chars().count();
            if length > max {
                issues.push(LintIssue::new(
                    "LT05",
                    line_no,
                    max + 1,
                    format!("Line is too long ({length} > {max})."),
                ));
            }
        }
    }
}

/// Removes repeated issues, keeping the first occurrence.
pub(crate) fn dedup(issues: Vec<LintIssue>) -> Vec<LintIssue> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert(issue.clone()))
        .collect()
}

fn check_syntax(sql: &str, issues: &mut Vec<LintIssue>) {
    let dialect = SQLiteDialect {};

    let tokens = match Tokenizer::new(&dialect, sql).tokenize_with_location() {
        Ok(tokens) => tokens,
        Err(err) => {
            issues.push(LintIssue::new(
                "PRS",
                err.location.line.max(1) as usize,
                err.location.column.max(1) as usize,
                format!("Unable to tokenise script: {}", err.message),
            ));
            return;
        }
    };
    check_capitalisation(&tokens, issues);

    if let Err(err) = Parser::parse_sql(&dialect, sql) {
        let message = err.to_string();
        let (line, column) = position_from_message(&message).unwrap_or((1, 1));
        issues.push(LintIssue::new(
            "PRS",
            line,
            column,
            format!("Unable to parse script: {message}"),
        ));
    }
}

/// Statement keywords checked by `CP01`; type names and identifiers that
/// happen to be keywords are left alone.
fn is_statement_keyword(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::CREATE
            | Keyword::TABLE
            | Keyword::ALTER
            | Keyword::ADD
            | Keyword::FOREIGN
            | Keyword::KEY
            | Keyword::PRIMARY
            | Keyword::REFERENCES
            | Keyword::CONSTRAINT
            | Keyword::UNIQUE
            | Keyword::NOT
            | Keyword::NULL
            | Keyword::DEFAULT
            | Keyword::DROP
            | Keyword::INDEX
            | Keyword::ON
            | Keyword::IF
            | Keyword::EXISTS
    )
}

/// Keywords that may open an element of a column list or follow `TABLE`.
fn starts_clause(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::PRIMARY
            | Keyword::FOREIGN
            | Keyword::UNIQUE
            | Keyword::CONSTRAINT
            | Keyword::CHECK
            | Keyword::IF
    )
}

/// `true` when a word after `previous` names a table or column.
fn is_name_position(previous: Option<&Token>) -> bool {
    match previous {
        Some(Token::LParen | Token::Comma | Token::Period) => true,
        Some(Token::Word(word)) => {
            word.quote_style.is_none()
                && matches!(word.keyword, Keyword::TABLE | Keyword::REFERENCES)
        }
        _ => false,
    }
}

fn check_capitalisation(tokens: &[TokenWithSpan], issues: &mut Vec<LintIssue>) {
    let mut policy = None;
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if matches!(token.token, Token::Whitespace(_)) {
            continue;
        }
        let in_name_position = is_name_position(previous);
        previous = Some(&token.token);

        let Token::Word(word) = &token.token else {
            continue;
        };
        if word.quote_style.is_some() || !is_statement_keyword(word.keyword) {
            continue;
        }
        if in_name_position && !starts_clause(word.keyword) {
            continue;
        }

        let case = Case::of(&word.value);
        let expected = *policy.get_or_insert(case);
        if case != expected {
            issues.push(LintIssue::new(
                "CP01",
                token.span.start.line as usize,
                token.span.start.column as usize,
                format!("Keywords must be consistently {} case.", expected.as_str()),
            ));
        }
    }
}

fn check_trailing_newline(sql: &str, issues: &mut Vec<LintIssue>) {
    if sql.trim().is_empty() {
        return;
    }

    let content = sql.trim_end_matches(['\n', '\r']);
    let newlines = sql[content.len()..].matches('\n').count();
    if newlines == 1 {
        return;
    }

    let line = content.lines().count().max(1);
    let position = content.lines().last().map_or(0, |last| last.chars().count()) + 1;
    issues.push(LintIssue::new(
        "LT12",
        line,
        position,
        "Files must end with a single trailing newline.",
    ));
}

/// Extracts `(line, column)` from a parser message ending in
/// `"at Line: X, Column: Y"`.
fn position_from_message(message: &str) -> Option<(usize, usize)> {
    let number_after = |marker: &str| {
        let start = message.rfind(marker)? + marker.len();
        let digits: String = message[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse::<usize>().ok()
    };

    Some((number_after("Line: ")?, number_after("Column: ")?))
}
