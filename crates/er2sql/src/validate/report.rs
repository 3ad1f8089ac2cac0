//! The unified validation report.

use serde::{Deserialize, Serialize};

/// A positional diagnostic produced by the lint checker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LintIssue {
    /// Rule code, e.g. `LT01`.
    pub code: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column within the line.
    #[serde(rename = "pos", alias = "position")]
    pub position: usize,
    pub description: String,
}

impl LintIssue {
    pub fn new(code: &str, line: usize, position: usize, description: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            line,
            position,
            description: description.into(),
        }
    }
}

/// Results of all four checkers over one DDL script.
///
/// Each field is populated independently of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Lint diagnostics, deduplicated by all four fields.
    pub lint_issues: Vec<LintIssue>,
    /// Execution error; `None` when the script ran successfully.
    pub sqlite_error: Option<String>,
    /// Structural findings, first declared table first.
    pub ast_messages: Vec<String>,
    /// Semantic findings, or the raw model output when it was not a JSON array
    /// of strings.
    ///
    /// Also empty when no language model is configured; see
    /// [`ValidationReport::semantic_checked`].
    pub llm_report: Vec<String>,
    /// `false` when the semantic check was skipped for lack of a model.
    #[serde(default = "default_semantic_checked")]
    pub semantic_checked: bool,
}

fn default_semantic_checked() -> bool {
    true
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            lint_issues: Vec::new(),
            sqlite_error: None,
            ast_messages: Vec::new(),
            llm_report: Vec::new(),
            semantic_checked: true,
        }
    }
}

impl ValidationReport {
    /// `true` when no checker reported anything.
    pub fn is_clean(&self) -> bool {
        self.lint_issues.is_empty()
            && self.sqlite_error.is_none()
            && self.ast_messages.is_empty()
            && self.llm_report.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = ValidationReport {
            lint_issues: vec![LintIssue::new("LT01", 2, 14, "Unnecessary trailing whitespace.")],
            sqlite_error: None,
            ast_messages: vec![],
            llm_report: vec!["a".to_string()],
            semantic_checked: true,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lint_issues": [
                    {"code": "LT01", "line": 2, "pos": 14, "description": "Unnecessary trailing whitespace."}
                ],
                "sqlite_error": null,
                "ast_messages": [],
                "llm_report": ["a"],
                "semantic_checked": true,
            })
        );
        assert!(!report.is_clean());
        assert!(ValidationReport::default().is_clean());
    }

    #[test]
    fn test_lint_issue_accepts_position_alias() {
        let issue: LintIssue = serde_json::from_str(
            r#"{"code":"LT05","line":1,"position":81,"description":"Line is too long."}"#,
        )
        .unwrap();

        assert_eq!(issue.position, 81);
    }

    #[test]
    fn test_report_without_skip_flag_counts_as_checked() {
        let report: ValidationReport = serde_json::from_str(
            r#"{"lint_issues":[],"sqlite_error":null,"ast_messages":[],"llm_report":[]}"#,
        )
        .unwrap();

        assert!(report.semantic_checked);
        assert!(report.is_clean());
    }
}
