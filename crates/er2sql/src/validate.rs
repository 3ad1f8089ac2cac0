//! Validation pipeline for generated DDL.
//!
//! [`Validator`] runs four independent checkers over one script and merges
//! their results into a [`ValidationReport`]:
//!
//! - [`LintChecker`] - positional style and syntax diagnostics.
//! - [`ExecutionChecker`] - runs the script on an in-memory database.
//! - [`StructuralChecker`] - primary key, duplicate and empty-table rules.
//! - [`SemanticChecker`] - findings from a language model, when one is set.

mod execution;
mod lint;
mod report;
mod semantic;
mod structural;

pub use execution::ExecutionChecker;
pub use lint::LintChecker;
pub use report::{LintIssue, ValidationReport};
pub use semantic::{SemanticChecker, SemanticFindings, interpret_completion, render_prompt};
pub use structural::StructuralChecker;

use log::{debug, info, warn};

use crate::{Er2SqlError, config::AppConfig, model::SharedModel};

/// Runs every checker over a DDL script.
#[derive(Clone)]
pub struct Validator {
    lint: LintChecker,
    execution: ExecutionChecker,
    structural: StructuralChecker,
    semantic: Option<SemanticChecker>,
    max_length: u32,
}

impl Validator {
    /// Creates a validator without a language model.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            lint: LintChecker::new(config.lint().clone()),
            execution: ExecutionChecker::new(),
            structural: StructuralChecker::new(),
            semantic: None,
            max_length: config.semantic().max_length(),
        }
    }

    /// Enables the semantic checker with the shared `model`.
    pub fn with_model(mut self, model: SharedModel) -> Self {
        self.semantic = Some(SemanticChecker::new(model, self.max_length));
        self
    }

    /// Validates `sql`.
    ///
    /// Without a model the semantic check is skipped: `llm_report` stays
    /// empty and `semantic_checked` is `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Er2SqlError::Model`] when the language model cannot be
    /// reached. Every other problem is reported inside the
    /// [`ValidationReport`].
    pub fn validate(&self, sql: &str) -> Result<ValidationReport, Er2SqlError> {
        info!(script_len = sql.len(); "Validating script");

        let lint_issues = self.lint.check(sql);
        let sqlite_error = self.execution.check(sql);
        let ast_messages = self.structural.check(sql);
        let (llm_report, semantic_checked) = match &self.semantic {
            Some(checker) => (checker.check(sql)?, true),
            None => {
                warn!("No language model configured, skipping semantic check");
                (Vec::new(), false)
            }
        };

        let report = ValidationReport {
            lint_issues,
            sqlite_error,
            ast_messages,
            llm_report,
            semantic_checked,
        };
        debug!(
            lint_issues = report.lint_issues.len(),
            executed = report.sqlite_error.is_none(),
            ast_messages = report.ast_messages.len(),
            llm_findings = report.llm_report.len();
            "Validation finished"
        );

        Ok(report)
    }
}
