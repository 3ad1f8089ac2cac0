//! Language-model backed semantic checker.
//!
//! The model is asked for a JSON array of short issue strings. Anything else
//! it returns is kept verbatim as a single finding.

use log::{debug, warn};

use crate::model::{ModelError, SharedModel};

const PROMPT_HEAD: &str = "You are an expert SQL validator.
Given an SQL DDL script, return a JSON array of short English error messages.
Each message should describe exactly one issue.

Example 1:
Input SQL:
CREATE TABLE users (id INT, name TEXT PRIMARY KEY);
Output JSON:
[]

Example 2:
Input SQL:
CREATE TABLE customers (name TEXT);
ALTER TABLE customers ADD FOREIGN KEY (name) REFERENCES other(id);
Output JSON:
[
\"Missing PRIMARY KEY in table customers\",
\"Foreign key column 'name' does not reference an existing primary key\"
]

Now analyze this SQL and output ONLY the JSON array:
";

/// Builds the few-shot prompt for `sql`.
pub fn render_prompt(sql: &str) -> String {
    format!("{PROMPT_HEAD}{sql}\n\nOutput JSON:\n")
}

/// Interpretation of one model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticFindings {
    /// The completion was a JSON array of strings.
    Structured(Vec<String>),
    /// Anything else, trimmed.
    Raw(String),
}

impl SemanticFindings {
    pub fn into_messages(self) -> Vec<String> {
        match self {
            SemanticFindings::Structured(messages) => messages,
            SemanticFindings::Raw(text) => vec![text],
        }
    }
}

/// Decodes a completion.
///
/// Items of a structured answer are trimmed, blank items are dropped and
/// exact repeats are removed keeping the first occurrence.
pub fn interpret_completion(completion: &str) -> SemanticFindings {
    let text = completion.trim();

    match serde_json::from_str::<Vec<String>>(text) {
        Ok(items) => {
            let mut messages: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                let item = item.trim();
                if !item.is_empty() && !messages.iter().any(|seen| seen == item) {
                    messages.push(item.to_string());
                }
            }
            SemanticFindings::Structured(messages)
        }
        Err(err) => {
            debug!(error:% = err; "Model completion is not a JSON string array");
            SemanticFindings::Raw(text.to_string())
        }
    }
}

/// Asks a shared language model for semantic issues.
#[derive(Clone)]
pub struct SemanticChecker {
    model: SharedModel,
    max_length: u32,
}

impl SemanticChecker {
    pub fn new(model: SharedModel, max_length: u32) -> Self {
        Self { model, max_length }
    }

    /// Returns the model's findings for `sql`.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures of the model are returned; malformed
    /// completions become a raw finding.
    pub fn check(&self, sql: &str) -> Result<Vec<String>, ModelError> {
        let prompt = render_prompt(sql);
        let completion = self.model.generate(&prompt, self.max_length).inspect_err(|err| {
            warn!(error:% = err; "Semantic model call failed");
        })?;

        Ok(interpret_completion(&completion).into_messages())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn fixed(completion: &'static str) -> SharedModel {
        Arc::new(move |_: &str, _: u32| Ok::<_, ModelError>(completion.to_string()))
    }

    #[test]
    fn test_dedup_preserves_order() {
        let checker = SemanticChecker::new(fixed(r#"["a","a","b"]"#), 512);
        assert_eq!(checker.check("SELECT 1;").unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_non_json_falls_back_to_raw_text() {
        let checker = SemanticChecker::new(fixed("not json"), 512);
        assert_eq!(checker.check("SELECT 1;").unwrap(), ["not json"]);
    }

    #[test]
    fn test_wrong_shape_falls_back_to_raw_text() {
        assert_eq!(
            interpret_completion("  [1, 2]\n"),
            SemanticFindings::Raw("[1, 2]".to_string())
        );
        assert_eq!(
            interpret_completion(r#"{"issues": []}"#),
            SemanticFindings::Raw(r#"{"issues": []}"#.to_string())
        );
    }

    #[test]
    fn test_items_trimmed_and_blanks_dropped() {
        assert_eq!(
            interpret_completion(r#"[" x ", "", "x", "  "]"#),
            SemanticFindings::Structured(vec!["x".to_string()])
        );
        assert_eq!(interpret_completion("[]"), SemanticFindings::Structured(vec![]));
    }

    #[test]
    fn test_prompt_and_length_reach_the_model() {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let model: SharedModel = Arc::new(move |prompt: &str, max_length: u32| {
            *recorder.lock().unwrap() = Some((prompt.to_string(), max_length));
            Ok::<_, ModelError>("[]".to_string())
        });

        SemanticChecker::new(model, 64).check("CREATE TABLE t (id INTEGER);").unwrap();

        let (prompt, max_length) = seen.lock().unwrap().take().unwrap();
        assert_eq!(max_length, 64);
        assert!(prompt.starts_with("You are an expert SQL validator."));
        assert!(prompt.ends_with("CREATE TABLE t (id INTEGER);\n\nOutput JSON:\n"));
    }

    #[test]
    fn test_model_failure_propagates() {
        let model: SharedModel = Arc::new(|_: &str, _: u32| {
            Err::<String, _>(ModelError::Unavailable("offline".to_string()))
        });

        let err = SemanticChecker::new(model, 512).check("SELECT 1;").unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
    }
}
