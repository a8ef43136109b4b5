//! Answer resolution for NFT creation inputs.
//!
//! Merges explicitly supplied CLI field values with interactively collected
//! ones under an "explicit wins" precedence rule:
//! - a field supplied non-empty on the CLI is never prompted for;
//! - fields missing from the CLI are collected in one interactive session,
//!   in declaration order;
//! - CLI keys not declared as fields (e.g. an owner address) pass through
//!   verbatim, unprompted and never overwritten.

pub mod prompt;

use std::collections::HashMap;

use tracing::debug;

use minty_shared::Result;

pub use prompt::{PromptSource, StdinPrompt};

// ---------------------------------------------------------------------------
// FieldSpec
// ---------------------------------------------------------------------------

/// Declaration of one required answer field: a stable key and the prompt
/// text used when the value must be collected interactively.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Stable field key (e.g. `name`).
    pub key: String,
    /// Human-readable prompt shown during interactive collection.
    pub prompt: String,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnswerSet
// ---------------------------------------------------------------------------

/// Resolved mapping of field key to value, in insertion order.
///
/// The set is small (a handful of metadata fields), so it is backed by a
/// `Vec` to keep iteration order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a resolved value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a value. An existing entry for the same key is left untouched
    /// so earlier (higher-precedence) values always win.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.entries.push((key, value.into()));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve every declared field to a value, prompting only for the ones the
/// CLI did not supply.
///
/// All pending fields are collected in a single prompt session, in `specs`
/// declaration order. CLI keys not declared in `specs` are merged into the
/// result unchanged after resolution. An aborted prompt session propagates
/// as an interaction error; no partial answer set is returned.
pub fn resolve(
    cli_options: &HashMap<String, String>,
    specs: &[FieldSpec],
    prompter: &mut dyn PromptSource,
) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();
    let mut pending: Vec<&FieldSpec> = Vec::new();

    for spec in specs {
        // An empty CLI value counts as absent.
        match cli_options.get(&spec.key).filter(|v| !v.is_empty()) {
            Some(value) => answers.insert(&spec.key, value),
            None => pending.push(spec),
        }
    }

    debug!(
        supplied = answers.len(),
        pending = pending.len(),
        "resolving answer fields"
    );

    if !pending.is_empty() {
        let collected = prompter.collect(&pending)?;
        for (spec, value) in pending.iter().zip(collected) {
            answers.insert(&spec.key, value);
        }
    }

    // Pass-through: undeclared CLI keys are copied verbatim, never prompted.
    // Sorted so the result is a pure function of the inputs.
    let mut extras: Vec<(&String, &String)> = cli_options
        .iter()
        .filter(|(k, _)| !specs.iter().any(|s| &s.key == *k))
        .collect();
    extras.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (key, value) in extras {
        answers.insert(key, value);
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minty_shared::MintyError;

    /// Prompt source that replays a fixed script of answers.
    struct ScriptedPrompt {
        answers: Vec<String>,
        asked: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().rev().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl PromptSource for ScriptedPrompt {
        fn collect(&mut self, fields: &[&FieldSpec]) -> Result<Vec<String>> {
            let mut out = Vec::new();
            for field in fields {
                self.asked.push(field.key.clone());
                out.push(
                    self.answers
                        .pop()
                        .ok_or_else(|| MintyError::Interaction("script exhausted".into()))?,
                );
            }
            Ok(out)
        }
    }

    /// Prompt source that must never be reached.
    struct NoPrompt;

    impl PromptSource for NoPrompt {
        fn collect(&mut self, fields: &[&FieldSpec]) -> Result<Vec<String>> {
            panic!("prompted for {:?}", fields.iter().map(|f| &f.key).collect::<Vec<_>>());
        }
    }

    fn mint_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", "Enter a name for your new NFT: "),
            FieldSpec::new("description", "Enter a description for your new NFT: "),
        ]
    }

    #[test]
    fn explicit_values_win_without_prompting() {
        let mut cli = HashMap::new();
        cli.insert("name".to_string(), "Cat".to_string());
        cli.insert("description".to_string(), "A cat.".to_string());

        let answers = resolve(&cli, &mint_specs(), &mut NoPrompt).unwrap();
        assert_eq!(answers.get("name"), Some("Cat"));
        assert_eq!(answers.get("description"), Some("A cat."));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn missing_fields_are_prompted_in_declaration_order() {
        let cli = HashMap::new();
        let mut prompter = ScriptedPrompt::new(&["Cat", "A cat."]);

        let answers = resolve(&cli, &mint_specs(), &mut prompter).unwrap();
        assert_eq!(prompter.asked, vec!["name", "description"]);
        assert_eq!(answers.get("name"), Some("Cat"));
        assert_eq!(answers.get("description"), Some("A cat."));
    }

    #[test]
    fn empty_cli_value_counts_as_absent() {
        let mut cli = HashMap::new();
        cli.insert("name".to_string(), String::new());
        cli.insert("description".to_string(), "A cat.".to_string());

        let mut prompter = ScriptedPrompt::new(&["Cat"]);
        let answers = resolve(&cli, &mint_specs(), &mut prompter).unwrap();
        assert_eq!(prompter.asked, vec!["name"]);
        assert_eq!(answers.get("name"), Some("Cat"));
    }

    #[test]
    fn undeclared_keys_pass_through_verbatim() {
        let mut cli = HashMap::new();
        cli.insert("owner".to_string(), "0xABC".to_string());

        let mut prompter = ScriptedPrompt::new(&["Cat", "A cat."]);
        let answers = resolve(&cli, &mint_specs(), &mut prompter).unwrap();

        // Only declared fields were prompted; the extra key came through unchanged.
        assert_eq!(prompter.asked, vec!["name", "description"]);
        assert_eq!(answers.get("owner"), Some("0xABC"));
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn every_declared_key_resolves_exactly_once() {
        let mut cli = HashMap::new();
        cli.insert("name".to_string(), "Cat".to_string());

        let mut prompter = ScriptedPrompt::new(&["A cat."]);
        let answers = resolve(&cli, &mint_specs(), &mut prompter).unwrap();

        assert_eq!(answers.len(), 2);
        let keys: Vec<&str> = answers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "description"]);
    }

    #[test]
    fn aborted_session_propagates_as_interaction_error() {
        let cli = HashMap::new();
        // Script ends before the second field is answered.
        let mut prompter = ScriptedPrompt::new(&["Cat"]);

        let err = resolve(&cli, &mint_specs(), &mut prompter).unwrap_err();
        assert!(matches!(err, MintyError::Interaction(_)));
    }

    #[test]
    fn resolution_is_pure_when_nothing_is_pending() {
        let mut cli = HashMap::new();
        cli.insert("name".to_string(), "Cat".to_string());
        cli.insert("description".to_string(), "A cat.".to_string());
        cli.insert("owner".to_string(), "0xABC".to_string());

        let a = resolve(&cli, &mint_specs(), &mut NoPrompt).unwrap();
        let b = resolve(&cli, &mint_specs(), &mut NoPrompt).unwrap();
        assert_eq!(a, b);
    }
}
