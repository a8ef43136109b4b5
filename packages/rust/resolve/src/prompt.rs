//! Interactive prompt session for collecting missing answer fields.

use std::io::{BufRead, Write};

use minty_shared::{MintyError, Result};

use crate::FieldSpec;

/// Source of interactively collected answers.
///
/// One `collect` call is one session: all pending fields are requested
/// together, in the order given, and either every field gets an answer or
/// the whole session fails.
pub trait PromptSource {
    fn collect(&mut self, fields: &[&FieldSpec]) -> Result<Vec<String>>;
}

/// Prompt session backed by the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl PromptSource for StdinPrompt {
    fn collect(&mut self, fields: &[&FieldSpec]) -> Result<Vec<String>> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        collect_from(&mut stdin.lock(), &mut stdout.lock(), fields)
    }
}

/// Prompt each field on `output` and read one answer line from `input`.
///
/// End-of-input before every field is answered aborts the session; a blank
/// line is a valid (empty) answer.
fn collect_from(
    input: &mut impl BufRead,
    output: &mut impl Write,
    fields: &[&FieldSpec],
) -> Result<Vec<String>> {
    let mut answers = Vec::with_capacity(fields.len());

    for field in fields {
        write!(output, "{}", field.prompt)
            .and_then(|_| output.flush())
            .map_err(|e| MintyError::Interaction(format!("prompt write failed: {e}")))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| MintyError::Interaction(format!("prompt read failed: {e}")))?;

        if read == 0 {
            return Err(MintyError::Interaction(format!(
                "input closed before '{}' was answered",
                field.key
            )));
        }

        answers.push(line.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(answers)
}
