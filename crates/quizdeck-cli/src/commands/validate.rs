//! The `quizdeck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::loader;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quiz = loader::load_quiz_file(&quiz_path)?;
    println!("Quiz: {} ({} questions)", quiz.title, quiz.len());

    let warnings = loader::lint_quiz(&quiz);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [question {n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
