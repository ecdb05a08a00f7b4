//! The `quizdeck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdeck.toml
    if std::path::Path::new("quizdeck.toml").exists() {
        println!("quizdeck.toml already exists, skipping.");
    } else {
        std::fs::write("quizdeck.toml", SAMPLE_CONFIG)?;
        println!("Created quizdeck.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.json");
    if example_path.exists() {
        println!("quizzes/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizdeck validate quizzes/example.json");
    println!("  2. Run: quizdeck play quizzes/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdeck configuration

# Default answer to the timer prompt
timer_enabled = false

# Countdown budget in minutes when the timer is on
timer_minutes = 10

# Celebrate results at or above this percentage
celebration_threshold = 70
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "Title": "Rust Basics",
  "Quiz": [
    {
      "Question": "Which keyword introduces an immutable binding?",
      "Options": ["var", "let", "const fn", "static mut"],
      "Answer": 1,
      "Explanation": "`let` introduces a binding; without `mut` it cannot be reassigned."
    },
    {
      "Question": "What does the ? operator do in a function returning Result?",
      "Options": [
        "Panics on error",
        "Ignores the error",
        "Returns the error to the caller",
        "Retries the operation"
      ],
      "Answer": [2],
      "Explanation": "`?` propagates the error value to the caller early."
    },
    {
      "Question": "Which collection keeps insertion order?",
      "Options": ["HashMap", "HashSet", "Vec", "BinaryHeap"],
      "Answer": 2,
      "Explanation": "A Vec stores elements contiguously in the order they were pushed."
    }
  ]
}
"#;
