//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_QUIZ: &str = r#"{
  "Title": "Arithmetic",
  "Quiz": [
    {
      "Question": "2+2?",
      "Options": ["3", "4", "5"],
      "Answer": 1,
      "Explanation": "Basic math"
    }
  ]
}"#;

fn quizdeck() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizdeck").unwrap()
}

fn write_quiz(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_valid_quiz() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "quiz.json", SAMPLE_QUIZ);

    quizdeck()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Arithmetic (1 questions)"))
        .stdout(predicate::str::contains("Quiz is valid"));
}

#[test]
fn validate_quiz_with_warnings() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(
        &dir,
        "quiz.json",
        r#"{"Quiz":[{"Question":"q","Options":["a","b"],"Answer":0}]}"#,
    );

    quizdeck()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("explanation is blank"));
}

#[test]
fn validate_malformed_quiz() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "quiz.json", "{not json");

    quizdeck()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_nonexistent_file() {
    quizdeck()
        .arg("validate")
        .arg("no_such_quiz.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizdeck.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.json"));

    assert!(dir.path().join("quizdeck.toml").exists());
    assert!(dir.path().join("quizzes/example.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_quiz_validates_cleanly() {
    let dir = TempDir::new().unwrap();

    quizdeck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizdeck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("quizzes/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz is valid"));
}

#[test]
fn play_correct_answer_full_score() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "quiz.json", SAMPLE_QUIZ);

    // Answer option 2 (correct), Enter to finish, q at the result screen
    quizdeck()
        .arg("play")
        .arg(&path)
        .arg("--no-timer")
        .write_stdin("2\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arithmetic (1 questions)"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Basic math"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn play_wrong_answer_reveals_correct() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "quiz.json", SAMPLE_QUIZ);

    quizdeck()
        .arg("play")
        .arg(&path)
        .arg("--no-timer")
        .write_stdin("1\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong. The correct answer was 2)"))
        .stdout(predicate::str::contains("0%"));
}

#[test]
fn play_saves_report() {
    let dir = TempDir::new().unwrap();
    let path = write_quiz(&dir, "quiz.json", SAMPLE_QUIZ);
    let report_path = dir.path().join("attempt.json");

    quizdeck()
        .arg("play")
        .arg(&path)
        .arg("--no-timer")
        .arg("--output")
        .arg(&report_path)
        .write_stdin("2\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved"));

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("\"score\": 1"), "report was: {report}");
    assert!(report.contains("\"percentage\": 100"));
}

#[test]
fn play_missing_quiz_file_fails() {
    quizdeck()
        .arg("play")
        .arg("no_such_quiz.json")
        .arg("--no-timer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn play_pasted_quiz_from_stdin() {
    // Paste the document at the input prompt, terminated by '.', then play
    let input = format!("{SAMPLE_QUIZ}\n.\n2\n\nq\n");

    quizdeck()
        .arg("play")
        .arg("--no-timer")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Paste quiz JSON"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn play_bad_paste_reprompts() {
    // First paste is malformed; the input screen reports the error and asks
    // again, then a quit
    quizdeck()
        .arg("play")
        .arg("--no-timer")
        .write_stdin("{not json\n.\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid JSON"));
}

#[test]
fn help_output() {
    quizdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal multiple-choice quiz player"));
}

#[test]
fn version_output() {
    quizdeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizdeck"));
}
