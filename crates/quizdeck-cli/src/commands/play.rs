//! The `quizdeck play` command.
//!
//! Runs the interactive session loop: the Input screen accepts a quiz file
//! or pasted JSON, the Start screen settles the timer, then the question
//! loop multiplexes stdin with countdown ticks until the Result screen.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use quizdeck_core::countdown::Tick;
use quizdeck_core::loader;
use quizdeck_core::model::{Question, Quiz};
use quizdeck_core::report::SessionReport;
use quizdeck_core::session::{
    AnswerFeedback, Screen, SessionController, SessionObserver, SessionSummary, TimerSetting,
    Verdict,
};

use crate::config::{load_config_from, QuizdeckConfig};

/// Console renderer: draws each screen and plays the feedback cues.
///
/// Purely presentational; it never feeds anything back into the session.
struct ConsoleRenderer {
    celebration_threshold: u32,
}

impl SessionObserver for ConsoleRenderer {
    fn on_quiz_loaded(&self, title: &str, question_count: usize) {
        println!("\n{title} ({question_count} questions)");
    }

    fn on_session_started(&self, timer_seconds: Option<u32>) {
        if let Some(seconds) = timer_seconds {
            println!("Countdown: {}", format_time(seconds));
        }
    }

    fn on_question(&self, index: usize, total: usize, question: &Question, is_last: bool) {
        println!("\nQuestion {}/{}: {}", index + 1, total, question.text);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }
        let advance_label = if is_last { "finish" } else { "continue" };
        println!(
            "Pick 1-{}; after answering, press Enter to {advance_label} (q to quit).",
            question.options.len()
        );
    }

    fn on_answer(&self, feedback: &AnswerFeedback) {
        match feedback.verdict {
            Verdict::Correct => println!("Correct!"),
            Verdict::Incorrect => {
                // Terminal bell as the failure tone; silent terminals just
                // skip it.
                print!("\x07");
                println!(
                    "Wrong. The correct answer was {})",
                    feedback.correct_index + 1
                );
            }
        }
        if !feedback.explanation.trim().is_empty() {
            println!("  {}", feedback.explanation);
        }
    }

    fn on_tick(&self, remaining_seconds: u32) {
        // A full redraw every second would fight with the input prompt, so
        // only surface round minutes and the final stretch.
        if remaining_seconds > 0
            && (remaining_seconds % 60 == 0 || remaining_seconds == 30 || remaining_seconds <= 10)
        {
            println!("  [time left {}]", format_time(remaining_seconds));
        }
    }

    fn on_finished(&self, summary: &SessionSummary, timed_out: bool) {
        if timed_out {
            println!("\nTime is up!");
        }
        print_summary(summary);
        if summary.percentage >= self.celebration_threshold {
            print_confetti();
        }
    }

    fn on_reset(&self) {}
}

/// Format seconds as `MM:SS`.
fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn print_summary(summary: &SessionSummary) {
    use comfy_table::Table;

    let mut table = Table::new();
    table.set_header(vec!["Score", "Total", "Percentage"]);
    table.add_row(vec![
        summary.score.to_string(),
        summary.total.to_string(),
        format!("{}%", summary.percentage),
    ]);
    println!("\n{table}");
}

fn print_confetti() {
    println!(r"  *  .  *  '  *  .  *  '  *  .  *");
    println!(r"   '  Great run, well played!  '");
    println!(r"  *  .  *  '  *  .  *  '  *  .  *");
}

type InputLines = Lines<BufReader<Stdin>>;

pub async fn execute(
    quiz_path: Option<PathBuf>,
    timer_flag: bool,
    no_timer: bool,
    minutes: Option<u32>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(?config, "configuration loaded");
    let renderer = Arc::new(ConsoleRenderer {
        celebration_threshold: config.celebration_threshold,
    });
    let mut session = SessionController::new(renderer);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // The first quiz may come from the command line; after a restart the
    // Input screen always prompts for pasted JSON.
    let mut pending_file = quiz_path;

    'session: loop {
        // Input screen
        let quiz = if let Some(path) = pending_file.take() {
            loader::load_quiz_file(&path)?
        } else {
            match read_pasted_quiz(&mut lines).await? {
                Some(quiz) => quiz,
                None => break 'session,
            }
        };
        session.load(quiz);

        // Start screen
        let timer = resolve_timer(timer_flag, no_timer, minutes, &config, &mut lines).await?;
        let mut ticks = session.start(timer);

        // Question screen
        while session.screen() == Screen::Question {
            tokio::select! {
                tick = recv_tick(&mut ticks), if ticks.is_some() => {
                    match tick {
                        Some(_) => session.tick(),
                        None => ticks = None,
                    }
                }
                line = lines.next_line() => {
                    match line? {
                        None => break 'session,
                        Some(input) => {
                            if handle_question_input(&mut session, &input) {
                                break 'session;
                            }
                        }
                    }
                }
            }
        }

        // Result screen
        if let Some(path) = &output {
            if let Some(report) = SessionReport::from_session(&session) {
                report.save_json(path)?;
                println!("Report saved to {}", path.display());
            }
        }
        println!("\n[r] play another quiz  [q] quit");
        loop {
            match lines.next_line().await? {
                None => break 'session,
                Some(line) => match line.trim() {
                    "r" | "restart" => {
                        session.reset();
                        continue 'session;
                    }
                    "q" | "quit" => break 'session,
                    _ => println!("  (r to restart, q to quit)"),
                },
            }
        }
    }

    Ok(())
}

/// Prompt for a pasted quiz document, re-prompting on load errors.
///
/// Returns `None` when the player quits or stdin is exhausted.
async fn read_pasted_quiz(lines: &mut InputLines) -> Result<Option<Quiz>> {
    loop {
        println!("\nPaste quiz JSON, then a line with a single '.' (or 'q' to quit):");
        let mut buffer = String::new();
        loop {
            match lines.next_line().await? {
                None => return Ok(None),
                Some(line) if line.trim() == "." => break,
                Some(line) if buffer.is_empty() && line.trim() == "q" => return Ok(None),
                Some(line) => {
                    buffer.push_str(&line);
                    buffer.push('\n');
                }
            }
        }
        match loader::load_quiz(&buffer) {
            Ok(quiz) => return Ok(Some(quiz)),
            // Recoverable: report and let the player paste again
            Err(e) => println!("Error: {e}"),
        }
    }
}

/// Settle the timer for this attempt from flags, config, and prompts.
async fn resolve_timer(
    timer_flag: bool,
    no_timer: bool,
    minutes: Option<u32>,
    config: &QuizdeckConfig,
    lines: &mut InputLines,
) -> Result<TimerSetting> {
    if no_timer {
        return Ok(TimerSetting::Off);
    }
    if timer_flag || minutes.is_some() {
        return Ok(TimerSetting::On {
            minutes: minutes.or(Some(config.timer_minutes)),
        });
    }

    // Ask; Enter keeps the configured default
    let hint = if config.timer_enabled { "[Y/n]" } else { "[y/N]" };
    println!("Enable the countdown timer? {hint}");
    let answer = lines.next_line().await?.unwrap_or_default();
    let enabled = match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => config.timer_enabled,
    };
    if !enabled {
        return Ok(TimerSetting::Off);
    }

    println!("Minutes (Enter for {}):", config.timer_minutes);
    let answer = lines.next_line().await?.unwrap_or_default();
    // Non-numeric or non-positive input falls back to the configured budget
    let minutes = answer
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&m| m >= 1)
        .or(Some(config.timer_minutes));
    Ok(TimerSetting::On { minutes })
}

async fn recv_tick(ticks: &mut Option<mpsc::Receiver<Tick>>) -> Option<Tick> {
    match ticks {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Dispatch one line of question-screen input. Returns `true` to quit.
fn handle_question_input(session: &mut SessionController, input: &str) -> bool {
    let trimmed = input.trim();
    match trimmed {
        "q" | "quit" => return true,
        "" | "n" | "next" => session.advance(),
        _ => match trimmed.parse::<usize>() {
            // Number keys map to options 0..n-1, only before an answer lands
            // and only when the question actually has that many options
            Ok(n) if n >= 1 => {
                let option_count = session
                    .quiz()
                    .map(|quiz| quiz.questions[session.state().current_index].options.len())
                    .unwrap_or(0);
                if n <= option_count {
                    session.select_option(n - 1);
                } else {
                    println!("  (no option {n} on this question)");
                }
            }
            _ => println!("  (pick an option number, Enter to continue, q to quit)"),
        },
    }
    false
}
