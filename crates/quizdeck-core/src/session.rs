//! Quiz session controller.
//!
//! Owns the mutable [`SessionState`] and drives the four-screen machine
//! (`Input → Start → Question → Result`) in response to player actions and
//! countdown ticks. Presentation subscribes through [`SessionObserver`] and
//! never mutates session state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::countdown::{Countdown, Tick};
use crate::model::{Question, Quiz};

/// Countdown budget in minutes when the timer is enabled without an explicit
/// (positive) duration.
pub const DEFAULT_TIMER_MINUTES: u32 = 10;

/// The four screens of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No quiz loaded, or a previous session was discarded.
    Input,
    /// A quiz is loaded; awaiting start confirmation and timer settings.
    Start,
    /// Iterating the quiz one question at a time.
    Question,
    /// Terminal per-attempt state showing the final score.
    Result,
}

/// Mutable per-attempt state, exclusively owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Index of the question being presented, in `[0, questions.len()]`.
    pub current_index: usize,
    /// Questions answered correctly so far.
    pub score: u32,
    /// Seconds left on the countdown; unused when no timer is armed.
    pub remaining_seconds: u32,
    /// Whether an answer has been committed for the current question.
    pub answered: bool,
}

/// Timer configuration for a session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSetting {
    Off,
    On { minutes: Option<u32> },
}

impl TimerSetting {
    /// Resolved countdown budget in seconds, or `None` when disabled.
    /// An absent or non-positive duration falls back to the default budget.
    pub fn duration_seconds(self) -> Option<u32> {
        match self {
            TimerSetting::Off => None,
            TimerSetting::On { minutes } => {
                let minutes = match minutes {
                    Some(m) if m >= 1 => m,
                    _ => DEFAULT_TIMER_MINUTES,
                };
                Some(minutes * 60)
            }
        }
    }
}

/// Correctness signal distinguishing the two feedback cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Everything the presentation layer needs to render a committed answer.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    /// Option the player chose.
    pub selected: usize,
    /// The correct option, revealed when the choice was wrong.
    pub correct_index: usize,
    pub verdict: Verdict,
    /// Explanation text shown after the answer.
    pub explanation: String,
}

/// One committed answer, kept for the attempt report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: usize,
    pub correct: bool,
}

/// Final score surfaced on the Result screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub total: usize,
    /// `round(100 * score / total)`.
    pub percentage: u32,
}

impl SessionSummary {
    fn new(score: u32, total: usize) -> Self {
        let percentage = (100.0 * f64::from(score) / total as f64).round() as u32;
        Self {
            score,
            total,
            percentage,
        }
    }
}

/// State-change notifications consumed by a presentation layer.
///
/// Implementations must not feed anything back into the controller from
/// inside a callback; they render, play a cue, or record.
pub trait SessionObserver: Send + Sync {
    fn on_quiz_loaded(&self, title: &str, question_count: usize);
    fn on_session_started(&self, timer_seconds: Option<u32>);
    fn on_question(&self, index: usize, total: usize, question: &Question, is_last: bool);
    fn on_answer(&self, feedback: &AnswerFeedback);
    fn on_tick(&self, remaining_seconds: u32);
    fn on_finished(&self, summary: &SessionSummary, timed_out: bool);
    fn on_reset(&self);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_quiz_loaded(&self, _: &str, _: usize) {}
    fn on_session_started(&self, _: Option<u32>) {}
    fn on_question(&self, _: usize, _: usize, _: &Question, _: bool) {}
    fn on_answer(&self, _: &AnswerFeedback) {}
    fn on_tick(&self, _: u32) {}
    fn on_finished(&self, _: &SessionSummary, _: bool) {}
    fn on_reset(&self) {}
}

/// The session controller.
pub struct SessionController {
    quiz: Option<Quiz>,
    state: SessionState,
    screen: Screen,
    timer_armed: bool,
    countdown: Option<Countdown>,
    answers: Vec<AnswerRecord>,
    summary: Option<SessionSummary>,
    timed_out: bool,
    observer: Arc<dyn SessionObserver>,
}

impl SessionController {
    pub fn new(observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            quiz: None,
            state: SessionState::default(),
            screen: Screen::Input,
            timer_armed: false,
            countdown: None,
            answers: Vec::new(),
            summary: None,
            timed_out: false,
            observer,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    /// Final summary; `Some` only on the Result screen.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    /// Answers committed during the current attempt, in question order.
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Whether the last attempt ended by countdown expiry.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Install a freshly loaded quiz, replacing any prior one, and move to
    /// the Start screen.
    pub fn load(&mut self, quiz: Quiz) {
        self.stop_countdown();
        self.clear_attempt();
        tracing::debug!(title = %quiz.title, questions = quiz.len(), "quiz loaded");
        self.observer.on_quiz_loaded(&quiz.title, quiz.len());
        self.quiz = Some(quiz);
        self.screen = Screen::Start;
    }

    /// Begin the question sequence.
    ///
    /// When the timer is enabled, spawns a countdown and returns its tick
    /// channel; the caller forwards each received [`Tick`] into [`Self::tick`].
    /// Any previously running countdown is cancelled first, so invoking
    /// `start` twice without an intervening reset cannot stack timers.
    pub fn start(&mut self, timer: TimerSetting) -> Option<mpsc::Receiver<Tick>> {
        if self.quiz.is_none() {
            tracing::warn!("start ignored: no quiz loaded");
            return None;
        }
        self.stop_countdown();
        self.clear_attempt();

        let duration = timer.duration_seconds();
        let receiver = match duration {
            Some(seconds) => {
                self.state.remaining_seconds = seconds;
                self.timer_armed = true;
                let (countdown, rx) = Countdown::start();
                self.countdown = Some(countdown);
                Some(rx)
            }
            None => None,
        };

        self.screen = Screen::Question;
        tracing::debug!(?duration, "session started");
        self.observer.on_session_started(duration);
        self.load_question_at(0);
        receiver
    }

    /// Commit an answer for the current question.
    ///
    /// First answer wins: once `answered` is set, further selections for the
    /// same question are ignored. An out-of-range index is simply incorrect.
    pub fn select_option(&mut self, option_index: usize) {
        if self.screen != Screen::Question {
            return;
        }
        if self.state.answered {
            tracing::debug!(option_index, "selection ignored: already answered");
            return;
        }

        let quiz = self.quiz.as_ref().expect("question screen without a quiz");
        let question = &quiz.questions[self.state.current_index];

        self.state.answered = true;
        let verdict = if option_index == question.correct_index {
            self.state.score += 1;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.answers.push(AnswerRecord {
            question_index: self.state.current_index,
            selected: option_index,
            correct: verdict == Verdict::Correct,
        });

        let feedback = AnswerFeedback {
            selected: option_index,
            correct_index: question.correct_index,
            verdict,
            explanation: question.explanation.clone(),
        };
        self.observer.on_answer(&feedback);
    }

    /// Move to the next question, or finalize after the last one.
    ///
    /// No-op until an answer is committed, mirroring the disabled "next"
    /// control.
    pub fn advance(&mut self) {
        if self.screen != Screen::Question || !self.state.answered {
            return;
        }
        let total = self.quiz.as_ref().expect("question screen without a quiz").len();
        self.state.current_index += 1;
        if self.state.current_index < total {
            self.load_question_at(self.state.current_index);
        } else {
            self.finalize(false);
        }
    }

    /// One countdown step. At zero, forces finalization with whatever score
    /// has accumulated, regardless of position in the quiz.
    pub fn tick(&mut self) {
        if self.screen != Screen::Question || !self.timer_armed {
            return;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.observer.on_tick(self.state.remaining_seconds);
        if self.state.remaining_seconds == 0 {
            tracing::debug!("time budget exhausted");
            self.finalize(true);
        }
    }

    /// Discard the session and the loaded quiz and return to Input.
    pub fn reset(&mut self) {
        self.stop_countdown();
        self.clear_attempt();
        self.quiz = None;
        self.screen = Screen::Input;
        tracing::debug!("session reset");
        self.observer.on_reset();
    }

    fn load_question_at(&mut self, index: usize) {
        let quiz = self.quiz.as_ref().expect("question loaded without a quiz");
        // In-bounds access is a programming contract, never reachable via
        // user input given the transition rules.
        assert!(
            index < quiz.len(),
            "question index {index} out of bounds for {} questions",
            quiz.len()
        );
        self.state.current_index = index;
        self.state.answered = false;
        let total = quiz.len();
        self.observer
            .on_question(index, total, &quiz.questions[index], index + 1 == total);
    }

    fn finalize(&mut self, timed_out: bool) {
        self.stop_countdown();
        let total = self.quiz.as_ref().expect("finalized without a quiz").len();
        let summary = SessionSummary::new(self.state.score, total);
        self.summary = Some(summary);
        self.timed_out = timed_out;
        self.screen = Screen::Result;
        tracing::debug!(
            score = summary.score,
            total,
            percentage = summary.percentage,
            timed_out,
            "session finished"
        );
        self.observer.on_finished(&summary, timed_out);
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
        self.timer_armed = false;
    }

    fn clear_attempt(&mut self) {
        self.state = SessionState::default();
        self.answers.clear();
        self.summary = None;
        self.timed_out = false;
    }
}
