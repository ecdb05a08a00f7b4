//! Core data model types for quizdeck.
//!
//! These are the fundamental types that the entire quizdeck system uses to
//! represent a loaded quiz and its questions.

use serde::{Deserialize, Serialize};

/// A validated, immutable quiz document.
///
/// Constructed only by the loader; a newly loaded `Quiz` fully replaces any
/// prior one in a session. `questions` is non-empty by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Quiz title, defaulted to `"Quiz"` when the document omits it.
    pub title: String,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Number of questions in this quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a loader-produced quiz; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// One multiple-choice quiz item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the player.
    pub text: String,
    /// Answer options, presented in given order without reordering.
    pub options: Vec<String>,
    /// Index into `options` considered correct. In-bounds by construction.
    pub correct_index: usize,
    /// Explanation revealed after an answer is committed.
    pub explanation: String,
}
