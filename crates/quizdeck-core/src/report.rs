//! Attempt report types with JSON persistence.
//!
//! A [`SessionReport`] captures one finished attempt: what was answered,
//! the final summary, and whether the countdown cut the attempt short. It
//! is written only on explicit request; session state itself never persists.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{AnswerRecord, SessionController, SessionSummary};

/// A complete record of one quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Title of the quiz that was played.
    pub quiz_title: String,
    /// Answers committed during the attempt, in question order.
    pub answers: Vec<AnswerRecord>,
    /// Final score, total, and percentage.
    pub summary: SessionSummary,
    /// Whether the attempt ended by countdown expiry.
    pub timed_out: bool,
}

impl SessionReport {
    /// Build a report from a controller sitting on the Result screen.
    ///
    /// Returns `None` before a session has finished.
    pub fn from_session(session: &SessionController) -> Option<Self> {
        let summary = session.summary()?;
        Some(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz_title: session
                .quiz()
                .map(|q| q.title.clone())
                .unwrap_or_default(),
            answers: session.answers().to_vec(),
            summary,
            timed_out: session.timed_out(),
        })
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
