//! Per-run session state — current node, ordered answer history, and the
//! back-navigation stack.
//!
//! Single-writer discipline: the orchestrator is the only mutation entry
//! point, and every mutating method takes `&mut self`, so no partial update
//! is ever observable. One instance per quiz run; restart is a fresh
//! instance, never a cleared mutation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::SessionError;

/// How an answer was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Text,
    Choice,
}

/// Metadata for a choice-based answer.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceMeta {
    pub choice_id: String,
    pub caption: String,
}

/// One answered question. Immutable once created; the history only appends
/// and pops, never edits in place.
#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion {
    pub node_id: String,
    pub prompt: String,
    pub answer: String,
    pub kind: AnswerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<ChoiceMeta>,
    pub answered_at: DateTime<Utc>,
}

impl AnsweredQuestion {
    pub fn text(node_id: &str, prompt: &str, answer: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            kind: AnswerKind::Text,
            choice: None,
            answered_at: Utc::now(),
        }
    }

    pub fn choice(node_id: &str, prompt: &str, answer: &str, choice_id: &str, caption: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            kind: AnswerKind::Choice,
            choice: Some(ChoiceMeta {
                choice_id: choice_id.to_string(),
                caption: caption.to_string(),
            }),
            answered_at: Utc::now(),
        }
    }
}

/// Stable question/answer shape handed to downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
    pub kind: AnswerKind,
}

/// Mutable state of one quiz run.
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    current: String,
    history: Vec<AnsweredQuestion>,
    nav_stack: Vec<String>,
}

impl SessionState {
    /// Fresh session positioned at the entry node with empty history.
    pub fn new(entry_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            current: entry_id.to_string(),
            history: Vec::new(),
            nav_stack: Vec::new(),
        }
    }

    /// Per-run id, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.nav_stack.is_empty()
    }

    /// Record an answer for the current node: append to history and push the
    /// current node onto the back stack. Routing happens afterwards, so the
    /// answer is kept even if classification fails downstream.
    pub fn record_answer(&mut self, answered: AnsweredQuestion) {
        self.history.push(answered);
        self.nav_stack.push(self.current.clone());
        debug_assert_eq!(self.nav_stack.len(), self.history.len());
    }

    /// Move the session to the resolved next node.
    pub(crate) fn advance_to(&mut self, next: &str) {
        self.current = next.to_string();
    }

    /// Undo one step: pop the back stack, drop the most recent answer, and
    /// return to the popped node. State is unchanged on failure.
    pub fn go_back(&mut self) -> Result<String, SessionError> {
        let previous = self.nav_stack.pop().ok_or(SessionError::NoHistory)?;
        self.history.pop();
        self.current = previous.clone();
        debug_assert_eq!(self.nav_stack.len(), self.history.len());
        Ok(previous)
    }

    /// The full journey in a stable shape, in answer order.
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.history
            .iter()
            .map(|qa| TranscriptEntry {
                question: qa.prompt.clone(),
                answer: qa.answer.clone(),
                kind: qa.kind,
            })
            .collect()
    }
}
