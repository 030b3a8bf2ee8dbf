//! The orchestrator — composes the graph, classifier, and session state on
//! each user input.
//!
//! `submit_answer` is the sole mutation entry point and runs to completion,
//! including any outbound classification call, before the next submission
//! is accepted. Callers must not overlap calls on the same session (disable
//! input while a submission is in flight).

use std::sync::Arc;

use serde::Serialize;

use crate::classifier::{Classifier, Routing};
use crate::error::{Error, StructuralError};
use crate::graph::{Edges, Node, NodeKind, QuizGraph, TerminalProfile};
use crate::session::{AnsweredQuestion, SessionState, TranscriptEntry};

/// A user input for the current node.
#[derive(Debug, Clone)]
pub enum AnswerInput {
    /// Free-text answer.
    Text(String),
    /// Selection of one of the node's choices.
    Choice { choice_id: String },
}

/// What happened after an answer was submitted.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    /// The quiz advanced to a new visible node.
    Advanced { node: Node },
    /// The journey ended at a terminal profile.
    Finished {
        profile: TerminalProfile,
        transcript: Vec<TranscriptEntry>,
    },
}

/// Drives one quiz run.
pub struct Orchestrator {
    graph: Arc<QuizGraph>,
    classifier: Classifier,
    session: SessionState,
}

impl Orchestrator {
    pub fn new(graph: Arc<QuizGraph>, classifier: Classifier) -> Self {
        let session = SessionState::new(graph.entry_id());
        tracing::debug!(session = %session.id(), entry = graph.entry_id(), "quiz session started");
        Self {
            graph,
            classifier,
            session,
        }
    }

    /// The node the user is currently on.
    pub fn current_node(&self) -> Result<&Node, StructuralError> {
        self.graph.get(self.session.current())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Submit an answer for the current node.
    ///
    /// The answer is recorded into history before routing, so it is never
    /// lost to a classification failure — those only affect routing and are
    /// resolved locally. Structural errors indicate a malformed graph and
    /// are fatal for the session.
    pub async fn submit_answer(&mut self, input: AnswerInput) -> Result<Outcome, StructuralError> {
        let node = self.graph.get(self.session.current())?.clone();

        let (answered, answer_text, choice_id) = match &input {
            AnswerInput::Text(text) => (
                AnsweredQuestion::text(&node.id, &node.prompt, text),
                text.clone(),
                None,
            ),
            AnswerInput::Choice { choice_id } => {
                let option = node.choice(choice_id)?;
                (
                    AnsweredQuestion::choice(
                        &node.id,
                        &node.prompt,
                        &option.answer,
                        &option.id,
                        &option.caption,
                    ),
                    option.answer.clone(),
                    Some(choice_id.clone()),
                )
            }
        };

        self.session.record_answer(answered);

        let routing = self
            .classifier
            .resolve_next_node(&self.graph, &node, &answer_text, choice_id.as_deref())
            .await?;

        match routing {
            Routing::Terminal => {
                let Edges::Finals { candidates } = &node.edges else {
                    // Terminal routing is only produced for finals edges.
                    tracing::warn!(node = %node.id, "terminal routing from a non-finals node");
                    return Ok(Outcome::Advanced {
                        node: self.graph.entry().clone(),
                    });
                };
                let final_id = self
                    .classifier
                    .resolve_final(&self.graph, self.session.history(), candidates)
                    .await;
                let profile = self.graph.profile(&final_id)?.clone();
                tracing::info!(
                    session = %self.session.id(),
                    profile = %final_id,
                    answers = self.session.history().len(),
                    "quiz finished"
                );
                Ok(Outcome::Finished {
                    profile,
                    transcript: self.session.transcript(),
                })
            }
            Routing::Next(next_id) => {
                self.session.advance_to(&next_id);
                let visible = self.skip_classification_hop(&next_id)?;
                tracing::debug!(
                    session = %self.session.id(),
                    from = %node.id,
                    to = %visible.id,
                    "advanced"
                );
                Ok(Outcome::Advanced { node: visible })
            }
        }
    }

    /// Advance through a classification node so the caller is never shown
    /// one. Bounded to a single hop: a second consecutive classification
    /// node is a content bug, logged and returned as-is rather than chased.
    fn skip_classification_hop(&mut self, id: &str) -> Result<Node, StructuralError> {
        let node = self.graph.get(id)?;
        if node.kind == NodeKind::Classification {
            if let Edges::Direct { next } = &node.edges {
                let target = self.graph.get(next)?.clone();
                self.session.advance_to(&target.id);
                if target.kind == NodeKind::Classification {
                    tracing::warn!(
                        node = %target.id,
                        "consecutive classification nodes, auto-skip is bounded to one hop"
                    );
                }
                return Ok(target);
            }
        }
        Ok(node.clone())
    }

    /// Undo one step, returning the node to re-display.
    pub fn go_back(&mut self) -> Result<Node, Error> {
        let restored = self.session.go_back()?;
        let node = self.graph.get(&restored).map_err(Error::from)?;
        Ok(node.clone())
    }

    /// Restart the quiz with a fresh session instance; the old session is
    /// abandoned, never mutated in place.
    pub fn reset(&mut self) -> &Node {
        self.session = SessionState::new(self.graph.entry_id());
        tracing::debug!(session = %self.session.id(), "quiz session reset");
        self.graph.entry()
    }
}
