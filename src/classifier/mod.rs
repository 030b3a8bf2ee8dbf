//! Hybrid answer classification — remote model first, deterministic local
//! keyword routing as the fallback.
//!
//! Hard contract: classification failures never leave this module as
//! errors. Every timeout, network failure, or out-of-set response resolves
//! to a deterministic value, so the quiz can always produce a next node or
//! a terminal profile, even fully offline. Only structural failures
//! (unknown node, missing choice) propagate.

pub mod heuristic;
pub mod prompts;
pub mod provider;

pub use provider::{ChoiceModel, OpenAiChoiceModel};

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, StructuralError};
use crate::graph::{Edges, Node, NodeKind, QuizGraph};
use crate::session::AnsweredQuestion;

const ROUTING_TEMPERATURE: f32 = 0.3;
const FINAL_TEMPERATURE: f32 = 0.2;

/// Where an answer routes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// Advance to this node.
    Next(String),
    /// The node's edges are finals — the caller should resolve the terminal
    /// profile over the whole history.
    Terminal,
}

/// Resolves free-text and choice answers into next-node ids, and the whole
/// journey into a terminal profile.
pub struct Classifier {
    provider: Option<Arc<dyn ChoiceModel>>,
    routing_timeout: Duration,
    final_timeout: Duration,
}

impl Classifier {
    pub fn new(provider: Option<Arc<dyn ChoiceModel>>, config: &ClassifierConfig) -> Self {
        Self {
            provider,
            routing_timeout: config.routing_timeout,
            final_timeout: config.final_timeout,
        }
    }

    /// Build from config, attaching the OpenAI backend when a credential is
    /// configured and running heuristic-only otherwise.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let provider = OpenAiChoiceModel::from_config(config)
            .map(|p| Arc::new(p) as Arc<dyn ChoiceModel>);
        if provider.is_none() {
            tracing::info!("no classifier credential configured, using local routing only");
        }
        Self::new(provider, config)
    }

    /// Resolve the next node for an answer at `node`.
    ///
    /// Decision order, first match wins: classification auto-advance,
    /// finals, direct, user choice, AI-classified branches. Anything else
    /// is an anomaly and routes back to the entry node.
    pub async fn resolve_next_node(
        &self,
        graph: &QuizGraph,
        node: &Node,
        answer: &str,
        selected_choice: Option<&str>,
    ) -> Result<Routing, StructuralError> {
        if node.kind == NodeKind::Classification {
            if let Edges::Direct { next } = &node.edges {
                return Ok(Routing::Next(next.clone()));
            }
        }

        match &node.edges {
            Edges::Finals { .. } => Ok(Routing::Terminal),
            Edges::Direct { next } => Ok(Routing::Next(next.clone())),
            Edges::Choices { .. } => match selected_choice {
                Some(choice_id) => Ok(Routing::Next(node.choice(choice_id)?.next.clone())),
                None => Err(StructuralError::MissingChoice {
                    node: node.id.clone(),
                }),
            },
            Edges::Branches { candidates } => {
                let chosen = self.classify_branch(graph, node, answer, candidates).await;
                Ok(Routing::Next(chosen))
            }
            Edges::None => {
                // Should not occur with a well-formed graph.
                tracing::warn!(node = %node.id, "no routable edges, falling back to entry node");
                Ok(Routing::Next(graph.entry_id().to_string()))
            }
        }
    }

    /// Resolve the terminal profile for a finished journey.
    ///
    /// Asks the remote model to pick among the final candidates given the
    /// full transcript; falls back to keyword routing over the concatenated
    /// answer text.
    pub async fn resolve_final(
        &self,
        graph: &QuizGraph,
        history: &[AnsweredQuestion],
        candidates: &[String],
    ) -> String {
        let Some(provider) = &self.provider else {
            return self.local_final(history, candidates);
        };

        let described = self.describe_candidates(graph, candidates);
        let prompt = prompts::final_prompt(history, &described);
        match provider
            .choose(
                prompts::FINAL_SYSTEM_PROMPT,
                &prompt,
                FINAL_TEMPERATURE,
                self.final_timeout,
            )
            .await
        {
            Ok(returned) if candidates.contains(&returned) => {
                tracing::debug!(
                    model = provider.model_name(),
                    chosen = %returned,
                    "remote final classification accepted"
                );
                returned
            }
            Ok(returned) => {
                let err = ClassifyError::OutOfSet { returned };
                tracing::warn!(
                    model = provider.model_name(),
                    error = %err,
                    "unknown profile from provider, using local routing"
                );
                self.local_final(history, candidates)
            }
            Err(e) => {
                tracing::warn!(
                    model = provider.model_name(),
                    error = %e,
                    "final classification failed, using local routing"
                );
                self.local_final(history, candidates)
            }
        }
    }

    async fn classify_branch(
        &self,
        graph: &QuizGraph,
        node: &Node,
        answer: &str,
        candidates: &[String],
    ) -> String {
        let Some(provider) = &self.provider else {
            tracing::debug!(node = %node.id, "no credential, using local routing");
            return heuristic::route_branch(answer, candidates).to_string();
        };

        let described = self.describe_candidates(graph, candidates);
        let prompt = prompts::routing_prompt(&node.prompt, answer, &described);
        match provider
            .choose(
                prompts::ROUTING_SYSTEM_PROMPT,
                &prompt,
                ROUTING_TEMPERATURE,
                self.routing_timeout,
            )
            .await
        {
            Ok(returned) if candidates.contains(&returned) => {
                tracing::debug!(
                    node = %node.id,
                    model = provider.model_name(),
                    chosen = %returned,
                    "remote classification accepted"
                );
                returned
            }
            Ok(returned) => {
                let err = ClassifyError::OutOfSet { returned };
                tracing::warn!(
                    node = %node.id,
                    model = provider.model_name(),
                    error = %err,
                    "unknown path from provider, using local routing"
                );
                heuristic::route_branch(answer, candidates).to_string()
            }
            Err(e) => {
                tracing::warn!(
                    node = %node.id,
                    model = provider.model_name(),
                    error = %e,
                    "classification failed, using local routing"
                );
                heuristic::route_branch(answer, candidates).to_string()
            }
        }
    }

    fn local_final(&self, history: &[AnsweredQuestion], candidates: &[String]) -> String {
        let combined = history
            .iter()
            .map(|qa| qa.answer.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        heuristic::route_final(&combined, candidates).to_string()
    }

    fn describe_candidates(&self, graph: &QuizGraph, candidates: &[String]) -> Vec<(String, String)> {
        candidates
            .iter()
            .map(|id| (id.clone(), graph.describe(id).to_string()))
            .collect()
    }
}
