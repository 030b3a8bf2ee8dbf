//! The quiz graph — static directed graph of question, classification, and
//! terminal nodes.
//!
//! Pure data with lookup only; all invariants are checked once at
//! construction so the rest of the core can trust edge targets. The graph
//! is a DAG by design, but nothing here chases edges recursively — the
//! orchestrator bounds classification auto-advance to a single hop.

mod catalog;

pub use catalog::fragrance_graph;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{GraphError, StructuralError};

/// What kind of interaction a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Free-text question.
    Text,
    /// Image/option selection question.
    Image,
    /// Invisible routing node — auto-advanced, never shown to the user.
    Classification,
    /// Terminal profile node — the end of a journey.
    Terminal,
}

/// One selectable option on an image/choice node.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOption {
    pub id: String,
    /// Short caption shown alongside the option.
    pub caption: String,
    /// Evocative answer text recorded into history when this option is picked.
    pub answer: String,
    /// Fixed next node — no classification involved.
    pub next: String,
}

/// Outgoing edges of a node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edges {
    /// Single unconditional next node.
    Direct { next: String },
    /// Candidate next nodes; the classifier picks one from free text.
    Branches { candidates: Vec<String> },
    /// Finite options with fixed next nodes; the user picks directly.
    Choices { options: Vec<ChoiceOption> },
    /// Terminal-profile candidates; resolved from the whole journey.
    Finals { candidates: Vec<String> },
    /// No outgoing edges (terminal nodes only).
    None,
}

/// An immutable node in the quiz graph.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Display text. Opaque to the core; embedded into classification prompts.
    pub prompt: String,
    /// Human-readable description of what this node represents, used when
    /// this node appears as a candidate in a classification prompt.
    pub description: String,
    pub edges: Edges,
}

impl Node {
    /// Find a choice option by id. Structural failure if this node has no
    /// choices or the id is unknown.
    pub fn choice(&self, choice_id: &str) -> Result<&ChoiceOption, StructuralError> {
        let Edges::Choices { options } = &self.edges else {
            return Err(StructuralError::UnknownChoice {
                node: self.id.clone(),
                choice: choice_id.to_string(),
            });
        };
        options
            .iter()
            .find(|o| o.id == choice_id)
            .ok_or_else(|| StructuralError::UnknownChoice {
                node: self.id.clone(),
                choice: choice_id.to_string(),
            })
    }
}

/// Descriptive attributes of a terminal profile. Read-only reference data.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalProfile {
    pub id: String,
    /// Profile name, e.g. "Romantic Floral".
    pub profile: String,
    /// Character tag, e.g. "Sillage: Intimate".
    pub character: String,
}

/// Static directed graph of quiz nodes, validated at construction.
#[derive(Debug)]
pub struct QuizGraph {
    nodes: HashMap<String, Node>,
    profiles: HashMap<String, TerminalProfile>,
    entry: String,
}

impl QuizGraph {
    /// Build and validate a graph.
    ///
    /// Checks: unique node ids, a known entry node, every edge target
    /// exists, classification nodes carry exactly one direct edge, terminal
    /// nodes carry no edges and have profile attributes, finals candidates
    /// point at terminal nodes, and no edge set is empty.
    pub fn new(
        nodes: Vec<Node>,
        entry: &str,
        profiles: Vec<TerminalProfile>,
    ) -> Result<Self, GraphError> {
        let mut by_id: HashMap<String, Node> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if by_id.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode { id: node.id });
            }
            by_id.insert(node.id.clone(), node);
        }

        if !by_id.contains_key(entry) {
            return Err(GraphError::UnknownEntry {
                id: entry.to_string(),
            });
        }

        let profiles: HashMap<String, TerminalProfile> = profiles
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let exists = |node: &Node, target: &str| -> Result<(), GraphError> {
            if by_id.contains_key(target) {
                Ok(())
            } else {
                Err(GraphError::DanglingEdge {
                    node: node.id.clone(),
                    target: target.to_string(),
                })
            }
        };

        for node in by_id.values() {
            match (&node.kind, &node.edges) {
                (NodeKind::Classification, Edges::Direct { next }) => exists(node, next)?,
                (NodeKind::Classification, _) => {
                    return Err(GraphError::BadClassificationNode {
                        id: node.id.clone(),
                    });
                }
                (NodeKind::Terminal, Edges::None) => {
                    if !profiles.contains_key(&node.id) {
                        return Err(GraphError::MissingProfile {
                            id: node.id.clone(),
                        });
                    }
                }
                (NodeKind::Terminal, _) => {
                    return Err(GraphError::TerminalWithEdges {
                        id: node.id.clone(),
                    });
                }
                (_, Edges::Direct { next }) => exists(node, next)?,
                (_, Edges::Branches { candidates }) => {
                    if candidates.is_empty() {
                        return Err(GraphError::EmptyEdgeSet {
                            node: node.id.clone(),
                            what: "branches".to_string(),
                        });
                    }
                    for target in candidates {
                        exists(node, target)?;
                    }
                }
                (_, Edges::Choices { options }) => {
                    if options.is_empty() {
                        return Err(GraphError::EmptyEdgeSet {
                            node: node.id.clone(),
                            what: "choices".to_string(),
                        });
                    }
                    for option in options {
                        exists(node, &option.next)?;
                    }
                }
                (_, Edges::Finals { candidates }) => {
                    if candidates.is_empty() {
                        return Err(GraphError::EmptyEdgeSet {
                            node: node.id.clone(),
                            what: "finals".to_string(),
                        });
                    }
                    for target in candidates {
                        exists(node, target)?;
                        if by_id[target].kind != NodeKind::Terminal {
                            return Err(GraphError::FinalsNotTerminal {
                                node: node.id.clone(),
                                target: target.to_string(),
                            });
                        }
                    }
                }
                (_, Edges::None) => {
                    return Err(GraphError::EmptyEdgeSet {
                        node: node.id.clone(),
                        what: "edges".to_string(),
                    });
                }
            }
        }

        Ok(Self {
            nodes: by_id,
            profiles,
            entry: entry.to_string(),
        })
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Result<&Node, StructuralError> {
        self.nodes
            .get(id)
            .ok_or_else(|| StructuralError::UnknownNode { id: id.to_string() })
    }

    /// Id of the entry node.
    pub fn entry_id(&self) -> &str {
        &self.entry
    }

    /// The entry node itself.
    pub fn entry(&self) -> &Node {
        &self.nodes[&self.entry]
    }

    /// Look up the profile attributes of a terminal node.
    pub fn profile(&self, id: &str) -> Result<&TerminalProfile, StructuralError> {
        self.profiles
            .get(id)
            .ok_or_else(|| StructuralError::UnknownProfile { id: id.to_string() })
    }

    /// Description of a node for use in classification prompts. Falls back
    /// to the id when the node is unknown or has no description.
    pub fn describe<'a>(&'a self, id: &'a str) -> &'a str {
        match self.nodes.get(id) {
            Some(node) if !node.description.is_empty() => &node.description,
            _ => id,
        }
    }
}
