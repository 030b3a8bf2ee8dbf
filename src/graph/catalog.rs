//! The fragrance discovery content graph.
//!
//! Declarative data only — the routing logic lives in the classifier and
//! orchestrator. Descriptions double as the human-readable candidate text
//! embedded into classification prompts, so content edits here change what
//! the remote model sees without touching code.

use super::{ChoiceOption, Edges, Node, NodeKind, QuizGraph, TerminalProfile};
use crate::error::GraphError;

fn text(id: &str, prompt: &str, edges: Edges) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Text,
        prompt: prompt.to_string(),
        description: String::new(),
        edges,
    }
}

fn image(id: &str, prompt: &str, options: Vec<ChoiceOption>) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Image,
        prompt: prompt.to_string(),
        description: String::new(),
        edges: Edges::Choices { options },
    }
}

fn classify(id: &str, description: &str, next: &str) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Classification,
        prompt: String::new(),
        description: description.to_string(),
        edges: Edges::Direct {
            next: next.to_string(),
        },
    }
}

fn terminal(id: &str, description: &str) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Terminal,
        prompt: String::new(),
        description: description.to_string(),
        edges: Edges::None,
    }
}

fn branches(candidates: &[&str]) -> Edges {
    Edges::Branches {
        candidates: candidates.iter().map(|s| s.to_string()).collect(),
    }
}

fn finals(candidates: &[&str]) -> Edges {
    Edges::Finals {
        candidates: candidates.iter().map(|s| s.to_string()).collect(),
    }
}

fn direct(next: &str) -> Edges {
    Edges::Direct {
        next: next.to_string(),
    }
}

fn option(id: &str, caption: &str, answer: &str, next: &str) -> ChoiceOption {
    ChoiceOption {
        id: id.to_string(),
        caption: caption.to_string(),
        answer: answer.to_string(),
        next: next.to_string(),
    }
}

fn profile(id: &str, name: &str, character: &str) -> TerminalProfile {
    TerminalProfile {
        id: id.to_string(),
        profile: name.to_string(),
        character: character.to_string(),
    }
}

/// Build the fragrance discovery graph: one entry question, five
/// personality paths, and twelve terminal profiles.
pub fn fragrance_graph() -> Result<QuizGraph, GraphError> {
    let nodes = vec![
        text(
            "Q1",
            "What feeling or core memory do you want your fragrance to evoke?",
            branches(&[
                "PathA_Choice",
                "PathB_Choice",
                "PathC_Choice",
                "PathD_Choice",
                "PathE_Choice",
            ]),
        ),
        // Path A — Sensual & Romantic
        classify(
            "PathA_Choice",
            "Sensual & Romantic - for users who want intimate, romantic, sensual fragrances",
            "Q_A2",
        ),
        text(
            "Q_A2",
            "Where does this connection happen? Paint a picture of the scene...",
            branches(&["A2_1_Elegant", "A2_2_Cozy", "A2_3_Adventure"]),
        ),
        classify(
            "A2_1_Elegant",
            "Elegant Evening - sophisticated, formal romantic settings",
            "Q_A2_1_3_Image",
        ),
        classify(
            "A2_2_Cozy",
            "Cozy Intimacy - comfortable, intimate, personal settings",
            "Q_A2_1_3_Image",
        ),
        classify(
            "A2_3_Adventure",
            "Adventurous Escape - exciting, spontaneous romantic moments",
            "Q_A2_1_3_Image",
        ),
        image(
            "Q_A2_1_3_Image",
            "Which of these captures the essence?",
            vec![
                option(
                    "ImageA1_Floral",
                    "Lush Florals (Rose, Gardenia)",
                    "The scent of blooming roses and gardenias in a moonlit garden",
                    "Q_A2_1_1_4",
                ),
                option(
                    "ImageA2_Gourmand",
                    "Decadent Dessert (Vanilla, Spice)",
                    "The warm sweetness of vanilla and exotic spices",
                    "Q_A2_1_1_4",
                ),
                option(
                    "ImageA3_Woody",
                    "Old Library (Wood, Leather)",
                    "The rich scent of aged wood and leather-bound books",
                    "Q_A2_1_1_4",
                ),
            ],
        ),
        text(
            "Q_A2_1_1_4",
            "Whisper or Statement?",
            finals(&["Final_A_1", "Final_A_2", "Final_A_3"]),
        ),
        // Path B — Confident & Bold
        classify(
            "PathB_Choice",
            "Confident & Bold - for users who want powerful, assertive, commanding fragrances",
            "Q_B2",
        ),
        text(
            "Q_B2",
            "When you feel this powerful, what is the setting?",
            branches(&["B2_1_Pro", "B2_2_Social", "B2_3_Personal"]),
        ),
        classify(
            "B2_1_Pro",
            "Professional / Boardroom - workplace confidence and authority",
            "Q_B2_1_3_Image",
        ),
        classify(
            "B2_2_Social",
            "Social Event / Gala - social confidence and charisma",
            "Q_B2_1_3_Image",
        ),
        classify(
            "B2_3_Personal",
            "Personal Triumph / Solo - individual achievement and self-assurance",
            "Q_B2_1_3_Image",
        ),
        image(
            "Q_B2_1_3_Image",
            "Which of these best represents your style of confidence?",
            vec![
                option(
                    "ImageB1_Citrus",
                    "Sharp Architecture (Citrus, Aromatic, Clean)",
                    "The crisp clarity of citrus and clean architectural lines",
                    "Q_B2_1_1_4",
                ),
                option(
                    "ImageB2_Leather",
                    "Luxury Car Interior (Leather, Saffron, Spice)",
                    "The luxurious scent of leather, saffron and warm spices",
                    "Q_B2_1_1_4",
                ),
                option(
                    "ImageB3_Smoky",
                    "Grand Fireplace (Smoky, Woody, Incense)",
                    "The smoky warmth of wood and sacred incense",
                    "Q_B2_1_1_4",
                ),
            ],
        ),
        text(
            "Q_B2_1_1_4",
            "How do you project this confidence?",
            finals(&["Final_B_1", "Final_B_2", "Final_B_3"]),
        ),
        // Path C — Calm & Grounded
        classify(
            "PathC_Choice",
            "Calm & Grounded - for users who want peaceful, natural, balanced fragrances",
            "Q_C2",
        ),
        text(
            "Q_C2",
            "Describe your perfect place of peace. Your personal sanctuary.",
            branches(&["C2_1_Nature", "C2_2_CozyHome", "C2_3_ByWater"]),
        ),
        classify(
            "C2_1_Nature",
            "A walk in nature / Forest - natural, outdoorsy peace",
            "Q_C2_1_3_Choice",
        ),
        classify(
            "C2_2_CozyHome",
            "A quiet corner of my home - domestic, comfortable tranquility",
            "Q_C2_1_3_Choice",
        ),
        classify(
            "C2_3_ByWater",
            "Near the ocean or a lake - water-based serenity",
            "Q_C2_1_3_Choice",
        ),
        text(
            "Q_C2_1_3_Choice",
            "Which scent brings you the most comfort?",
            direct("Q_C2_1_1_4"),
        ),
        text(
            "Q_C2_1_1_4",
            "Is this a moment of solitary peace or shared warmth?",
            finals(&["Final_C_1", "Final_C_2"]),
        ),
        // Path D — Joyful & Playful
        classify(
            "PathD_Choice",
            "Joyful & Playful - for users who want happy, fun, energetic fragrances",
            "Q_D2",
        ),
        image(
            "Q_D2",
            "What does this moment of pure joy look like?",
            vec![
                option(
                    "ImageD1_Fruity",
                    "A vibrant fruit market (Fruity)",
                    "The vibrant energy of a colorful fruit market with fresh, juicy scents",
                    "Q_D2_1_3_Choice",
                ),
                option(
                    "ImageD2_Sweet",
                    "A colorful candy store (Gourmand / Sweet)",
                    "The playful sweetness of a whimsical candy wonderland",
                    "Q_D2_1_3_Choice",
                ),
                option(
                    "ImageD3_Tropical",
                    "A sun-drenched beach (Tropical / Coconut)",
                    "The tropical bliss of sun-warmed skin and coconut breeze",
                    "Q_D2_1_3_Choice",
                ),
            ],
        ),
        text(
            "Q_D2_1_3_Choice",
            "What kind of sweetness comes to mind?",
            direct("Q_D2_1_1_4"),
        ),
        text(
            "Q_D2_1_1_4",
            "Is this a burst of vibrant energy or a soft, happy glow?",
            finals(&["Final_D_1", "Final_D_2"]),
        ),
        // Path E — Mysterious & Unique
        classify(
            "PathE_Choice",
            "Mysterious & Unique - for users who want unusual, complex, intriguing fragrances",
            "Q_E2",
        ),
        text(
            "Q_E2",
            "If your scent was a secret, what kind of secret would it be?",
            branches(&["E2_1_Intellect", "E2_2_Forbidden", "E2_3_Whimsical"]),
        ),
        classify(
            "E2_1_Intellect",
            "An intellectual secret / Ancient knowledge - scholarly, mysterious wisdom",
            "Q_E2_1_3_Image",
        ),
        classify(
            "E2_2_Forbidden",
            "A forbidden, dark secret - edgy, dangerous intrigue",
            "Q_E2_1_3_Image",
        ),
        classify(
            "E2_3_Whimsical",
            "A whimsical, magical secret - playful, fantastical mystery",
            "Q_E2_1_3_Image",
        ),
        image(
            "Q_E2_1_3_Image",
            "Which of these forgotten places holds the secret?",
            vec![
                option(
                    "ImageE1_Incense",
                    "An old grimoire (Incense, Papyrus)",
                    "The ancient wisdom of incense and aged papyrus",
                    "Q_E2_1_1_4",
                ),
                option(
                    "ImageE2_Mineral",
                    "A rain-slicked neon street (Ozonic, Mineral)",
                    "The electric mystery of rain-soaked city nights",
                    "Q_E2_1_1_4",
                ),
                option(
                    "ImageE3_Exotic",
                    "A forgotten jungle temple (Exotic Florals, Spice)",
                    "The exotic allure of forgotten temple gardens",
                    "Q_E2_1_1_4",
                ),
            ],
        ),
        text(
            "Q_E2_1_1_4",
            "Does this scent invite others closer, or keep them guessing?",
            finals(&["Final_E_1", "Final_E_2"]),
        ),
        // Terminal profiles
        terminal(
            "Final_A_1",
            "Romantic Floral with Intimate Sillage - soft, close-to-skin romantic scents",
        ),
        terminal(
            "Final_A_2",
            "Romantic Floral with Moderate Sillage - balanced romantic presence",
        ),
        terminal(
            "Final_A_3",
            "Romantic Floral with Strong Sillage - bold romantic statement",
        ),
        terminal(
            "Final_B_1",
            "Bold Leather with Reserved Projection - subtle confident power",
        ),
        terminal(
            "Final_B_2",
            "Bold Leather with Assertive Projection - noticeable confident presence",
        ),
        terminal(
            "Final_B_3",
            "Bold Leather with Unmistakable Projection - commanding confident aura",
        ),
        terminal(
            "Final_C_1",
            "Clean & Musky with Solitary Character - personal peaceful moments",
        ),
        terminal(
            "Final_C_2",
            "Clean & Musky with Shared Character - peaceful connections with others",
        ),
        terminal(
            "Final_D_1",
            "Playful Gourmand with Vibrant Energy - energetic joyful presence",
        ),
        terminal(
            "Final_D_2",
            "Playful Gourmand with Gentle Glow - soft joyful warmth",
        ),
        terminal(
            "Final_E_1",
            "Unique Incense with Inviting Character - mysterious but approachable",
        ),
        terminal(
            "Final_E_2",
            "Unique Incense with Distant Character - mysterious and enigmatic",
        ),
    ];

    let profiles = vec![
        profile("Final_A_1", "Romantic Floral", "Sillage: Intimate"),
        profile("Final_A_2", "Romantic Floral", "Sillage: Moderate"),
        profile("Final_A_3", "Romantic Floral", "Sillage: Strong"),
        profile("Final_B_1", "Bold Leather", "Projection: Reserved"),
        profile("Final_B_2", "Bold Leather", "Projection: Assertive"),
        profile("Final_B_3", "Bold Leather", "Projection: Unmistakable"),
        profile("Final_C_1", "Clean & Musky", "Character: Solitary"),
        profile("Final_C_2", "Clean & Musky", "Character: Shared"),
        profile("Final_D_1", "Playful Gourmand", "Energy: Vibrant"),
        profile("Final_D_2", "Playful Gourmand", "Energy: Gentle Glow"),
        profile("Final_E_1", "Unique Incense", "Character: Inviting"),
        profile("Final_E_2", "Unique Incense", "Character: Distant"),
    ];

    QuizGraph::new(nodes, "Q1", profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds() {
        let graph = fragrance_graph().unwrap();
        assert_eq!(graph.entry_id(), "Q1");
    }

    #[test]
    fn entry_branches_are_classification_nodes() {
        let graph = fragrance_graph().unwrap();
        let Edges::Branches { candidates } = &graph.entry().edges else {
            panic!("entry should have branches");
        };
        assert_eq!(candidates.len(), 5);
        for id in candidates {
            let node = graph.get(id).unwrap();
            assert_eq!(node.kind, NodeKind::Classification, "{id}");
            assert!(!node.description.is_empty(), "{id} needs a description");
        }
    }

    #[test]
    fn all_final_profiles_registered() {
        let graph = fragrance_graph().unwrap();
        for id in [
            "Final_A_1", "Final_A_2", "Final_A_3", "Final_B_1", "Final_B_2", "Final_B_3",
            "Final_C_1", "Final_C_2", "Final_D_1", "Final_D_2", "Final_E_1", "Final_E_2",
        ] {
            assert_eq!(graph.get(id).unwrap().kind, NodeKind::Terminal);
            graph.profile(id).unwrap();
        }
    }

    #[test]
    fn image_choices_have_fixed_targets() {
        let graph = fragrance_graph().unwrap();
        let node = graph.get("Q_D2").unwrap();
        let choice = node.choice("ImageD2_Sweet").unwrap();
        assert_eq!(choice.next, "Q_D2_1_3_Choice");
    }
}
