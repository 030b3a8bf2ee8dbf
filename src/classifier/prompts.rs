//! Prompt builders for the two remote classification calls.

use crate::session::AnsweredQuestion;

/// System prompt for per-answer routing.
pub const ROUTING_SYSTEM_PROMPT: &str = "You are an AI fragrance consultant who \
classifies user responses into personality-based fragrance categories. You must \
respond with ONLY the path ID, nothing else.";

/// System prompt for final-profile resolution.
pub const FINAL_SYSTEM_PROMPT: &str = "You are an expert fragrance consultant. \
Analyze the user's complete journey and select the most appropriate final \
fragrance profile. Respond with ONLY the profile ID.";

/// Build the routing prompt: question, raw answer, and each candidate id with
/// its human-readable description.
pub fn routing_prompt(question: &str, answer: &str, candidates: &[(String, String)]) -> String {
    let options = candidates
        .iter()
        .map(|(id, description)| format!("{id}: {description}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Question: \"{question}\"\n\
         User's Answer: \"{answer}\"\n\n\
         Available classification paths:\n\
         {options}\n\n\
         Based on the user's answer, which path best matches their personality \
         and preferences for fragrance?\n\n\
         Respond with ONLY the path ID (e.g., \"PathA_Choice\" or \"A2_1_Elegant\")."
    )
}

/// Build the final-resolution prompt from the full journey transcript.
pub fn final_prompt(history: &[AnsweredQuestion], candidates: &[(String, String)]) -> String {
    let journey = history
        .iter()
        .map(|qa| format!("Q: {}\nA: {}", qa.prompt, qa.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    let options = candidates
        .iter()
        .map(|(id, description)| format!("{id}: {description}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on this user's complete fragrance discovery journey, determine \
         their ideal fragrance profile:\n\n\
         {journey}\n\n\
         Available final profiles:\n\
         {options}\n\n\
         Which profile best matches this user's responses and personality? \
         Respond with ONLY the profile ID."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AnswerKind, AnsweredQuestion};

    #[test]
    fn routing_prompt_embeds_everything() {
        let candidates = vec![
            ("PathA_Choice".to_string(), "Sensual & Romantic".to_string()),
            ("PathC_Choice".to_string(), "Calm & Grounded".to_string()),
        ];
        let prompt = routing_prompt("What do you feel?", "calm by the sea", &candidates);
        assert!(prompt.contains("What do you feel?"));
        assert!(prompt.contains("calm by the sea"));
        assert!(prompt.contains("PathA_Choice: Sensual & Romantic"));
        assert!(prompt.contains("PathC_Choice: Calm & Grounded"));
        assert!(prompt.contains("ONLY the path ID"));
    }

    #[test]
    fn final_prompt_includes_journey_in_order() {
        let history = vec![
            AnsweredQuestion::text("Q1", "First question?", "first answer"),
            AnsweredQuestion::text("Q2", "Second question?", "second answer"),
        ];
        let candidates = vec![("Final_A_1".to_string(), "Romantic Floral".to_string())];
        let prompt = final_prompt(&history, &candidates);
        let first = prompt.find("first answer").unwrap();
        let second = prompt.find("second answer").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Final_A_1: Romantic Floral"));
        assert_eq!(history[0].kind, AnswerKind::Text);
    }
}
