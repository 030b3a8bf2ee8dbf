//! Local keyword routing — the deterministic offline fallback.
//!
//! Pure functions over a declarative bucket table. Same input, same output,
//! every run; the quiz must route identically with zero connectivity.

/// A thematic keyword bucket mapped to branch/final id prefixes.
///
/// Content-specific and expected to change with the quiz content, so it is
/// data rather than inline logic.
pub struct KeywordBucket {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub branch_prefix: &'static str,
    pub final_prefix: &'static str,
}

/// Bucket priority order is fixed: romantic, bold, calm, joyful, mysterious.
/// The first bucket with any keyword present in the answer wins.
pub const BUCKETS: &[KeywordBucket] = &[
    KeywordBucket {
        name: "romantic",
        keywords: &["nostalgic", "memory", "romantic", "love", "date"],
        branch_prefix: "PathA_",
        final_prefix: "Final_A_",
    },
    KeywordBucket {
        name: "bold",
        keywords: &["confident", "bold", "power"],
        branch_prefix: "PathB_",
        final_prefix: "Final_B_",
    },
    KeywordBucket {
        name: "calm",
        keywords: &["calm", "peace", "nature"],
        branch_prefix: "PathC_",
        final_prefix: "Final_C_",
    },
    KeywordBucket {
        name: "joyful",
        keywords: &["happy", "fun", "joy"],
        branch_prefix: "PathD_",
        final_prefix: "Final_D_",
    },
    KeywordBucket {
        name: "mysterious",
        keywords: &["secret", "mystery", "dark", "unique"],
        branch_prefix: "PathE_",
        final_prefix: "Final_E_",
    },
];

fn matching_bucket(text: &str) -> Option<&'static KeywordBucket> {
    let lowered = text.to_lowercase();
    BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|k| lowered.contains(k)))
}

fn pick<'a>(candidates: &'a [String], prefix: &str) -> Option<&'a str> {
    candidates
        .iter()
        .find(|c| c.starts_with(prefix))
        .map(String::as_str)
}

/// Route a free-text answer to one of the candidate branch ids.
///
/// Falls back to the first candidate in declared order when no keyword
/// matches or no candidate carries the matched bucket's prefix.
pub fn route_branch<'a>(answer: &str, candidates: &'a [String]) -> &'a str {
    matching_bucket(answer)
        .and_then(|bucket| pick(candidates, bucket.branch_prefix))
        .unwrap_or(&candidates[0])
}

/// Route a whole journey (all answer text concatenated) to one of the final
/// candidate ids, with the same first-candidate fallback.
pub fn route_final<'a>(combined_answers: &str, candidates: &'a [String]) -> &'a str {
    matching_bucket(combined_answers)
        .and_then(|bucket| pick(candidates, bucket.final_prefix))
        .unwrap_or(&candidates[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<String> {
        ["PathA_Choice", "PathB_Choice", "PathC_Choice", "PathD_Choice", "PathE_Choice"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn calm_answer_routes_to_path_c() {
        let candidates = paths();
        assert_eq!(
            route_branch("I feel calm and at peace near the ocean", &candidates),
            "PathC_Choice"
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let candidates = paths();
        assert_eq!(route_branch("PURE JOY!", &candidates), "PathD_Choice");
    }

    #[test]
    fn priority_order_romantic_beats_mysterious() {
        let candidates = paths();
        // Both buckets match; romantic has higher priority.
        assert_eq!(
            route_branch("a secret love letter", &candidates),
            "PathA_Choice"
        );
    }

    #[test]
    fn no_keyword_falls_back_to_first_candidate() {
        let candidates = paths();
        assert_eq!(route_branch("beige wallpaper", &candidates), "PathA_Choice");
    }

    #[test]
    fn missing_prefix_falls_back_to_first_candidate() {
        let candidates: Vec<String> =
            vec!["B2_1_Pro".to_string(), "B2_2_Social".to_string()];
        // Calm bucket matches but no candidate has the PathC_ prefix.
        assert_eq!(route_branch("so peaceful", &candidates), "B2_1_Pro");
    }

    #[test]
    fn final_routing_uses_final_prefixes() {
        let candidates: Vec<String> = ["Final_B_1", "Final_B_2", "Final_B_3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            route_final("i felt bold and confident all day", &candidates),
            "Final_B_1"
        );
    }

    #[test]
    fn pure_function_repeated_calls_agree() {
        let candidates = paths();
        let first = route_branch("a dark mystery", &candidates).to_string();
        for _ in 0..100 {
            assert_eq!(route_branch("a dark mystery", &candidates), first);
        }
    }
}
