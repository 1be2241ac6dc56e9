//! Built-in sample prompts and the demo response table.
//!
//! The library is immutable and process-wide: categorized sample prompts
//! feed the random-sample trigger, and an ordered table of literal prompts
//! with precomputed results backs the demo (substitute) mode.

use crate::analysis::AnalysisResult;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// A named, ordered group of sample prompts.
#[derive(Debug, Clone)]
pub struct SampleCategory {
    pub name: String,
    pub prompts: Vec<String>,
}

/// A literal prompt with a precomputed analysis, used in demo mode.
#[derive(Debug, Clone)]
pub struct DemoEntry {
    pub prompt: String,
    pub result: AnalysisResult,
}

/// The immutable sample-prompt library.
///
/// Demo-table iteration order is insertion order; the first matching entry
/// wins a lookup.
#[derive(Debug, Clone)]
pub struct SampleLibrary {
    categories: Vec<SampleCategory>,
    demo_entries: Vec<DemoEntry>,
}

impl SampleLibrary {
    pub fn new(categories: Vec<SampleCategory>, demo_entries: Vec<DemoEntry>) -> Self {
        Self {
            categories,
            demo_entries,
        }
    }

    /// Returns the process-wide built-in library.
    pub fn builtin() -> &'static SampleLibrary {
        &BUILTIN
    }

    pub fn categories(&self) -> &[SampleCategory] {
        &self.categories
    }

    pub fn demo_entries(&self) -> &[DemoEntry] {
        &self.demo_entries
    }

    /// Looks up the demo table by case-insensitive substring match in
    /// either direction: a stored prompt contained in the input, or the
    /// input contained in a stored prompt. First match wins.
    pub fn demo_lookup(&self, input: &str) -> Option<&AnalysisResult> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.demo_entries
            .iter()
            .find(|entry| {
                let stored = entry.prompt.to_lowercase();
                needle.contains(&stored) || stored.contains(&needle)
            })
            .map(|entry| &entry.result)
    }

    /// Flattens every category into one ordered prompt list. When
    /// `include_demo_keys` is set, demo-table prompts not already present
    /// are appended.
    pub fn all_prompts(&self, include_demo_keys: bool) -> Vec<&str> {
        let mut prompts: Vec<&str> = self
            .categories
            .iter()
            .flat_map(|category| category.prompts.iter().map(String::as_str))
            .collect();

        if include_demo_keys {
            for entry in &self.demo_entries {
                if !prompts.contains(&entry.prompt.as_str()) {
                    prompts.push(entry.prompt.as_str());
                }
            }
        }

        prompts
    }

    /// Uniformly selects one prompt from the flattened list.
    pub fn random_prompt(&self, include_demo_keys: bool) -> Option<&str> {
        self.all_prompts(include_demo_keys)
            .choose(&mut rand::thread_rng())
            .copied()
    }
}

static BUILTIN: Lazy<SampleLibrary> =
    Lazy::new(|| SampleLibrary::new(builtin_categories(), builtin_demo_entries()));

fn category(name: &str, prompts: &[&str]) -> SampleCategory {
    SampleCategory {
        name: name.to_string(),
        prompts: prompts.iter().map(|p| p.to_string()).collect(),
    }
}

fn builtin_categories() -> Vec<SampleCategory> {
    vec![
        category(
            "Personal Growth",
            &[
                "I'm feeling overwhelmed with my workload and don't know how to prioritize my tasks.",
                "I received constructive feedback at work and I'm unsure how to implement the changes.",
                "How do I stop procrastinating and stay focused while working from home?",
                "I'm trying to learn a new skill but I keep getting frustrated with my progress.",
            ],
        ),
        category(
            "Relationships",
            &[
                "I had a disagreement with my friend and I'm not sure how to approach them about it.",
                "I want to have a difficult conversation with my family about boundaries.",
                "What are some emotionally intelligent ways to handle passive-aggressive coworkers?",
                "Can you help me come up with a unique birthday message for my best friend?",
            ],
        ),
        category(
            "Career & Goals",
            &[
                "I just got a promotion at work and I'm excited but also nervous about the new responsibilities.",
                "I'm considering a career change but I'm worried about the financial implications.",
                "Help me write a professional but friendly follow-up email after a job interview.",
                "Suggest a few side hustle ideas for someone good at writing and tech.",
            ],
        ),
        category(
            "Health & Lifestyle",
            &[
                "I'm struggling to find motivation to exercise regularly and stay healthy.",
                "What are some high-protein vegetarian foods I can add to my diet?",
                "Give me a 3-day meal plan for healthy weight loss with Indian vegetarian recipes.",
                "Why do I get muscle soreness two days after a workout instead of the next day?",
            ],
        ),
        category(
            "Creative & Learning",
            &[
                "Explain the concept of transformers in AI in simple, beginner-friendly terms.",
                "Can you generate some creative Instagram captions for travel photos?",
                "I just moved to a new city and I'm feeling lonely and disconnected.",
                "I'm planning a surprise party for my partner and I want everything to be perfect.",
            ],
        ),
    ]
}

fn emotions(pairs: &[(&str, f32)]) -> Option<BTreeMap<String, f32>> {
    Some(
        pairs
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect(),
    )
}

fn traits(labels: &[&str]) -> Option<BTreeMap<String, bool>> {
    Some(labels.iter().map(|label| (label.to_string(), true)).collect())
}

fn entry(prompt: &str, result: AnalysisResult) -> DemoEntry {
    DemoEntry {
        prompt: prompt.to_string(),
        result,
    }
}

fn builtin_demo_entries() -> Vec<DemoEntry> {
    vec![
        entry(
            "I just got a promotion at work and I'm excited but also nervous about the new responsibilities.",
            AnalysisResult {
                input_tags: emotions(&[("excited", 0.82), ("nervous", 0.64), ("proud", 0.51)]),
                response_tags: traits(&["confident_mentor", "encouraging", "celebratory"]),
                final_prompt: Some(
                    "Respond as a confident mentor. Celebrate the promotion warmly, then steady the nerves: name one or two concrete habits that help a new leader grow into bigger responsibilities."
                        .to_string(),
                ),
                response_text: Some(
                    "Congratulations - a promotion is real recognition of the work you've already put in. The nerves you feel are a sign you take the new role seriously, not a sign you aren't ready. Start small: meet your team one-on-one in the first weeks, and keep a short list of what only you can decide. The rest you can delegate, and you'll grow into the role faster than you expect."
                        .to_string(),
                ),
            },
        ),
        entry(
            "I'm feeling overwhelmed with my workload and don't know how to prioritize my tasks.",
            AnalysisResult {
                input_tags: emotions(&[("overwhelmed", 0.87), ("anxious", 0.58), ("determined", 0.33)]),
                response_tags: traits(&["calm_coach", "structured", "reassuring"]),
                final_prompt: Some(
                    "Respond as a calm, structured coach. Acknowledge the overload first, then offer one simple prioritization method the reader can apply today."
                        .to_string(),
                ),
                response_text: Some(
                    "When everything feels urgent, nothing is. Take ten minutes and write every task down, then mark the two that would cause real trouble if they slipped this week. Those two are today's work; everything else is a list, not a weight. You don't need a perfect system - you need one honest pass over the pile."
                        .to_string(),
                ),
            },
        ),
        entry(
            "I had a disagreement with my friend and I'm not sure how to approach them about it.",
            AnalysisResult {
                input_tags: emotions(&[("conflicted", 0.72), ("hurt", 0.61), ("hopeful", 0.35)]),
                response_tags: traits(&["empathetic_listener", "diplomatic", "warm"]),
                final_prompt: Some(
                    "Respond as an empathetic, diplomatic listener. Validate the discomfort, then suggest a gentle opening line for restarting the conversation."
                        .to_string(),
                ),
                response_text: Some(
                    "It says something good about the friendship that this is still on your mind. Reach out without relitigating the argument: \"I didn't like how we left things, and our friendship matters more to me than being right.\" Most disagreements soften the moment one person shows they want the relationship more than the win."
                        .to_string(),
                ),
            },
        ),
        entry(
            "I just moved to a new city and I'm feeling lonely and disconnected.",
            AnalysisResult {
                input_tags: emotions(&[("lonely", 0.84), ("anxious", 0.46), ("hopeful", 0.41)]),
                response_tags: traits(&["gentle_companion", "encouraging", "practical"]),
                final_prompt: Some(
                    "Respond as a gentle, encouraging companion. Normalize the loneliness of relocation and offer one low-pressure way to start building connection."
                        .to_string(),
                ),
                response_text: Some(
                    "Loneliness after a move is almost universal, even for people who chose the move happily. Connection rebuilds through repetition, not grand gestures: pick one place - a gym class, a cafe, a weekly meetup - and just keep showing up. Familiar faces turn into friendly ones faster than you'd think."
                        .to_string(),
                ),
            },
        ),
        entry(
            "I'm about to give my first conference talk and my hands won't stop shaking.",
            AnalysisResult {
                input_tags: emotions(&[("nervous", 0.88), ("excited", 0.47), ("self_doubt", 0.42)]),
                response_tags: traits(&["steady_coach", "reassuring", "energizing"]),
                final_prompt: Some(
                    "Respond as a steady, reassuring coach. Reframe the adrenaline as readiness and give one concrete grounding technique to use right before walking on stage."
                        .to_string(),
                ),
                response_text: Some(
                    "Shaking hands mean your body has already mobilized all the energy the talk needs - the only question is where it goes. Right before you walk out, plant both feet, take one slow breath out, and say your first sentence in your head. The first thirty seconds are the hardest; you've rehearsed those. After that, the talk carries you."
                        .to_string(),
                ),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let library = SampleLibrary::builtin();
        assert_eq!(library.categories().len(), 5);
        for category in library.categories() {
            assert_eq!(category.prompts.len(), 4);
        }
        assert_eq!(library.demo_entries().len(), 5);
    }

    #[test]
    fn test_every_demo_key_is_retrievable() {
        let library = SampleLibrary::builtin();
        for entry in library.demo_entries() {
            let found = library.demo_lookup(&entry.prompt);
            assert_eq!(found, Some(&entry.result), "missed key: {}", entry.prompt);
        }
    }

    #[test]
    fn test_lookup_matches_in_both_directions() {
        let library = SampleLibrary::builtin();

        // Stored prompt contained in a longer input
        let long_input = format!(
            "So here's the thing: {} What should I do?",
            "I just moved to a new city and I'm feeling lonely and disconnected."
        );
        assert!(library.demo_lookup(&long_input).is_some());

        // Input that is a fragment of a stored prompt
        let fragment = "promotion at work and I'm excited";
        let result = library.demo_lookup(fragment).expect("fragment should match");
        assert_eq!(
            result.active_traits(),
            vec!["celebratory", "confident_mentor", "encouraging"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let library = SampleLibrary::builtin();
        assert!(
            library
                .demo_lookup("I JUST GOT A PROMOTION AT WORK AND I'M EXCITED BUT ALSO NERVOUS ABOUT THE NEW RESPONSIBILITIES.")
                .is_some()
        );
    }

    #[test]
    fn test_first_match_wins_in_table_order() {
        let library = SampleLibrary::builtin();
        let first = &library.demo_entries()[0];
        let second = &library.demo_entries()[1];

        let combined = format!("{} {}", first.prompt, second.prompt);
        assert_eq!(library.demo_lookup(&combined), Some(&first.result));
    }

    #[test]
    fn test_unmatched_input_returns_none() {
        let library = SampleLibrary::builtin();
        assert!(library.demo_lookup("completely unrelated input text").is_none());
        assert!(library.demo_lookup("   ").is_none());
    }

    #[test]
    fn test_all_prompts_flattening() {
        let library = SampleLibrary::builtin();
        assert_eq!(library.all_prompts(false).len(), 20);

        // Four demo prompts duplicate category prompts; one is novel.
        assert_eq!(library.all_prompts(true).len(), 21);
    }

    #[test]
    fn test_random_prompt_draws_from_the_list() {
        let library = SampleLibrary::builtin();
        let all = library.all_prompts(true);
        for _ in 0..16 {
            let prompt = library.random_prompt(true).expect("non-empty library");
            assert!(all.contains(&prompt));
        }
    }
}
