//! AI-use tiers derived from the SHAPE total, with a growth path per tier.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Tool / Enhancer")]
    ToolEnhancer,
    Assistant,
    Augmentor,
    Cocreator,
}

/// Next-tier coaching attached to a full report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPath {
    pub title: String,
    pub summary: String,
    pub tactics: Vec<String>,
}

impl Classification {
    /// Tier bounds on the 0–100 total: 40 / 68 / 88.
    pub fn from_total(total: u32) -> Self {
        match total {
            0..=40 => Classification::ToolEnhancer,
            41..=68 => Classification::Assistant,
            69..=88 => Classification::Augmentor,
            _ => Classification::Cocreator,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::ToolEnhancer => "Tool / Enhancer",
            Classification::Assistant => "Assistant",
            Classification::Augmentor => "Augmentor",
            Classification::Cocreator => "Cocreator",
        }
    }

    pub fn growth_path(&self) -> GrowthPath {
        let (title, summary, tactics): (&str, &str, [&str; 3]) = match self {
            Classification::ToolEnhancer => (
                "Your Path to Assistant",
                "You're using AI for specific tasks. To grow, try giving the AI more open-ended problems to solve.",
                [
                    "Ask the AI for a full first draft instead of just a small piece.",
                    "Request multiple different versions or approaches to a problem.",
                    "Provide more context about your audience and goal in your initial prompt.",
                ],
            ),
            Classification::Assistant => (
                "Your Path to Augmentor",
                "You're good at refining AI output. To advance, focus on providing more strategic direction before the AI generates.",
                [
                    "Define a clear structure or outline for the AI to follow.",
                    "Ask the AI to critique its own work or identify weaknesses in its response.",
                    "Specify a clear tone, style, and voice for the AI to adopt.",
                ],
            ),
            Classification::Augmentor => (
                "Your Path to Cocreator",
                "You are effectively guiding the AI with strong strategic input. To reach the next level, push the AI to become a true thinking partner.",
                [
                    "Challenge the AI's assumptions by asking 'What are the flaws in this approach?'.",
                    "Use the AI for more creative, divergent thinking: 'Brainstorm three unconventional solutions.'",
                    "Delegate comparative analysis: 'How does this plan compare to successful examples in other fields?'",
                ],
            ),
            Classification::Cocreator => (
                "You are a Cocreator!",
                "You are operating at the highest level of human-AI collaboration, using the AI as a true strategic partner. Keep exploring the boundaries of what's possible.",
                [
                    "Continue to push the AI into novel domains and complex, multi-step reasoning tasks.",
                    "Experiment with having the AI adopt multiple expert personas to debate a topic.",
                    "Use the AI to synthesize information from completely different fields to spark innovation.",
                ],
            ),
        };
        GrowthPath {
            title: title.to_string(),
            summary: summary.to_string(),
            tactics: tactics.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
