// src/prompt.rs
// Fixed instruction template for persona synthesis.
//
// The field list is the whole output contract: the model is asked for these
// labels, and nothing downstream parses or enforces them. Format compliance
// is advisory only.

const PERSONA_INSTRUCTIONS: &str = "\
Analyze this Reddit user's activity and create a detailed persona:

Required Format:
- Name: [Creative nickname based on username]
- Age Range: [Estimated]
- Occupation: [Inferred from content]
- Personality: [3-5 traits]
- Key Interests: [Top 3 topics]
- Pain Points / Frustrations: [Any complaints or negative patterns?]
- Frequent Subreddits: [List]
- Behavioral Patterns: [Notable habits]
- Quote: [Most representative comment]
- Citations: [For each trait, mention the comment/post that supports it]";

/// Wrap the staged corpus verbatim in the persona instruction template.
pub fn build_persona_prompt(corpus_text: &str) -> String {
    format!("{PERSONA_INSTRUCTIONS}\n\nUser Activity:\n{corpus_text}")
}
