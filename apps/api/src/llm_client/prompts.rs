// Shared prompt fragments. Each feature module keeps its own prompts.rs alongside it;
// this file only holds cross-cutting instructions.

/// Appended to every prompt that expects a structured record back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Tone instruction shared by the coaching-style prompts.
pub const COACH_TONE_INSTRUCTION: &str = "\
    Be constructive, specific and encouraging. \
    Base every recommendation on the skills and goals provided; do not invent experience.";
