//! Prompt construction for the completion endpoint.
//!
//! [`build_prompt`] is a pure transformation from a [`GenerationRequest`] to
//! the user prompt string: same inputs always yield a byte-identical prompt.
//! The formatting toggles are evaluated as an ordered rule list so the
//! fragment order never depends on evaluation incidentals.

use crate::model::{DetailLevel, FormattingOptions, GenerationRequest, Tone};

/// The fixed system message sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a professional and highly knowledgeable \
subject matter expert with excellent teaching skills. Format your responses with \
clear section headings and structure.";

const BASE_FORMAT_INSTRUCTION: &str =
    "Structure your response with clear sections: Introduction, Key Points, \
Detailed Explanation, Examples, and Summary. ";

/// Ordered (toggle, fragment) rules; fragments append in this exact order.
const FORMATTING_RULES: &[(fn(&FormattingOptions) -> bool, &str)] = &[
    (
        FormattingOptions::highlight_points,
        "Highlight key points by making them bold. ",
    ),
    (
        FormattingOptions::use_bullet_points,
        "Use bullet points for listing information. ",
    ),
    (
        FormattingOptions::add_examples,
        "Include practical examples where relevant. ",
    ),
    (
        FormattingOptions::add_summary,
        "End with a concise summary. ",
    ),
];

fn detail_instruction(level: DetailLevel) -> &'static str {
    match level {
        DetailLevel::Concise => {
            "Provide a clear and concise explanation with only the most essential \
             information. Use brief bullet points and keep it under 150 words."
        }
        DetailLevel::Balanced => {
            "Provide a well-structured explanation with key points, examples, and \
             a logical flow. Use headings and bullet points where appropriate. \
             Aim for 200-300 words."
        }
        DetailLevel::Detailed => {
            "Provide a comprehensive, in-depth explanation with multiple sections, \
             detailed examples, and thorough coverage of the topic. Aim for \
             300-400 words."
        }
    }
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => {
            "Use a professional, formal tone suitable for business or technical \
             documentation."
        }
        Tone::Academic => {
            "Use an academic, formal tone suitable for educational materials with \
             proper terminology."
        }
        Tone::ExplainLikeFive => {
            "Explain in very simple terms as if to a 5-year-old, using analogies \
             and simple language. Avoid jargon."
        }
        Tone::Enthusiastic => {
            "Use an enthusiastic, engaging tone that makes the topic exciting and \
             interesting."
        }
    }
}

/// Builds the user prompt for a single topic.
///
/// The prompt fixes five required section headings under a top-level title
/// heading so the layout engine can rely on the answer's structure.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let detail = detail_instruction(request.detail_level());
    let tone = tone_instruction(request.tone());

    let mut format_instruction = String::from(BASE_FORMAT_INSTRUCTION);
    for (enabled, fragment) in FORMATTING_RULES {
        if enabled(request.formatting()) {
            format_instruction.push_str(fragment);
        }
    }

    format!(
        "You are a subject matter expert and skilled educator. Create \
         comprehensive notes on the following topic. {detail} {tone}\n\n\
         {format_instruction}\n\n\
         Format your response using these exact section headings:\n\
         # [Topic Title]\n\
         ## Introduction\n\
         ## Key Points\n\
         ## Detailed Explanation\n\
         ## Examples\n\
         ## Summary\n\n\
         Topic: {topic}",
        topic = request.topic(),
    )
}
