//! Instruction builders for the prompt-synthesis ladder.
//!
//! Each ladder tier speaks to the chat endpoint with its own
//! `(system, user)` instruction pair:
//! * **Primary** (`build_primary`) — detailed guidelines demanding a vivid,
//!   1–2 sentence scene description.
//! * **Fallback** (`build_fallback`) — shorter, more direct request used
//!   when the primary attempt failed or came back empty.
//!
//! The final tier never talks to the network at all: [`template_prompt`]
//! derives the prompt from the transcript by pure string formatting.

// ---------------------------------------------------------------------------
// System instructions
// ---------------------------------------------------------------------------

/// Primary tier — detailed guidelines for a visually concrete scene.
const PRIMARY_SYSTEM_INSTRUCTION: &str = "\
You are a creative assistant that transforms voice requests into detailed, \
concrete image generation prompts. Your task is CRITICAL: you MUST always return \
a non-empty, descriptive image prompt.

Guidelines:
- Focus purely on describing a visual scene, not dialogue or conversation
- Include specific details: subject, style, lighting, colors, composition, camera angle, and atmosphere
- Keep it concise but vivid (1-2 sentences)
- If the transcript is unclear, interpret it creatively and describe a reasonable visual scene
- NEVER return empty text, whitespace only, or just punctuation
- Your response must be a complete, usable image generation prompt

CRITICAL: You must ALWAYS return a non-empty prompt. Even if the transcript is unclear, \
create a descriptive visual prompt based on your best interpretation.";

/// Fallback tier — simpler and more direct.
const FALLBACK_SYSTEM_INSTRUCTION: &str = "\
You are an image prompt generator. Transform the given text into a visual description. \
Always return a descriptive image prompt, even if the input is unclear. \
Make it creative and detailed.";

// ---------------------------------------------------------------------------
// Instruction-pair builders
// ---------------------------------------------------------------------------

/// Build the **(system, user)** pair for the primary attempt.
pub fn build_primary(transcript: &str) -> (String, String) {
    let user = format!(
        "User voice transcript:\n\"{transcript}\"\n\n\
         Transform this into a single, self-contained image generation prompt that \
         captures the user's intent as a visual scene. Return ONLY the prompt text, \
         nothing else. Make it detailed and visually descriptive."
    );
    (PRIMARY_SYSTEM_INSTRUCTION.to_string(), user)
}

/// Build the **(system, user)** pair for the simplified fallback attempt.
pub fn build_fallback(transcript: &str) -> (String, String) {
    let user = format!(
        "Create an image generation prompt from this text: \"{transcript}\"\n\n\
         Return a detailed visual description suitable for image generation. \
         Include subject, style, and visual details."
    );
    (FALLBACK_SYSTEM_INSTRUCTION.to_string(), user)
}

/// Derive a prompt from the transcript by pure string formatting.
///
/// This is the ladder's final tier: no I/O, no failure mode.  The transcript
/// is trimmed before being embedded so padded input cannot leak whitespace
/// into the prompt.
pub fn template_prompt(transcript: &str) -> String {
    format!(
        "A detailed, artistic visualization of: {}. \
         High quality, vivid colors, professional composition, cinematic lighting.",
        transcript.trim()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
