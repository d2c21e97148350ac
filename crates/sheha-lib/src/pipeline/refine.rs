use tracing::warn;

use crate::config::PERSONA_INSTRUCTION;
use crate::llm::Generate;

/// Persona prompt asking the model to rephrase `retrieved` as a first-person answer to `query`.
pub fn build_prompt(query: &str, retrieved: &str) -> String {
    format!(
        "{PERSONA_INSTRUCTION}\n\
         Question: {query}\n\
         Retrieved Answer: {retrieved}\n\
         - Provide a detailed and accurate response, as you would naturally.\n\
         - Ensure the response is grammatically correct and engaging.\n\
         - Express your own opinions and experiences where relevant.\n"
    )
}

/// Rephrase `retrieved` in the persona's voice.
///
/// Generator failures come back as `"Error generating response: {error}"`
/// text instead of an `Err`, so the conversation carries on.
pub fn refine<G: Generate + ?Sized>(generator: &G, query: &str, retrieved: &str) -> String {
    let prompt = build_prompt(query, retrieved);
    match generator.generate(&prompt) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Refinement failed, returning error text");
            format!("Error generating response: {e}")
        }
    }
}
