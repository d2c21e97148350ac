pub mod error;
pub mod gemini;
pub mod settings;

use error::GenerateError;

/// Maps a prompt to generated text.
pub trait Generate {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

impl<G: Generate + ?Sized> Generate for &G {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate(prompt)
    }
}
