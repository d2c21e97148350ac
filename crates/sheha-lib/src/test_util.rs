//! Deterministic stand-ins for the embedding and generative providers.

use std::cell::RefCell;

use reqwest::StatusCode;

use crate::embedding::Embed;
use crate::llm::Generate;
use crate::llm::error::GenerateError;

/// URL reported by [`ScriptedGenerator::failing`] errors.
pub const FAKE_GEMINI_URL: &str = "https://gemini.test";

/// Bag-of-words embedder: each lowercase alphanumeric word adds 1.0 to the
/// bucket its FNV-1a hash selects. Identical texts give identical vectors.
pub struct HashEmbedder {
    dimension: usize,
    failure: Option<String>,
    batches: Vec<usize>,
}

impl HashEmbedder {
    pub const DEFAULT_DIMENSION: usize = 32;

    pub fn new() -> Self {
        Self::with_dimension(Self::DEFAULT_DIMENSION)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            failure: None,
            batches: Vec::new(),
        }
    }

    /// An embedder whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Sizes of the batches embedded so far, in call order.
    pub fn batches(&self) -> &[usize] {
        &self.batches
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimension];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = fnv1a(&word.to_lowercase()) % self.dimension as u64;
            vector[usize::try_from(bucket).unwrap_or_default()] += 1.0;
        }
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embed for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        self.batches.push(texts.len());
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

fn fnv1a(text: &str) -> u64 {
    text.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Generator that returns a canned reply (or error) and records every prompt.
pub struct ScriptedGenerator {
    reply: Result<String, String>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Every call fails with `503 Service Unavailable` and `snippet` as the body.
    pub fn failing(snippet: &str) -> Self {
        Self {
            reply: Err(snippet.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Generate for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(snippet) => Err(GenerateError::HttpStatus {
                status: StatusCode::SERVICE_UNAVAILABLE,
                url: FAKE_GEMINI_URL.to_string(),
                snippet: snippet.clone(),
            }),
        }
    }
}
