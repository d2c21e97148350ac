use std::fs;
use std::path::Path;

use anyhow::Context;
use fastembed::{
    InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles, UserDefinedEmbeddingModel,
};
use tracing::debug;

use super::Embed;
use crate::config::{EMBEDDING_DIMENSION, MODEL_SUBDIR};

/// all-MiniLM-L6-v2 sentence embedder backed by fastembed's ONNX runtime.
pub struct Embedder {
    model: TextEmbedding,
}

impl Embedder {
    /// Load all-MiniLM-L6-v2 from `model_cache_dir/all-MiniLM-L6-v2/`.
    ///
    /// Expected files: `model.onnx`, `tokenizer.json`, `config.json`,
    /// `special_tokens_map.json`, `tokenizer_config.json`. When the ONNX file
    /// is missing the error tells the user to run `sheha model download`.
    pub fn new(model_cache_dir: &Path) -> anyhow::Result<Self> {
        let base = model_cache_dir.join(MODEL_SUBDIR);

        let onnx_bytes = fs::read(base.join("model.onnx")).with_context(|| {
            format!(
                "Embedding model not found at {}. Run 'sheha model download' first.",
                base.display()
            )
        })?;

        let read = |name: &str| {
            fs::read(base.join(name)).with_context(|| format!("Missing {name} in {}", base.display()))
        };
        let tokenizer_files = TokenizerFiles {
            tokenizer_file: read("tokenizer.json")?,
            config_file: read("config.json")?,
            special_tokens_map_file: read("special_tokens_map.json")?,
            tokenizer_config_file: read("tokenizer_config.json")?,
        };

        // Sentence-transformers pools MiniLM token states by mean, not CLS.
        let user_model =
            UserDefinedEmbeddingModel::new(onnx_bytes, tokenizer_files).with_pooling(Pooling::Mean);

        let model =
            TextEmbedding::try_new_from_user_defined(user_model, InitOptionsUserDefined::default())
                .context("Failed to initialize all-MiniLM-L6-v2")?;

        debug!(model_dir = %base.display(), "Embedding model loaded");
        Ok(Self { model })
    }
}

impl Embed for Embedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        let owned: Vec<String> = texts.iter().map(|s| (*s).to_string()).collect();
        self.model
            .embed(owned, None)
            .context("Failed to embed texts")
    }
}
