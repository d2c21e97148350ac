pub mod ask;
pub mod chat;
pub mod model;

use sheha_lib::corpus::KnowledgeBase;
use sheha_lib::corpus::loader::load;
use sheha_lib::embedding::embedder::Embedder;
use sheha_lib::llm::gemini::GeminiClient;
use sheha_lib::runtime::Runtime;
use tracing::info;

/// Everything a conversation needs, built once before the first turn.
pub struct Startup {
    pub generator: GeminiClient,
    pub embedder: Embedder,
    pub knowledge: KnowledgeBase,
}

/// Check the Gemini credentials, load the embedding model, then the dataset.
///
/// The credential check runs first so a missing API key is reported before
/// any expensive work.
pub fn start(runtime: &Runtime) -> anyhow::Result<Startup> {
    let generator = GeminiClient::new(&runtime.gemini)?;
    let mut embedder = Embedder::new(&runtime.model_cache_dir)?;
    let knowledge = load(&runtime.dataset_path, &mut embedder)?;

    info!(
        rows = knowledge.len(),
        model = generator.model(),
        "Chatbot ready"
    );
    Ok(Startup {
        generator,
        embedder,
        knowledge,
    })
}
