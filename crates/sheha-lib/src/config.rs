/// Embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIMENSION: usize = 384;

/// Subdirectory name under `model_cache_dir` for the all-MiniLM-L6-v2 files.
pub const MODEL_SUBDIR: &str = "all-MiniLM-L6-v2";

/// Dataset file looked up in the working directory when `SHEHA_DATASET` is unset.
pub const DEFAULT_DATASET: &str = "Amrutha_data.csv";

/// Column holding the question text in the dataset.
pub const QUESTION_COLUMN: &str = "question";

/// Column holding the answer text in the dataset.
pub const ANSWER_COLUMN: &str = "answer";

/// Gemini model used when `GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on a single `generateContent` round-trip.
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;

/// Label prefixed to every refined answer.
pub const REFINED_LABEL: &str = "*Sheha*";

/// Assistant text when retrieval finds no answer.
pub const FALLBACK_RESPONSE: &str = "*Amrutha*:\nI'm sorry, I don't have a specific answer for that.";

/// Persona instruction that opens every refinement prompt.
pub const PERSONA_INSTRUCTION: &str = "You are Shehanaz Shaik, a human AI Student. Respond to the following question in a friendly and conversational tone, maintaining your personal style and perspective.";

/// Title printed when an interactive chat starts.
pub const BANNER_TITLE: &str = "Perumalla Naga Vidya Amrutha Chatbot";

/// Subtitle printed under [`BANNER_TITLE`].
pub const BANNER_SUBTITLE: &str = "Ask me anything, and I'll respond as myself, Amrutha.";
