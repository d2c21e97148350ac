use std::path::PathBuf;

/// Return the embedding model cache directory for tests.
///
/// Checks `SHEHA_MODEL_DIR` first, falling back to `~/.sheha/models/`.
pub fn model_dir() -> PathBuf {
    std::env::var("SHEHA_MODEL_DIR").map_or_else(
        |_| {
            dirs::home_dir()
                .expect("home dir")
                .join(".sheha")
                .join("models")
        },
        PathBuf::from,
    )
}
