use sheha_lib::llm::settings::GeminiSettings;
use sheha_lib::runtime::Runtime;

/// Create a [`Runtime`] rooted in a tempdir with no Gemini API key.
///
/// The dataset and model paths point inside the tempdir but nothing is
/// written there. The caller must hold the returned [`tempfile::TempDir`].
pub fn runtime_without_api_key() -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let runtime = Runtime {
        dataset_path: tmp.path().join("qa.csv"),
        model_cache_dir: tmp.path().join("models"),
        gemini: GeminiSettings::default(),
    };
    (tmp, runtime)
}
