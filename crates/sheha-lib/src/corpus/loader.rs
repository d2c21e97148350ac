use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::{CorpusRow, KnowledgeBase};
use crate::config::{ANSWER_COLUMN, QUESTION_COLUMN};
use crate::embedding::Embed;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Startup failures while building a [`KnowledgeBase`]. Each one is fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error(
        "dataset {} must contain 'question' and 'answer' columns (missing: {missing})",
        .path.display()
    )]
    Schema { path: PathBuf, missing: String },

    #[error("failed to load dataset {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    fn load(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Read the question/answer CSV at `path`, embed every row, and index the vectors.
///
/// Columns other than `question` and `answer` are ignored; empty cells read as
/// empty strings. Corpus order follows file order and matches index positions.
pub fn load<E: Embed + ?Sized>(path: &Path, embedder: &mut E) -> Result<KnowledgeBase, LoadError> {
    let corpus = read_corpus(path)?;
    debug!(path = %path.display(), rows = corpus.len(), "Dataset parsed");

    let kb = KnowledgeBase::build(corpus, embedder).map_err(|e| LoadError::load(path, e))?;

    info!(
        path = %path.display(),
        rows = kb.len(),
        dimension = kb.index().dimension(),
        "Knowledge base ready"
    );
    Ok(kb)
}

fn read_corpus(path: &Path) -> Result<Vec<CorpusRow>, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::load(path, e),
    })?;

    // Short rows are padded with empty cells; long rows are rejected below.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader.headers().map_err(|e| LoadError::load(path, e))?.clone();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let (question_col, answer_col) = match (column(QUESTION_COLUMN), column(ANSWER_COLUMN)) {
        (Some(q), Some(a)) => (q, a),
        (q, a) => {
            let missing: Vec<&str> = [(q, QUESTION_COLUMN), (a, ANSWER_COLUMN)]
                .into_iter()
                .filter_map(|(found, name)| found.is_none().then_some(name))
                .collect();
            return Err(LoadError::Schema {
                path: path.to_path_buf(),
                missing: missing.join(", "),
            });
        }
    };

    let mut corpus = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::load(path, e))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(LoadError::load(
                path,
                format!(
                    "line {line} has {} fields but the header has {}",
                    record.len(),
                    headers.len()
                ),
            ));
        }
        corpus.push(CorpusRow::new(
            record.get(question_col).unwrap_or_default(),
            record.get(answer_col).unwrap_or_default(),
        ));
    }
    Ok(corpus)
}
