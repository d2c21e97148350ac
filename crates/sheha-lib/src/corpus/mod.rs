pub mod loader;

use anyhow::{Context, ensure};

use crate::embedding::Embed;
use crate::index::FlatL2Index;

/// One question/answer pair from the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub question: String,
    pub answer: String,
    /// `"Question: {question}\nAnswer: {answer}"`, the text that gets embedded.
    pub context: String,
}

impl CorpusRow {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into();
        let answer = answer.into();
        let context = format!("Question: {question}\nAnswer: {answer}");
        Self {
            question,
            answer,
            context,
        }
    }
}

/// The loaded dataset and its similarity index.
///
/// Row `i` of the corpus is position `i` of the index. Neither side can be
/// mutated after construction.
#[derive(Debug)]
pub struct KnowledgeBase {
    corpus: Vec<CorpusRow>,
    index: FlatL2Index,
}

impl KnowledgeBase {
    /// Embed every row's context in one batch and index the vectors in corpus order.
    ///
    /// An empty corpus produces an empty index without calling the embedder.
    pub fn build<E: Embed + ?Sized>(
        corpus: Vec<CorpusRow>,
        embedder: &mut E,
    ) -> anyhow::Result<Self> {
        let mut index = FlatL2Index::new(embedder.dimension());
        if !corpus.is_empty() {
            let contexts: Vec<&str> = corpus.iter().map(|row| row.context.as_str()).collect();
            let vectors = embedder.embed_batch(&contexts)?;
            ensure!(
                vectors.len() == corpus.len(),
                "embedder returned {} vectors for {} rows",
                vectors.len(),
                corpus.len()
            );
            index
                .add(&vectors)
                .context("corpus embeddings do not fit the index")?;
        }
        Ok(Self { corpus, index })
    }

    pub fn corpus(&self) -> &[CorpusRow] {
        &self.corpus
    }

    pub const fn index(&self) -> &FlatL2Index {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_joins_question_and_answer() {
        let row = CorpusRow::new("What is your name?", "Amrutha");
        assert_eq!(row.context, "Question: What is your name?\nAnswer: Amrutha");
    }

    #[test]
    fn context_keeps_empty_fields() {
        let row = CorpusRow::new("", "");
        assert_eq!(row.context, "Question: \nAnswer: ");
    }
}
