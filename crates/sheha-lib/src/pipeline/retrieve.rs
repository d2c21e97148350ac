use anyhow::Context;
use tracing::debug;

use crate::corpus::KnowledgeBase;
use crate::embedding::Embed;

/// Return the answer of the corpus row closest to `query`, or `None` when the
/// knowledge base is empty.
///
/// The query goes through the same embedder the corpus was built with. A
/// vector of the wrong dimension is an error, not a miss.
pub fn retrieve<'kb, E: Embed + ?Sized>(
    embedder: &mut E,
    query: &str,
    kb: &'kb KnowledgeBase,
) -> anyhow::Result<Option<&'kb str>> {
    if kb.index().is_empty() {
        debug!("Knowledge base is empty, skipping retrieval");
        return Ok(None);
    }

    let query_vector = embedder
        .embed_batch(&[query])?
        .into_iter()
        .next()
        .context("embedder returned no vector for the query")?;

    let nearest = kb
        .index()
        .search(&query_vector, 1)
        .context("query embedding does not match the corpus index")?;

    let Some(hit) = nearest.first() else {
        return Ok(None);
    };
    let row = kb.corpus().get(hit.position);
    debug!(
        position = hit.position,
        distance = hit.distance,
        question = row.map(|r| r.question.as_str()),
        "Nearest corpus row"
    );
    Ok(row.map(|r| r.answer.as_str()))
}
