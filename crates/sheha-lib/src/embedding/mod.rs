pub mod embedder;

/// Maps text to fixed-length vectors.
///
/// Every vector returned by one implementation has length [`Embed::dimension`],
/// and the same text always maps to the same vector.
pub trait Embed {
    fn dimension(&self) -> usize;

    /// Embed `texts`, returning one vector per input in the same order.
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>>;
}

impl<E: Embed + ?Sized> Embed for &mut E {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}
