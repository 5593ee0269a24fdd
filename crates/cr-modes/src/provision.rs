//! Puzzle fetching with catalog fallback
//!
//! An empty answer from the source falls back to the built-in catalog; a
//! failed request is returned to the caller unchanged.

use crate::catalog;
use crate::error::ModeError;
use cr_store::{Difficulty, PuzzleSource, PuzzleSpec};

/// One random puzzle of `difficulty`
///
/// # Errors
/// [`ModeError::Store`] when the source fails.
pub async fn next_puzzle(
    source: &dyn PuzzleSource,
    difficulty: Difficulty,
) -> Result<PuzzleSpec, ModeError> {
    let mut found = source.random_puzzles(difficulty, 1).await?;
    Ok(found.pop().unwrap_or_else(|| {
        tracing::debug!(%difficulty, "source empty, using catalog puzzle");
        catalog::random_fallback(difficulty)
    }))
}

/// Up to `size` puzzles of `difficulty`
///
/// Never empty: the catalog backs an empty source.
///
/// # Errors
/// [`ModeError::Store`] when the source fails.
pub async fn next_batch(
    source: &dyn PuzzleSource,
    difficulty: Difficulty,
    size: usize,
) -> Result<Vec<PuzzleSpec>, ModeError> {
    let batch = source.random_puzzles(difficulty, size).await?;
    if !batch.is_empty() {
        return Ok(batch);
    }

    tracing::debug!(%difficulty, "source empty, using catalog batch");
    let mut fallback = catalog::shuffled_fallback(difficulty);
    fallback.truncate(size.max(1));
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cr_store::{MemoryStore, StoreError};

    #[tokio::test]
    async fn empty_source_uses_catalog() {
        let store = MemoryStore::new();
        let puzzle = next_puzzle(&store, Difficulty::Medium).await.unwrap();
        assert!(catalog::fallback_puzzles(Difficulty::Medium).contains(&puzzle));

        let batch = next_batch(&store, Difficulty::Easy, 3).await.unwrap();
        assert_eq!(batch.len(), 3);
    }

    #[tokio::test]
    async fn zero_sized_batch_still_yields_a_puzzle() {
        let store = MemoryStore::new();
        let batch = next_batch(&store, Difficulty::Hard, 0).await.unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[tokio::test]
    async fn source_puzzles_take_precedence() {
        let own = PuzzleSpec::new("COLD", "WARM", 5, Difficulty::Medium);
        let store = MemoryStore::new().with_puzzles([own.clone()]);
        assert_eq!(next_puzzle(&store, Difficulty::Medium).await.unwrap(), own);
        assert_eq!(
            next_batch(&store, Difficulty::Medium, 5).await.unwrap(),
            vec![own]
        );
    }

    #[tokio::test]
    async fn source_failure_is_not_masked() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let err = next_puzzle(&store, Difficulty::Easy).await.unwrap_err();
        assert!(matches!(err, ModeError::Store(StoreError::Unavailable(_))));
    }
}
