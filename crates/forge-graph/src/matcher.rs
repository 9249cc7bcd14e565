//! Fuzzy filename correspondence scoring
//!
//! Scores candidate correspondences between the source and game trees by
//! comparing extension-stripped file names. The score is the character-level
//! diff ratio scaled to 0–100 and rounded:
//!
//! ```text
//! score = round(2 * matching_chars / (len(a) + len(b)) * 100)
//! ```
//!
//! Names are compared case-sensitively as authored. Matches at or above
//! [`SIMILARITY_THRESHOLD`] are kept, ordered by descending score with ties
//! broken by ascending path so results are deterministic.

use crate::file::TrackedFile;
use crate::path;
use similar::TextDiff;

/// Minimum score (inclusive) for a file to count as a suggested match.
pub const SIMILARITY_THRESHOLD: u32 = 70;

/// Similarity score between two names on a 0–100 scale.
pub fn similarity_score(a: &str, b: &str) -> u32 {
    let ratio = TextDiff::from_chars(a, b).ratio();
    (ratio * 100.0).round() as u32
}

/// Rank `files` by filename similarity to `candidate`.
///
/// Only files scoring at or above [`SIMILARITY_THRESHOLD`] are returned.
pub fn rank_similar<'a, T, I>(candidate: &str, files: I) -> Vec<&'a T>
where
    T: TrackedFile,
    I: IntoIterator<Item = &'a T>,
{
    let candidate_stem = path::file_stem(candidate);

    let mut scored: Vec<(u32, &'a T)> = files
        .into_iter()
        .map(|file| (similarity_score(candidate_stem, path::file_stem(file.path())), file))
        .filter(|(score, _)| *score >= SIMILARITY_THRESHOLD)
        .collect();

    scored.sort_by(|(score_a, file_a), (score_b, file_b)| {
        score_b
            .cmp(score_a)
            .then_with(|| file_a.path().cmp(file_b.path()))
    });

    scored.into_iter().map(|(_, file)| file).collect()
}
