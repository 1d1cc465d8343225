// src/exam/builder.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::question::Question;

/// Default number of questions in one exam attempt.
pub const DEFAULT_EXAM_QUESTION_LIMIT: usize = 25;

/// Builds the randomized question set for one exam attempt.
///
/// The whole bank is shuffled first so that the source order never biases
/// which questions are picked. Banks with at least `limit` questions are cut
/// down to exactly `limit`; smaller banks are returned whole. Never pads.
pub fn build_exam<R>(all_questions: &[Question], limit: usize, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut shuffled = all_questions.to_vec();
    shuffled.shuffle(rng);

    if shuffled.len() >= limit {
        shuffled.truncate(limit);
    }

    shuffled
}
