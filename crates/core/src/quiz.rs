//! Quiz generation from a vocabulary list.
//!
//! Randomness is always supplied by the caller, so a seeded RNG yields a
//! reproducible quiz.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::model::VocabEntry;

const DEFAULT_MULTIPLE_CHOICE: usize = 10;
const DEFAULT_MATCHING: usize = 5;
const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    /// Prompt is a meaning; pick the matching word.
    MultipleChoice,
    /// Prompt is a pronunciation; pick the matching meaning.
    Matching,
}

/// A single generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    kind: QuestionKind,
    prompt: String,
    word: String,
    pronunciation: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Source word the question was built from.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.answer
    }
}

/// Builds multiple-choice and matching questions from vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizGenerator {
    multiple_choice: usize,
    matching: usize,
}

impl Default for QuizGenerator {
    fn default() -> Self {
        Self {
            multiple_choice: DEFAULT_MULTIPLE_CHOICE,
            matching: DEFAULT_MATCHING,
        }
    }
}

impl QuizGenerator {
    /// Override how many questions of each kind are generated at most.
    #[must_use]
    pub fn with_limits(mut self, multiple_choice: usize, matching: usize) -> Self {
        self.multiple_choice = multiple_choice;
        self.matching = matching;
        self
    }

    /// Generate a shuffled question set.
    ///
    /// - Identical entries are collapsed first.
    /// - Up to `multiple_choice` questions come from the first entries, with
    ///   distractor words drawn from that same slice.
    /// - Up to `matching` questions come from the first entries, with
    ///   distractor meanings drawn from that same slice.
    /// - Each question has up to 4 distinct options; fewer only when the slice
    ///   runs out of distinct alternatives.
    ///
    /// An empty vocabulary yields no questions.
    pub fn generate<R: Rng + ?Sized>(&self, entries: &[VocabEntry], rng: &mut R) -> Vec<Question> {
        let entries = dedup_entries(entries);
        let mut questions = Vec::new();

        let pool = &entries[..self.multiple_choice.min(entries.len())];
        for entry in pool {
            let options = build_options(entry.word(), pool.iter().map(|e| e.word()), rng);
            questions.push(Question {
                kind: QuestionKind::MultipleChoice,
                prompt: entry.meaning().to_owned(),
                word: entry.word().to_owned(),
                pronunciation: entry.pronunciation().to_owned(),
                options,
                answer: entry.word().to_owned(),
            });
        }

        let pool = &entries[..self.matching.min(entries.len())];
        for entry in pool {
            let options = build_options(entry.meaning(), pool.iter().map(|e| e.meaning()), rng);
            questions.push(Question {
                kind: QuestionKind::Matching,
                prompt: entry.pronunciation().to_owned(),
                word: entry.word().to_owned(),
                pronunciation: entry.pronunciation().to_owned(),
                options,
                answer: entry.meaning().to_owned(),
            });
        }

        questions.shuffle(rng);
        questions
    }
}

fn dedup_entries(entries: &[VocabEntry]) -> Vec<&VocabEntry> {
    let mut seen = HashSet::new();
    entries.iter().filter(|e| seen.insert(*e)).collect()
}

/// The answer plus up to three distinct distractors from `pool`, shuffled.
///
/// Sampling is without replacement, so it terminates even when the pool holds
/// fewer distinct values than needed.
fn build_options<'a, R: Rng + ?Sized>(
    answer: &'a str,
    pool: impl Iterator<Item = &'a str>,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::from([answer]);
    let mut candidates: Vec<&str> = pool.filter(|value| seen.insert(*value)).collect();
    candidates.shuffle(rng);

    let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
    options.push(answer.to_owned());
    options.extend(
        candidates
            .into_iter()
            .take(OPTIONS_PER_QUESTION - 1)
            .map(str::to_owned),
    );
    options.shuffle(rng);
    options
}
