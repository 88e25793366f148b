use super::AnswerValue;
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt;

/// Identifies one answer slot: a question ordinal on a page ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerKey {
    pub page: usize,
    pub question: usize,
}

impl AnswerKey {
    pub fn new(page: usize, question: usize) -> Self {
        Self { page, question }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} / question {}", self.page + 1, self.question + 1)
    }
}

/// The answers given during one play-through.
///
/// Last write per key wins and no earlier values are kept. A lookup on a key
/// that was never written returns `None`, which is distinct from any answer
/// value (an answered `0` or empty string is still `Some`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    entries: AHashMap<AnswerKey, AnswerValue>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the answer for `key`, returning the previous one.
    pub fn record(&mut self, key: AnswerKey, value: AnswerValue) -> Option<AnswerValue> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: AnswerKey) -> Option<&AnswerValue> {
        self.entries.get(&key)
    }

    pub fn lookup(&self, page: usize, question: usize) -> Option<&AnswerValue> {
        self.get(AnswerKey::new(page, question))
    }

    /// Flips `option` in the multi-select answer stored under `key`.
    ///
    /// Any non-multi-select value under the key is replaced by a fresh set.
    pub fn toggle(&mut self, key: AnswerKey, option: &str) -> &AnswerValue {
        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| AnswerValue::MultiSelect(Default::default()));
        match &mut *slot {
            AnswerValue::MultiSelect(set) => {
                if !set.remove(option) {
                    set.insert(option.to_string());
                }
            }
            other => *other = AnswerValue::multi([option]),
        }
        &*slot
    }

    pub fn remove(&mut self, key: AnswerKey) -> Option<AnswerValue> {
        self.entries.remove(&key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All answers ordered by page, then question.
    pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &AnswerValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (*key, value))
            .sorted_by_key(|(key, _)| *key)
    }

    /// Answers recorded on a single page, ordered by question.
    pub fn page(&self, page: usize) -> impl Iterator<Item = (usize, &AnswerValue)> {
        self.iter()
            .filter(move |(key, _)| key.page == page)
            .map(|(key, value)| (key.question, value))
    }
}
