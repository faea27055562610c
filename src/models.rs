use crate::review::ReviewedEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// One day's answers, keyed by the literal question text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "Vec<QaPair>")]
pub struct DayEntry {
    pub pairs: Vec<QaPair>,
}

/// On-disk shapes a day can take. Older files map question text straight to
/// the answer; those are read in file order and written back as pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Pairs(Vec<QaPair>),
    ByQuestion(Map<String, Value>),
}

impl From<StoredEntry> for DayEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Pairs(pairs) => Self { pairs },
            StoredEntry::ByQuestion(map) => Self {
                pairs: map
                    .into_iter()
                    .map(|(question, value)| QaPair {
                        question,
                        answer: match value {
                            Value::String(text) => text,
                            Value::Null => String::new(),
                            other => other.to_string(),
                        },
                    })
                    .collect(),
            },
        }
    }
}

impl From<DayEntry> for Vec<QaPair> {
    fn from(entry: DayEntry) -> Self {
        entry.pairs
    }
}

impl DayEntry {
    /// Pairs each prompt with the answer at the same position. Prompts past
    /// the end of `answers` get an empty answer.
    pub fn from_answers<S: AsRef<str>>(prompts: &[S], answers: Vec<String>) -> Self {
        let mut answers = answers.into_iter();
        let pairs = prompts
            .iter()
            .map(|prompt| QaPair {
                question: prompt.as_ref().to_string(),
                answer: answers.next().unwrap_or_default(),
            })
            .collect();
        Self { pairs }
    }

    pub fn answer_for(&self, question: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.question == question)
            .map(|pair| pair.answer.as_str())
    }
}

/// The whole journal file: ISO date string to that day's entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct JournalFile {
    pub days: BTreeMap<String, DayEntry>,
}

impl JournalFile {
    /// Replaces the entry for `date`, leaving every other day untouched.
    pub fn record_day(mut self, date: NaiveDate, entry: DayEntry) -> Self {
        self.days.insert(date_key(date), entry);
        self
    }

    pub fn entry(&self, date: &str) -> Option<&DayEntry> {
        self.days.get(date)
    }

    /// Dates newest first.
    pub fn dates_desc(&self) -> Vec<String> {
        self.days.keys().rev().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Deserialize)]
pub struct RecordRequest {
    pub date: Option<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    #[serde(flatten)]
    pub entry: ReviewedEntry,
    pub recovered: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptsResponse {
    pub prompts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatesResponse {
    pub dates: Vec<String>,
    pub recovered: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_day_overwrites_only_that_date() {
        let first = DayEntry::from_answers(&["q1"], vec!["old".into()]);
        let other = DayEntry::from_answers(&["q1"], vec!["keep".into()]);
        let journal = JournalFile::default()
            .record_day(day(2024, 1, 1), other.clone())
            .record_day(day(2024, 1, 2), first);

        let replacement = DayEntry::from_answers(&["q1"], vec!["new".into()]);
        let journal = journal.record_day(day(2024, 1, 2), replacement.clone());

        assert_eq!(journal.days.len(), 2);
        assert_eq!(journal.entry("2024-01-01"), Some(&other));
        assert_eq!(journal.entry("2024-01-02"), Some(&replacement));
    }

    #[test]
    fn from_answers_pads_missing_answers() {
        let entry = DayEntry::from_answers(&["a?", "b?", "c?"], vec!["yes".into()]);
        assert_eq!(entry.pairs.len(), 3);
        assert_eq!(entry.answer_for("a?"), Some("yes"));
        assert_eq!(entry.answer_for("c?"), Some(""));
        assert_eq!(entry.answer_for("d?"), None);
    }

    #[test]
    fn dates_are_listed_newest_first() {
        let journal = JournalFile::default()
            .record_day(day(2023, 12, 31), DayEntry::default())
            .record_day(day(2024, 2, 1), DayEntry::default())
            .record_day(day(2024, 1, 15), DayEntry::default());
        assert_eq!(
            journal.dates_desc(),
            vec!["2024-02-01", "2024-01-15", "2023-12-31"]
        );
    }

    #[test]
    fn legacy_object_entries_keep_file_order() {
        let raw = r#"{
            "2024-03-01": { "Second question?": "b", "First question?": "a", "Third?": null }
        }"#;
        let journal: JournalFile = serde_json::from_str(raw).unwrap();
        let entry = journal.entry("2024-03-01").unwrap();
        let questions: Vec<_> = entry.pairs.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["Second question?", "First question?", "Third?"]);
        assert_eq!(entry.answer_for("Third?"), Some(""));

        let rewritten = serde_json::to_value(&journal).unwrap();
        assert_eq!(
            rewritten["2024-03-01"][0],
            serde_json::json!({ "question": "Second question?", "answer": "b" })
        );
    }

    #[test]
    fn parse_date_rejects_non_iso() {
        assert_eq!(parse_date("2024-01-05"), Some(day(2024, 1, 5)));
        assert_eq!(parse_date("05/01/2024"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }
}
