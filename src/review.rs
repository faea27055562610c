use crate::models::{DayEntry, JournalFile};
use crate::prompts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewItem {
    pub number: usize,
    pub question: String,
    pub answer: String,
    /// The question is no longer in the prompt list.
    pub stale: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewedEntry {
    pub date: String,
    pub items: Vec<ReviewItem>,
    pub unanswered: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewPage {
    pub dates: Vec<String>,
    pub selected: Option<String>,
    pub entry: Option<ReviewedEntry>,
}

/// Picks the requested date, or the newest one when nothing was asked for.
/// A requested date without an entry is still reported as `selected` so the
/// caller can say so.
pub fn build_review(journal: &JournalFile, requested: Option<&str>) -> ReviewPage {
    let dates = journal.dates_desc();
    let selected = match requested.map(str::trim).filter(|date| !date.is_empty()) {
        Some(date) => Some(date.to_string()),
        None => dates.first().cloned(),
    };
    let entry = selected
        .as_deref()
        .and_then(|date| journal.entry(date).map(|entry| review_entry(date, entry)));

    ReviewPage {
        dates,
        selected,
        entry,
    }
}

pub fn review_entry(date: &str, entry: &DayEntry) -> ReviewedEntry {
    let items = entry
        .pairs
        .iter()
        .enumerate()
        .map(|(idx, pair)| ReviewItem {
            number: idx + 1,
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            stale: !prompts::is_current(&pair.question),
        })
        .collect();

    let unanswered = prompts::PROMPTS
        .iter()
        .filter(|prompt| entry.answer_for(prompt).is_none())
        .map(|prompt| prompt.to_string())
        .collect();

    ReviewedEntry {
        date: date.to_string(),
        items,
        unanswered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QaPair;
    use crate::prompts::PROMPTS;
    use chrono::NaiveDate;

    fn journal_with(days: &[(&str, DayEntry)]) -> JournalFile {
        days.iter().fold(JournalFile::default(), |journal, (date, entry)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            journal.record_day(date, entry.clone())
        })
    }

    #[test]
    fn defaults_to_newest_date() {
        let journal = journal_with(&[
            ("2024-01-01", DayEntry::default()),
            ("2024-01-03", DayEntry::default()),
        ]);

        let page = build_review(&journal, None);
        assert_eq!(page.dates, vec!["2024-01-03", "2024-01-01"]);
        assert_eq!(page.selected.as_deref(), Some("2024-01-03"));
        assert!(page.entry.is_some());
    }

    #[test]
    fn unknown_date_is_selected_without_entry() {
        let journal = journal_with(&[("2024-01-01", DayEntry::default())]);

        let page = build_review(&journal, Some("2023-06-01"));
        assert_eq!(page.selected.as_deref(), Some("2023-06-01"));
        assert!(page.entry.is_none());
    }

    #[test]
    fn empty_journal_selects_nothing() {
        let page = build_review(&JournalFile::default(), Some("  "));
        assert!(page.dates.is_empty());
        assert!(page.selected.is_none());
        assert!(page.entry.is_none());
    }

    #[test]
    fn flags_stale_questions_and_lists_unanswered_prompts() {
        let entry = DayEntry {
            pairs: vec![
                QaPair {
                    question: PROMPTS[1].to_string(),
                    answer: "deeper".into(),
                },
                QaPair {
                    question: "A prompt that was retired?".into(),
                    answer: "still here".into(),
                },
            ],
        };

        let reviewed = review_entry("2024-02-02", &entry);
        assert_eq!(reviewed.items.len(), 2);
        assert_eq!(reviewed.items[0].number, 1);
        assert!(!reviewed.items[0].stale);
        assert!(reviewed.items[1].stale);
        assert_eq!(reviewed.items[1].answer, "still here");
        assert_eq!(reviewed.unanswered.len(), PROMPTS.len() - 1);
        assert!(!reviewed.unanswered.iter().any(|q| q == PROMPTS[1]));
    }

    #[test]
    fn full_entry_has_nothing_unanswered() {
        let entry = DayEntry::from_answers(PROMPTS, vec![]);
        let reviewed = review_entry("2024-02-02", &entry);
        assert!(reviewed.unanswered.is_empty());
        assert!(reviewed.items.iter().all(|item| !item.stale));
    }
}
