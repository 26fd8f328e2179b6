//! Accuracy feedback on extracted contract terms
//!
//! Feedback is kept in memory for the session only.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermRating {
    Accurate,
    Inaccurate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFeedback {
    pub rating: TermRating,
    pub comment: String,
    pub submitted: bool,
}

/// Feedback keyed by contract id and term label
#[derive(Debug, Default)]
pub struct FeedbackBook {
    entries: HashMap<(u32, String), TermFeedback>,
}

pub const FEEDBACK_SUBMITTED: &str = "Feedback submitted";

impl FeedbackBook {
    pub fn get(&self, contract_id: u32, term: &str) -> Option<&TermFeedback> {
        self.entries.get(&(contract_id, term.to_string()))
    }

    /// Mark a term; a new rating replaces the previous one and its comment
    pub fn rate(&mut self, contract_id: u32, term: &str, rating: TermRating) {
        self.entries.insert(
            (contract_id, term.to_string()),
            TermFeedback {
                rating,
                comment: String::new(),
                submitted: false,
            },
        );
    }

    /// Whether the term is marked inaccurate and awaits a comment
    pub fn wants_comment(&self, contract_id: u32, term: &str) -> bool {
        self.get(contract_id, term)
            .is_some_and(|f| f.rating == TermRating::Inaccurate && !f.submitted)
    }

    pub fn set_comment(&mut self, contract_id: u32, term: &str, comment: &str) {
        if let Some(entry) = self.entries.get_mut(&(contract_id, term.to_string())) {
            entry.comment = comment.to_string();
        }
    }

    /// Submit feedback for a term, returning the confirmation message
    pub fn submit(&mut self, contract_id: u32, term: &str) -> Result<&'static str, String> {
        let entry = self
            .entries
            .get_mut(&(contract_id, term.to_string()))
            .ok_or_else(|| format!("Mark '{}' as accurate or inaccurate first", term))?;
        entry.submitted = true;
        Ok(FEEDBACK_SUBMITTED)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_replaces_previous_entry() {
        let mut book = FeedbackBook::default();
        book.rate(1, "Governing Law", TermRating::Inaccurate);
        book.set_comment(1, "Governing Law", "State is Nevada");
        assert_eq!(book.get(1, "Governing Law").unwrap().comment, "State is Nevada");

        book.rate(1, "Governing Law", TermRating::Accurate);
        let entry = book.get(1, "Governing Law").unwrap();
        assert_eq!(entry.rating, TermRating::Accurate);
        assert!(entry.comment.is_empty());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_inaccurate_asks_for_comment_until_submitted() {
        let mut book = FeedbackBook::default();
        book.rate(1, "Confidentiality", TermRating::Inaccurate);
        assert!(book.wants_comment(1, "Confidentiality"));
        assert!(!book.wants_comment(2, "Confidentiality"));

        assert_eq!(book.submit(1, "Confidentiality"), Ok(FEEDBACK_SUBMITTED));
        assert!(!book.wants_comment(1, "Confidentiality"));
    }

    #[test]
    fn test_submit_without_rating_fails() {
        let mut book = FeedbackBook::default();
        assert!(book.submit(1, "Effective Date").is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_comment_on_unrated_term_is_ignored() {
        let mut book = FeedbackBook::default();
        book.set_comment(3, "Start Date", "wrong");
        assert!(book.get(3, "Start Date").is_none());
    }
}
