use std::collections::HashSet;

use super::domain::{Job, Person};

/// Case-insensitive whole-word keyword query.
///
/// An entity matches when any keyword equals one of the words of the searched
/// field. A query with no keywords matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordQuery {
    keywords: Vec<String>,
}

impl KeywordQuery {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        let words: HashSet<String> = text.split_whitespace().map(str::to_lowercase).collect();
        self.keywords.iter().any(|keyword| words.contains(keyword))
    }

    pub fn person_predicate(self) -> impl Fn(&Person) -> bool + Send + Sync + 'static {
        move |person: &Person| self.matches_text(&person.name)
    }

    pub fn job_predicate(self) -> impl Fn(&Job) -> bool + Send + Sync + 'static {
        move |job: &Job| self.matches_text(job.title.as_str())
    }
}
