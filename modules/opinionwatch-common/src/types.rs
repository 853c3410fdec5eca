use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OpinionWatchError;

/// Opaque identifier of a discoverable video.
pub type ContentId = String;

// --- Sentiment ---

/// Closed output vocabulary of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(alias = "Negatif")]
    Negative,
    #[serde(alias = "Netral")]
    Neutral,
    #[serde(alias = "Positif")]
    Positive,
    Error,
}

impl Sentiment {
    /// Display order used by reports.
    pub const ALL: [Sentiment; 4] = [
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Positive,
        Sentiment::Error,
    ];

    /// Map a raw model label index. 2 is Negative, 0 is Positive, anything
    /// else (including unparseable labels) is Neutral.
    pub fn from_label_index(index: Option<u32>) -> Self {
        match index {
            Some(2) => Sentiment::Negative,
            Some(0) => Sentiment::Positive,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
            Sentiment::Error => "Error",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = OpinionWatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Negative" | "Negatif" => Ok(Sentiment::Negative),
            "Neutral" | "Netral" => Ok(Sentiment::Neutral),
            "Positive" | "Positif" => Ok(Sentiment::Positive),
            "Error" => Ok(Sentiment::Error),
            other => Err(OpinionWatchError::UnknownSentiment(other.to_string())),
        }
    }
}

// --- Comment ---

/// A top-level video comment. `sentiment` stays `None` until classified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Option<String>,
    pub text: Option<String>,
    pub published_at: Option<String>,
    pub like_count: i64,
    pub sentiment: Option<Sentiment>,
}

impl Comment {
    /// Text if present and non-empty.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}

// --- Dataset ---

/// Ordered, flat table of comments. A zero-row dataset is a real dataset;
/// "nothing persisted" is expressed as `Option<Dataset>::None` by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    rows: Vec<Comment>,
}

impl Dataset {
    pub fn new(rows: Vec<Comment>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Comment] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Comment> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.rows.iter()
    }

    /// Number of rows carrying the given sentiment.
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.rows
            .iter()
            .filter(|c| c.sentiment == Some(sentiment))
            .count()
    }
}

impl From<Vec<Comment>> for Dataset {
    fn from(rows: Vec<Comment>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
