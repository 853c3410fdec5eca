//! Read-only analytics over the persisted dataset: sentiment distribution,
//! recurring phrases and words in negative comments, sample comments and the
//! filtered rows themselves.

pub mod stopwords;
pub mod text;

use std::fmt;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use opinionwatch_common::{Comment, Dataset, Sentiment};

/// Printed instead of a report when nothing has been persisted yet.
pub const WAITING_NOTICE: &str =
    "No data yet. Waiting for the crawler: run `opinionwatch run`, then try again.";

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Categories to include. `None` keeps every category present.
    pub sentiments: Option<Vec<Sentiment>>,
    pub top_n: usize,
    pub samples: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sentiments: None,
            top_n: 15,
            samples: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub author: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    /// In `Sentiment::ALL` order.
    pub counts: Vec<(Sentiment, usize)>,
    pub negative_pct: f64,
    pub positive_pct: f64,
    pub top_phrases: Vec<(String, usize)>,
    pub top_words: Vec<(String, usize)>,
    pub positive_samples: Vec<Sample>,
    pub negative_samples: Vec<Sample>,
    /// Every row in the selection, in stored order.
    pub rows: Vec<Comment>,
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

fn samples<R: Rng + ?Sized>(rows: &[&Comment], n: usize, rng: &mut R) -> Vec<Sample> {
    rows.choose_multiple(rng, n)
        .map(|c| Sample {
            author: c.author.clone(),
            text: c.text.clone().unwrap_or_default(),
        })
        .collect()
}

impl DashboardReport {
    pub fn build<R: Rng + ?Sized>(dataset: &Dataset, options: &ReportOptions, rng: &mut R) -> Self {
        let selection: Vec<&Comment> = dataset
            .iter()
            .filter(|c| c.text.is_some())
            .filter(|c| match (c.sentiment, &options.sentiments) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(s), Some(wanted)) => wanted.contains(&s),
            })
            .collect();

        let of = |sentiment: Sentiment| -> Vec<&Comment> {
            selection
                .iter()
                .copied()
                .filter(|c| c.sentiment == Some(sentiment))
                .collect()
        };
        let negative = of(Sentiment::Negative);
        let positive = of(Sentiment::Positive);

        let total = selection.len();
        let counts: Vec<(Sentiment, usize)> = Sentiment::ALL
            .iter()
            .map(|&s| (s, selection.iter().filter(|c| c.sentiment == Some(s)).count()))
            .collect();

        let negative_texts = || negative.iter().filter_map(|c| c.text.as_deref());

        Self {
            generated_at: Utc::now(),
            total,
            counts,
            negative_pct: percent(negative.len(), total),
            positive_pct: percent(positive.len(), total),
            top_phrases: text::top_phrases(
                negative_texts(),
                stopwords::phrase_stopwords(),
                options.top_n,
            ),
            top_words: text::top_words(
                negative_texts(),
                stopwords::extended_stopwords(),
                options.top_n,
            ),
            positive_samples: samples(&positive, options.samples, rng),
            negative_samples: samples(&negative, options.samples, rng),
            rows: selection.iter().map(|c| (*c).clone()).collect(),
        }
    }

    /// Tabular listing of the selected rows.
    pub fn rows_listing(&self) -> RowsListing<'_> {
        RowsListing(&self.rows)
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == sentiment)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

pub struct RowsListing<'a>(&'a [Comment]);

impl fmt::Display for RowsListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Filtered Comments ({}) ===", self.0.len())?;
        for c in self.0 {
            let sentiment = c.sentiment.map(|s| s.as_str()).unwrap_or("-");
            writeln!(
                f,
                "{:<9} {:>6}  {:<20}  {}  {}",
                sentiment,
                c.like_count,
                c.published_at.as_deref().unwrap_or("-"),
                c.author.as_deref().unwrap_or("?"),
                c.text.as_deref().unwrap_or_default(),
            )?;
        }
        Ok(())
    }
}

fn write_samples(f: &mut fmt::Formatter<'_>, title: &str, rows: &[Sample]) -> fmt::Result {
    writeln!(f, "\n{title}:")?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    for row in rows {
        writeln!(f, "  [{}] {}", row.author.as_deref().unwrap_or("?"), row.text)?;
    }
    Ok(())
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Public Sentiment Report ===")?;
        writeln!(f, "Generated:          {}", self.generated_at.format("%d %B %Y, %H:%M UTC"))?;
        writeln!(f, "Comments (filtered): {}", self.total)?;
        writeln!(f, "Negative:           {:.1}%", self.negative_pct)?;
        writeln!(f, "Positive:           {:.1}%", self.positive_pct)?;

        writeln!(f, "\nDistribution:")?;
        for (sentiment, count) in &self.counts {
            writeln!(f, "  {:<9} {count}", format!("{sentiment}:"))?;
        }

        writeln!(f, "\nTop phrases in negative comments:")?;
        if self.top_phrases.is_empty() {
            writeln!(f, "  (no negative comments)")?;
        }
        for (phrase, count) in &self.top_phrases {
            writeln!(f, "  {count:>5}  {phrase}")?;
        }

        writeln!(f, "\nTop words in negative comments:")?;
        if self.top_words.is_empty() {
            writeln!(f, "  (no negative comments)")?;
        }
        for (word, count) in &self.top_words {
            writeln!(f, "  {count:>5}  {word}")?;
        }

        write_samples(f, "Sample positive comments", &self.positive_samples)?;
        write_samples(f, "Sample negative comments", &self.negative_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::labelled;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            labelled("@a", "tolak ruu perampasan aset", Sentiment::Negative),
            labelled("@b", "Tolak RUU sekarang juga!", Sentiment::Negative),
            labelled("@c", "mendukung penuh", Sentiment::Positive),
            labelled("@d", "biasa saja", Sentiment::Neutral),
            labelled("@e", "???", Sentiment::Error),
            Comment {
                text: Some("belum dianalisis".into()),
                ..Default::default()
            },
            Comment {
                sentiment: Some(Sentiment::Negative),
                ..Default::default()
            },
        ])
    }

    fn build(options: &ReportOptions) -> DashboardReport {
        DashboardReport::build(&dataset(), options, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn rows_missing_text_or_sentiment_are_ignored() {
        let report = build(&ReportOptions::default());
        assert_eq!(report.total, 5);
        assert_eq!(
            report.counts,
            vec![
                (Sentiment::Negative, 2),
                (Sentiment::Neutral, 1),
                (Sentiment::Positive, 1),
                (Sentiment::Error, 1),
            ]
        );
    }

    #[test]
    fn percentages_are_over_the_filtered_total() {
        let report = build(&ReportOptions::default());
        assert!((report.negative_pct - 40.0).abs() < 1e-9);
        assert!((report.positive_pct - 20.0).abs() < 1e-9);

        let report = build(&ReportOptions {
            sentiments: Some(vec![Sentiment::Negative, Sentiment::Positive]),
            ..Default::default()
        });
        assert_eq!(report.total, 3);
        assert_eq!(report.count(Sentiment::Neutral), 0);
        assert!((report.positive_pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_selection_has_zero_percentages() {
        let report = DashboardReport::build(
            &Dataset::default(),
            &ReportOptions::default(),
            &mut StdRng::seed_from_u64(1),
        );
        assert_eq!(report.total, 0);
        assert_eq!(report.negative_pct, 0.0);
        assert!(report.top_phrases.is_empty());
        assert!(report.negative_samples.is_empty());
    }

    #[test]
    fn phrases_come_from_negative_rows_only() {
        let report = build(&ReportOptions::default());
        assert_eq!(report.top_phrases[0], ("tolak ruu".to_string(), 2));
        assert!(!report.top_phrases.iter().any(|(p, _)| p.contains("mendukung")));
        assert_eq!(report.top_words[0], ("ruu".to_string(), 2));
    }

    #[test]
    fn filtering_out_negative_removes_phrases() {
        let report = build(&ReportOptions {
            sentiments: Some(vec![Sentiment::Positive]),
            ..Default::default()
        });
        assert!(report.top_phrases.is_empty());
        assert!(report.top_words.is_empty());
        assert_eq!(report.positive_samples.len(), 1);
    }

    #[test]
    fn samples_are_bounded_and_drawn_from_the_right_category() {
        let report = build(&ReportOptions {
            samples: 1,
            ..Default::default()
        });
        assert_eq!(report.negative_samples.len(), 1);
        assert!(report.negative_samples[0].text.to_lowercase().contains("tolak"));
        assert_eq!(
            report.positive_samples,
            vec![Sample {
                author: Some("@c".into()),
                text: "mendukung penuh".into()
            }]
        );
    }

    #[test]
    fn rows_follow_the_sentiment_filter_in_stored_order() {
        let report = build(&ReportOptions {
            sentiments: Some(vec![Sentiment::Negative, Sentiment::Neutral]),
            ..Default::default()
        });
        let authors: Vec<_> = report.rows.iter().map(|c| c.author.as_deref()).collect();
        assert_eq!(authors, vec![Some("@a"), Some("@b"), Some("@d")]);

        let listing = report.rows_listing().to_string();
        assert!(listing.contains("Filtered Comments (3)"));
        assert!(listing.contains("biasa saja"));
        assert!(!listing.contains("mendukung penuh"));
    }

    #[test]
    fn rows_are_serialized_with_every_column() {
        let report = build(&ReportOptions {
            sentiments: Some(vec![Sentiment::Positive]),
            ..Default::default()
        });
        let json = serde_json::to_value(&report).unwrap();
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["author"], "@c");
        assert_eq!(rows[0]["like_count"], 0);
        assert_eq!(rows[0]["sentiment"], "Positive");
        assert!(rows[0].get("published_at").is_some());
    }

    #[test]
    fn display_lists_distribution_and_phrases() {
        let text = build(&ReportOptions::default()).to_string();
        assert!(text.contains("Negative:           40.0%"));
        assert!(text.contains("tolak ruu"));
        assert!(text.contains("[@c] mendukung penuh"));
    }
}
