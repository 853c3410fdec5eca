//! Text normalization and n-gram counting.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
static RE_NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// Lower-case, strip URLs, keep only `a-z`, collapse whitespace.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_urls = RE_URL.replace_all(&lowered, " ");
    let letters = RE_NON_ALPHA.replace_all(&no_urls, " ");
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words of two or more letters that are not stopwords.
pub fn tokens<'a>(cleaned: &'a str, stopwords: &HashSet<&str>) -> Vec<&'a str> {
    cleaned
        .split_whitespace()
        .filter(|w| w.len() >= 2 && !stopwords.contains(w))
        .collect()
}

/// Sort by count descending, then key ascending, and keep `n`.
fn top(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Most frequent contiguous 2- and 3-word phrases across `texts`.
pub fn top_phrases<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    stopwords: &HashSet<&str>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let cleaned = clean_text(text);
        let words = tokens(&cleaned, stopwords);
        for size in 2..=3 {
            for gram in words.windows(size) {
                *counts.entry(gram.join(" ")).or_default() += 1;
            }
        }
    }
    top(counts, n)
}

/// Most frequent single words across `texts`.
pub fn top_words<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    stopwords: &HashSet<&str>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        let cleaned = clean_text(text);
        for word in tokens(&cleaned, stopwords) {
            *counts.entry(word.to_string()).or_default() += 1;
        }
    }
    top(counts, n)
}
