use serde::{Deserialize, Serialize};

/// Subset of the Hub's model metadata used to validate a model before use.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub pipeline_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct InferenceRequest<'a> {
    pub inputs: &'a str,
}

/// One label with its confidence score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Text-classification responses come nested one level per input, but some
/// deployments return a flat list for single inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassificationResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

impl ClassificationResponse {
    /// Highest-scoring prediction for the first (only) input.
    pub fn top(self) -> Option<Prediction> {
        let predictions = match self {
            ClassificationResponse::Nested(mut outer) => {
                if outer.is_empty() {
                    return None;
                }
                outer.swap_remove(0)
            }
            ClassificationResponse::Flat(list) => list,
        };
        predictions
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_picks_highest_score_from_nested_response() {
        let body = r#"[[{"label":"LABEL_0","score":0.1},{"label":"LABEL_2","score":0.8},{"label":"LABEL_1","score":0.1}]]"#;
        let resp: ClassificationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.top().unwrap().label, "LABEL_2");
    }

    #[test]
    fn top_accepts_flat_response() {
        let body = r#"[{"label":"LABEL_1","score":0.6},{"label":"LABEL_0","score":0.4}]"#;
        let resp: ClassificationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.top().unwrap().label, "LABEL_1");
    }

    #[test]
    fn empty_response_has_no_top() {
        let resp: ClassificationResponse = serde_json::from_str("[[]]").unwrap();
        assert!(resp.top().is_none());
        let resp: ClassificationResponse = serde_json::from_str("[]").unwrap();
        assert!(resp.top().is_none());
    }
}
