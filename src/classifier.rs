use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::StarRating;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/nlptown/bert-base-multilingual-uncased-sentiment";

// Shared connection pool, built once per process and reused by every run.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Batched sentiment model. Implementations must return exactly one rating
/// per input text, in input order, or fail the whole batch.
#[allow(async_fn_in_trait)]
pub trait SentimentClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<StarRating>>;
}

/// Client for a hosted inference endpoint serving a 1-5 star sentiment model
/// that labels predictions as "1 star" .. "5 stars".
pub struct HfApiClassifier {
    endpoint: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HfApiClassifier {
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>, timeout: Duration) -> Self {
        HfApiClassifier {
            endpoint: endpoint.into(),
            api_token,
            timeout,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

impl SentimentClassifier for HfApiClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<StarRating>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = HTTP_CLIENT
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&InferenceRequest { inputs: texts });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Classifier(format!(
                "inference endpoint returned {status}: {body}"
            )));
        }

        // One list of label scores per input text, same order as the inputs.
        let predictions: Vec<Vec<LabelScore>> = response.json().await?;
        if predictions.len() != texts.len() {
            return Err(AnalysisError::Classifier(format!(
                "expected {} predictions, got {}",
                texts.len(),
                predictions.len()
            )));
        }

        predictions
            .iter()
            .map(|scores| {
                let top = scores
                    .iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
                    .ok_or_else(|| {
                        AnalysisError::Classifier("empty prediction for input".to_string())
                    })?;
                parse_star_label(&top.label)
            })
            .collect()
    }
}

/// Parse labels of the form "4 stars" (or "1 star") into a [`StarRating`].
pub fn parse_star_label(label: &str) -> Result<StarRating> {
    let stars = label
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| {
            AnalysisError::Classifier(format!("unrecognized sentiment label `{label}`"))
        })?;
    StarRating::new(stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_star_labels() {
        assert_eq!(parse_star_label("1 star").unwrap().value(), 1);
        assert_eq!(parse_star_label("5 stars").unwrap().value(), 5);
        assert_eq!(parse_star_label("3 stars").unwrap().value(), 3);
    }

    #[test]
    fn rejects_non_star_labels() {
        assert!(matches!(
            parse_star_label("POSITIVE"),
            Err(AnalysisError::Classifier(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_labels_distinctly() {
        assert!(matches!(
            parse_star_label("7 stars"),
            Err(AnalysisError::InvalidRating(7))
        ));
    }

    #[test]
    fn deserializes_inference_payload() {
        let payload = r#"[[{"label":"5 stars","score":0.91},{"label":"4 stars","score":0.06}]]"#;
        let predictions: Vec<Vec<LabelScore>> = serde_json::from_str(payload).unwrap();
        assert_eq!(predictions[0][0].label, "5 stars");
        assert!(predictions[0][0].score > predictions[0][1].score);
    }
}
