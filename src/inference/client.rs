// src/inference/client.rs
use crate::inference::models::{
    AnswerInputs, AnswerRequest, AnswerSpan, GeneratedText, GenerationParameters, GenerationRequest,
};
use crate::inference::{AnswerEngine, GenerationParams, QaResult, QuestionGenerator};
use crate::utils::error::{AnswerError, GenerationError};
use async_trait::async_trait;

pub const DEFAULT_QG_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/valhalla/t5-small-e2e-qg";
pub const DEFAULT_QA_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/deepset/roberta-base-squad2";

/// Shared HTTP plumbing: one reqwest client, one endpoint, optional bearer token.
#[derive(Debug, Clone)]
struct InferenceEndpoint {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl InferenceEndpoint {
    fn new(url: &str, token: Option<String>) -> Result<Self, reqwest::Error> {
        // No timeout: inference calls run until the model answers or fails.
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, url: url.to_string(), token })
    }

    fn post<T: serde::Serialize + ?Sized>(&self, body: &T) -> reqwest::RequestBuilder {
        let request = self.client.post(&self.url).json(body);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Question generator backed by a text2text-generation endpoint.
/// Built once and reused for every section.
#[derive(Debug, Clone)]
pub struct HttpQuestionGenerator {
    endpoint: InferenceEndpoint,
}

impl HttpQuestionGenerator {
    pub fn new(url: &str, token: Option<String>) -> Result<Self, GenerationError> {
        Ok(Self { endpoint: InferenceEndpoint::new(url, token)? })
    }
}

#[async_trait]
impl QuestionGenerator for HttpQuestionGenerator {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<Vec<String>, GenerationError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_length: params.max_length,
                num_return_sequences: params.max_questions,
                do_sample: params.sample,
            },
        };
        tracing::debug!("Requesting {} questions from {}", params.max_questions, self.endpoint.url);

        let response = self.endpoint.post(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Http(status, detail));
        }

        let body = response.text().await?;
        let generated: Vec<GeneratedText> = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Ok(generated
            .into_iter()
            .take(params.max_questions)
            .map(|g| g.generated_text)
            .collect())
    }
}

/// Answer engine backed by an extractive question-answering endpoint.
#[derive(Debug, Clone)]
pub struct HttpAnswerEngine {
    endpoint: InferenceEndpoint,
}

impl HttpAnswerEngine {
    pub fn new(url: &str, token: Option<String>) -> Result<Self, AnswerError> {
        Ok(Self { endpoint: InferenceEndpoint::new(url, token)? })
    }
}

#[async_trait]
impl AnswerEngine for HttpAnswerEngine {
    async fn answer(&self, question: &str, context: &str) -> Result<QaResult, AnswerError> {
        let request = AnswerRequest { inputs: AnswerInputs { question, context } };

        let response = self.endpoint.post(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AnswerError::Http(status, detail));
        }

        let body = response.text().await?;
        let span: AnswerSpan = serde_json::from_str(&body)
            .map_err(|e| AnswerError::Malformed(e.to_string()))?;

        if !span.score.is_finite() || !(0.0..=1.0).contains(&span.score) {
            return Err(AnswerError::Malformed(format!("score {} outside [0, 1]", span.score)));
        }
        tracing::debug!("Answer span {:?}..{:?} (score {:.4})", span.start, span.end, span.score);

        Ok(QaResult { answer: span.answer, score: span.score })
    }
}
