// src/inference/models.rs
use serde::{Deserialize, Serialize};

/// Body of a text2text-generation request.
/// Example: POST https://api-inference.huggingface.co/models/valhalla/t5-small-e2e-qg
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    pub max_length: usize,
    pub num_return_sequences: usize,
    pub do_sample: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    #[serde(default)]
    pub generated_text: String,
}

/// Body of an extractive question-answering request.
#[derive(Debug, Serialize)]
pub struct AnswerRequest<'a> {
    pub inputs: AnswerInputs<'a>,
}

#[derive(Debug, Serialize)]
pub struct AnswerInputs<'a> {
    pub question: &'a str,
    pub context: &'a str,
}

/// Span returned by a question-answering model. `start`/`end` are character
/// offsets into the context.
#[derive(Debug, Deserialize)]
pub struct AnswerSpan {
    pub answer: String,
    pub score: f64,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}
