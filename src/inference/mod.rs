// src/inference/mod.rs
//! Question generation and answering collaborators.
//!
//! The session controller only sees the two traits below; the HTTP-backed
//! implementations live in [`client`].
pub mod client;
pub mod models;

use crate::utils::error::{AnswerError, GenerationError};
use async_trait::async_trait;

pub use client::{HttpAnswerEngine, HttpQuestionGenerator};

/// Sampling knobs for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// Upper bound on returned candidates; fewer may come back.
    pub max_questions: usize,
    /// Maximum generated length, in model tokens.
    pub max_length: usize,
    pub sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { max_questions: 5, max_length: 64, sample: true }
    }
}

/// An answer span and the model's confidence in it.
#[derive(Debug, Clone, PartialEq)]
pub struct QaResult {
    pub answer: String,
    /// In `[0, 1]`.
    pub score: f64,
}

/// Maps a prompt to candidate question strings.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<Vec<String>, GenerationError>;
}

/// Answers a question from a context passage.
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<QaResult, AnswerError>;
}
