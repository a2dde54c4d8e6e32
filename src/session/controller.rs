// src/session/controller.rs
use crate::extractors::SectionSet;
use crate::inference::{AnswerEngine, GenerationParams, QuestionGenerator};
use crate::utils::error::GenerationError;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};

// --- Constants ---
pub const GENERATION_PREFIX: &str = "generate questions: ";
/// Typed at the question prompt to move on to the next section.
pub const EXIT_COMMAND: &str = "exit";
const DEFAULT_CONTEXT_CHARS: usize = 1000;

/// Tunables for a question session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard character cut applied to a section body before it goes into the generation prompt.
    pub context_chars: usize,
    pub prompt_prefix: String,
    pub generation: GenerationParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            context_chars: DEFAULT_CONTEXT_CHARS,
            prompt_prefix: GENERATION_PREFIX.to_string(),
            generation: GenerationParams::default(),
        }
    }
}

/// Counters gathered over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub sections_queried: usize,
    pub sections_skipped: usize,
    pub generated_answered: usize,
    pub interactive_answered: usize,
    pub generation_failures: usize,
    pub answer_failures: usize,
}

/// Drives question generation, answering and the interactive loop over a set of sections.
///
/// The generator and engine are built once by the caller and shared by every section.
pub struct Session<G, A> {
    generator: G,
    engine: A,
    config: SessionConfig,
}

impl<G: QuestionGenerator, A: AnswerEngine> Session<G, A> {
    pub fn new(generator: G, engine: A, config: SessionConfig) -> Self {
        Self { generator, engine, config }
    }

    /// Processes every section in order. Only console I/O errors end the run early.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        sections: &SectionSet,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<SessionReport> {
        let mut report = SessionReport::default();

        for (title, body) in sections.iter() {
            writeln!(out, "\n=== Section: {} ===", title)?;
            if body.trim().is_empty() {
                writeln!(out, "This section is empty. Nothing to query.")?;
                report.sections_skipped += 1;
                continue;
            }

            report.sections_queried += 1;
            writeln!(out, "\nAutomatically generated questions and answers:")?;
            let questions = match self.generate_questions(body).await {
                Ok(questions) => questions,
                Err(e) => {
                    tracing::warn!("Question generation failed: {}", e);
                    writeln!(out, "Error while generating questions: {}", e)?;
                    report.generation_failures += 1;
                    Vec::new()
                }
            };
            self.answer_generated(&questions, body, out, &mut report).await?;
            self.interactive(body, input, out, &mut report).await?;
            tracing::debug!("Finished section '{}'", title);
        }

        tracing::info!("Session finished: {:?}", report);
        Ok(report)
    }

    /// Asks the generator for candidates and deduplicates them.
    async fn generate_questions(&self, body: &str) -> Result<Vec<String>, GenerationError> {
        let context = truncate_chars(body, self.config.context_chars);
        let prompt = format!("{}{}", self.config.prompt_prefix, context);
        tracing::debug!("Generation prompt has {} characters", prompt.chars().count());

        let candidates = self.generator.generate(&prompt, self.config.generation).await?;
        Ok(dedup_questions(candidates))
    }

    async fn answer_generated<W: Write>(
        &self,
        questions: &[String],
        body: &str,
        out: &mut W,
        report: &mut SessionReport,
    ) -> io::Result<()> {
        for question in questions {
            match self.engine.answer(question, body).await {
                Ok(result) => {
                    writeln!(out, "\nQuestion : {}", question)?;
                    writeln!(out, "Answer   : {} (Score : {:.4})", result.answer, result.score)?;
                    report.generated_answered += 1;
                }
                Err(e) => {
                    tracing::warn!("Answering '{}' failed: {}", question, e);
                    writeln!(out, "Error while processing question '{}': {}", question, e)?;
                    report.answer_failures += 1;
                }
            }
        }
        Ok(())
    }

    /// Reads questions until "exit" or end of input.
    async fn interactive<R: BufRead, W: Write>(
        &self,
        body: &str,
        input: &mut R,
        out: &mut W,
        report: &mut SessionReport,
    ) -> io::Result<()> {
        writeln!(
            out,
            "\nYou can now ask your own questions about this section (type '{}' to move on to the next section).",
            EXIT_COMMAND
        )?;

        loop {
            write!(out, "Question : ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                tracing::debug!("End of input, leaving interactive mode");
                return Ok(());
            }

            let question = line.trim();
            if question.eq_ignore_ascii_case(EXIT_COMMAND) {
                return Ok(());
            }
            if question.is_empty() {
                continue;
            }

            match self.engine.answer(question, body).await {
                Ok(result) => {
                    writeln!(out, "Answer : {} (Score : {:.4})\n", result.answer, result.score)?;
                    report.interactive_answered += 1;
                }
                Err(e) => {
                    tracing::warn!("Answering '{}' failed: {}", question, e);
                    writeln!(out, "Error while generating the answer: {}", e)?;
                    report.answer_failures += 1;
                }
            }
        }
    }
}

/// The first `max_chars` characters of `text` (not bytes, not words).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

/// Trims candidates, drops empty ones and keeps only the first occurrence of each.
pub fn dedup_questions(candidates: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|q| !q.is_empty() && seen.insert(q.clone()))
        .collect()
}
