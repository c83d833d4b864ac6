// src/services/chatbot.rs
use std::sync::Arc;

use super::model::{ModelError, TextModel};

/// Prefix of every reply that reports a failed provider call instead of
/// model output.
pub const ERROR_MARKER: &str = "❌ Error from Gemini:";

const SYSTEM_PROMPT: &str = "You are StudyBuddy, a helpful, concise, and student-friendly AI tutor. \
Your job is to assist university-level computer science students in understanding topics from their \
syllabus, including subjects like Data Structures, Operating Systems, Machine Learning, Algorithms, \
DBMS, and Networks.

🎯 Your capabilities include:

1. Topic Explanation: Explain any CS topic (e.g., \"Explain AVL Tree with code\") in a short, simple, \
and clear way using clean, commented code examples when applicable.

2. Quiz Mode: When asked for a quiz, generate 3 MCQs based on the requested topic. Ensure only one \
correct answer and provide the correct answer at the end.

3. Bookmarking (Optional): Suggest what users might want to bookmark for later revision.

💡 Be beginner-friendly, use short paragraphs, bullet points, and clear code.

🚫 Avoid long textbook-style answers. Focus on clarity. Only use complex math when asked.

👨‍🏫 Examples:

- Input: \"Explain AVL Tree with code\" → Give a short intro + clean code with comments.
- Input: \"Quiz me on Operating Systems\" → 3 MCQs + answers.
";

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Persona preamble followed by the user's text. Nothing else is sent:
/// each call is stateless from the model's side.
pub fn build_prompt(user_prompt: &str) -> String {
    format!("{}\n\nUser: {}", SYSTEM_PROMPT, user_prompt)
}

pub fn error_reply(err: &ModelError) -> String {
    format!("{} {}", ERROR_MARKER, err)
}

/// The tutor in front of the hosted model. Built once at startup and shared
/// by every request.
#[derive(Clone)]
pub struct Chatbot {
    model: Arc<dyn TextModel>,
}

impl Chatbot {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// One provider call; success and failure stay distinguishable.
    pub async fn generate(&self, user_prompt: &str) -> Result<String, ModelError> {
        let prompt = build_prompt(user_prompt);
        tracing::debug!(model = self.model_name(), chars = prompt.len(), "calling model");
        self.model.generate_content(&prompt).await
    }

    /// Never fails: provider errors come back as text starting with
    /// [`ERROR_MARKER`].
    pub async fn generate_response(&self, user_prompt: &str) -> String {
        match self.generate(user_prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "model call failed");
                error_reply(&err)
            }
        }
    }
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("model", &self.model_name())
            .finish()
    }
}
