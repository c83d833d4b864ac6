// src/ui/page.rs
use minijinja::{Environment, context};
use serde::Serialize;

use crate::services::session_manager::{ApiStatus, Message};

const CHAT_TEMPLATE: &str = include_str!("../../templates/chat.html");

pub const QUICK_ACTIONS: [(&str, &str); 3] = [
    ("📚 Explain Topic", "Explain binary search with code"),
    ("❓ Take Quiz", "Give me a quiz on data structures"),
    ("💡 Study Tips", "Give me study tips for algorithms"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn empty_input() -> Self {
        Notice::Warning("⚠️ Please enter a message before sending.".to_string())
    }

    pub fn offline() -> Self {
        Notice::Error(
            "❌ StudyBuddy is currently offline. Please check if the backend server is running."
                .to_string(),
        )
    }
}

#[derive(Serialize)]
struct QuickAction {
    label: &'static str,
    prompt: &'static str,
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        // `.html` names get HTML auto-escaping.
        env.add_template("chat.html", CHAT_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render(
        &self,
        session_id: &str,
        messages: &[Message],
        status: ApiStatus,
        notice: Option<&Notice>,
    ) -> Result<String, minijinja::Error> {
        let quick_actions: Vec<QuickAction> = QUICK_ACTIONS
            .iter()
            .map(|&(label, prompt)| QuickAction { label, prompt })
            .collect();

        self.env.get_template("chat.html")?.render(context! {
            session_id => session_id,
            messages => messages,
            online => status.is_online(),
            notice => notice,
            quick_actions => quick_actions,
        })
    }
}
