//! Placeholder LLM backend for the site chat widget.
//!
//! Echoes the last user message until a real model is wired in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

pub fn call_llm(messages: &[ChatMessage]) -> String {
    let text = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("Hello from placeholder call_llm()");

    format!("Echo from server: {}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: Role, content: &str) -> ChatMessage {
        ChatMessage {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn echoes_last_user_message() {
        let messages = vec![
            msg(Role::System, "be helpful"),
            msg(Role::User, "first"),
            msg(Role::Assistant, "Echo from server: first"),
            msg(Role::User, "second"),
        ];

        assert_eq!(call_llm(&messages), "Echo from server: second");
    }

    #[test]
    fn falls_back_when_no_user_message() {
        let messages = vec![msg(Role::System, "be helpful")];

        assert_eq!(
            call_llm(&messages),
            "Echo from server: Hello from placeholder call_llm()"
        );
    }

    #[test]
    fn roles_deserialize_lowercase() {
        let message: ChatMessage =
            serde_json::from_str(r#"{ "role": "assistant", "content": "hi" }"#).unwrap();
        assert_eq!(message.role, Role::Assistant);
    }
}
