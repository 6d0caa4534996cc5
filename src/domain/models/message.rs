use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// The unit exchanged with the model. Every call is a fresh single-turn
/// exchange; nothing is remembered between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMessage {
    pub role: Role,
    pub content: String,
}

impl GenerationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_serializes_lowercase_role() {
        let json = serde_json::to_value(GenerationMessage::user("привет")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "привет");
    }

    #[test]
    fn only_user_and_assistant_roles_are_accepted() {
        let reply: GenerationMessage =
            serde_json::from_str(r#"{"role": "assistant", "content": "ок"}"#).unwrap();
        assert_eq!(reply.role, Role::Assistant);

        let system = r#"{"role": "system", "content": ""}"#;
        assert!(serde_json::from_str::<GenerationMessage>(system).is_err());
    }
}
