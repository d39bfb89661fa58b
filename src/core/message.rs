#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Role of a message in a chat conversation.
pub enum Role {
    /// System messages provide instructions to the model.
    System,
    /// User messages are sent from the user to the model.
    User,
    /// Assistant messages are responses from the model.
    Assistant,
    /// Tool messages carry the result of a tool call back to the model.
    Tool,
}

impl Role {
    /// Returns the string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// An individual message in a chat.
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Create a new system message.
    ///
    /// It's not recommended to use more than one of these in a given chat.
    pub fn system(content: &str) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a new user message.
    pub fn user(content: &str) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: &str) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a message holding a tool result.
    pub fn tool(content: &str) -> Self {
        Self::new(Role::Tool, content)
    }

    fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    /// Get the role of the message.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Get the content of the message.
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role_and_content() {
        let message = Message::user("What is the weather in Dayton?");
        assert_eq!(message.role(), &Role::User);
        assert_eq!(message.content(), "What is the weather in Dayton?");
        assert_eq!(Message::system("Give a one or two word answers only.").role(), &Role::System);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Message::tool("42")).unwrap();
        assert_eq!(json, r#"{"role":"tool","content":"42"}"#);
    }
}
