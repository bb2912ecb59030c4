use serde::{Deserialize, Serialize};

/// Who said a given turn of a shared conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Canonical label used when a transcript is rendered back to text.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "AI",
        }
    }
}

/// One attributed turn of a parsed conversation.
/// Owned by the chat post that contains it; never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSegment {
    pub id: String,
    pub role: Role,
    pub content: String,

    /// Zero-based position in the conversation.
    pub order: usize,
}
