//! Chatwoot webhook payload types and the reply-eligibility filter.
//!
//! Every field is optional: Chatwoot sends many event kinds to the same
//! endpoint and the handler must accept all of them, answering only the
//! ones that pass [`WebhookEvent::eligibility`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound webhook body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub conversation: Option<IdRef>,
    #[serde(default)]
    pub account: Option<IdRef>,
    #[serde(default)]
    pub inbox: Option<IdRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Set for agents (`"agent"`, `"administrator"`), absent for contacts.
    #[serde(default)]
    pub role: Option<String>,
    /// Set for agents, absent for contacts.
    #[serde(default, deserialize_with = "lenient_id")]
    pub account_id: Option<u64>,
    #[serde(default, rename = "type")]
    pub sender_type: Option<String>,
}

impl Sender {
    /// Agents carry a role or an account id; contacts carry neither.
    #[must_use]
    pub fn is_agent(&self) -> bool {
        let has_role = self.role.as_deref().is_some_and(|r| !r.trim().is_empty());
        let has_account = self.account_id.is_some_and(|id| id != 0);
        has_role || has_account
    }
}

/// `{"id": ...}` reference to a conversation, account or inbox.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IdRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
}

/// Why a webhook event is not answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotIncoming,
    NotMessageCreated,
    Private,
    EmptyContent,
    MissingSender,
    FromAgent,
    MissingConversation,
    MissingAccount,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotIncoming => "not_incoming",
            Self::NotMessageCreated => "not_message_created",
            Self::Private => "private",
            Self::EmptyContent => "empty_content",
            Self::MissingSender => "missing_sender",
            Self::FromAgent => "from_agent",
            Self::MissingConversation => "missing_conversation",
            Self::MissingAccount => "missing_account",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer message that should be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleMessage {
    pub account_id: u64,
    pub conversation_id: u64,
    pub inbox_id: Option<u64>,
    pub content: String,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
}

impl WebhookEvent {
    /// Decides whether this event is a new, public, non-empty message from
    /// a contact, and extracts what the reply flow needs.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`SkipReason`], in this order:
    /// message type, event, privacy, content, sender, conversation, account.
    pub fn eligibility(&self) -> Result<EligibleMessage, SkipReason> {
        if self.message_type.as_deref() != Some("incoming") {
            return Err(SkipReason::NotIncoming);
        }
        if self.event.as_deref() != Some("message_created") {
            return Err(SkipReason::NotMessageCreated);
        }
        if self.private == Some(true) {
            return Err(SkipReason::Private);
        }
        let content = self
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(SkipReason::EmptyContent)?;
        let sender = self.sender.as_ref().ok_or(SkipReason::MissingSender)?;
        if sender.is_agent() {
            return Err(SkipReason::FromAgent);
        }
        let conversation_id = self
            .conversation
            .and_then(|c| c.id)
            .ok_or(SkipReason::MissingConversation)?;
        let account_id = self
            .account
            .and_then(|a| a.id)
            .ok_or(SkipReason::MissingAccount)?;

        Ok(EligibleMessage {
            account_id,
            conversation_id,
            inbox_id: self.inbox.and_then(|i| i.id),
            content: content.to_owned(),
            sender_name: sender.name.clone(),
            sender_email: sender.email.clone(),
        })
    }
}

/// Accepts ids as JSON numbers or numeric strings; anything else is `None`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
