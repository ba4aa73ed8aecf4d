use serde::{Deserialize, Serialize};

pub const STATUS_CLEAR_MS: u32 = 5_000;
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 5_000;
pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_EMAIL_CHARS: usize = 320;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Sent,
    Failed,
}

impl SubmitStatus {
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Sent => Some("Message sent successfully! I'll get back to you soon."),
            Self::Failed => Some("Failed to send message. Please try again later."),
            Self::Idle | Self::Submitting => None,
        }
    }
}

pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Trims every field and checks it against the relay's limits.
pub fn validate(message: &ContactMessage, max_message_chars: usize) -> Result<ContactMessage, &'static str> {
    let name = message.name.trim();
    let email = message.email.trim();
    let body = message.message.trim();

    if name.is_empty() || email.is_empty() || body.is_empty() {
        return Err("all fields are required");
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err("name is too long");
    }
    if email.chars().count() > MAX_EMAIL_CHARS || !looks_like_email(email) {
        return Err("email address is invalid");
    }
    if body.chars().count() > max_message_chars {
        return Err("message is too long");
    }

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: body.to_string(),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactMessage,
    pub status: SubmitStatus,
    pub error: Option<&'static str>,
}

impl ContactForm {
    pub fn edit(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.fields.name = value,
            ContactField::Email => self.fields.email = value,
            ContactField::Message => self.fields.message = value,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Returns the message to relay, or `None` when nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.is_submitting() {
            return None;
        }

        match validate(&self.fields, DEFAULT_MAX_MESSAGE_CHARS) {
            Ok(message) => {
                self.status = SubmitStatus::Submitting;
                self.error = None;
                Some(message)
            }
            Err(reason) => {
                self.status = SubmitStatus::Failed;
                self.error = Some(reason);
                None
            }
        }
    }

    pub fn settle(&mut self, delivered: bool) {
        if delivered {
            self.fields = ContactMessage::default();
            self.status = SubmitStatus::Sent;
            self.error = None;
        } else {
            self.status = SubmitStatus::Failed;
        }
    }

    pub fn clear_status(&mut self) {
        if !self.is_submitting() {
            self.status = SubmitStatus::Idle;
            self.error = None;
        }
    }
}
