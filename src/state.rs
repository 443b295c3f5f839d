//! View state and the transitions that move it.
//!
//! Flows never write fields directly. They describe what happened as a
//! [`Transition`] and the owner applies it, so there is exactly one writer.

/// Initial content, standing in for "nothing generated yet".
pub const PLACEHOLDER: &str = "Ideas will appear here...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub prompt: String,
    pub generated_content: String,
    pub loading: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A generation call is about to be issued.
    Begin,
    /// The call produced content.
    Succeeded(String),
    /// The attempt ended with this message.
    Failed(String),
    /// The attempt is over, whatever its outcome.
    Settled,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            generated_content: PLACEHOLDER.to_string(),
            loading: false,
            error_message: None,
        }
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Begin => {
                self.loading = true;
                self.error_message = None;
            }
            Transition::Succeeded(text) => self.generated_content = text,
            Transition::Failed(message) => self.error_message = Some(message),
            Transition::Settled => self.loading = false,
        }
    }

    /// Whether real content exists (not empty, not the placeholder).
    pub fn has_content(&self) -> bool {
        has_content(&self.generated_content)
    }

    /// The generate trigger is disabled while a call is in flight.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// The export triggers are disabled until real content exists.
    pub fn can_export(&self) -> bool {
        self.has_content()
    }
}

pub fn has_content(content: &str) -> bool {
    !content.is_empty() && content != PLACEHOLDER
}
