use api::Error;

/// Transient feedback for the last user action. Cleared when the next one starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl Notice {
    pub fn clear(&mut self) {
        self.message = None;
        self.error = None;
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.message = None;
        self.error = Some(message.into());
    }

    pub fn fail_with(&mut self, error: &Error) {
        self.fail(error.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.error.is_none()
    }
}
