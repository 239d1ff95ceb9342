//! Per-request input to the gate.

use paygate_core::SessionId;

/// What the host knows about the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    session_id: SessionId,
    callback_code: Option<String>,
}

impl RequestContext {
    /// Creates a context with no callback code.
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            callback_code: None,
        }
    }

    /// Attaches the authorization code from the provider's redirect.
    ///
    /// Empty codes are ignored.
    #[must_use]
    pub fn with_callback_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.callback_code = (!code.is_empty()).then_some(code);
        self
    }

    /// Returns the session ID.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns whether a callback code is still present.
    #[must_use]
    pub fn has_callback_code(&self) -> bool {
        self.callback_code.is_some()
    }

    /// Removes and returns the callback code.
    ///
    /// Codes are single-use; once taken they are gone from the context.
    pub fn take_callback_code(&mut self) -> Option<String> {
        self.callback_code.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_taken_once() {
        let mut ctx = RequestContext::new(SessionId::from("s")).with_callback_code("4/0Ab");
        assert!(ctx.has_callback_code());
        assert_eq!(ctx.take_callback_code().as_deref(), Some("4/0Ab"));
        assert_eq!(ctx.take_callback_code(), None);
        assert!(!ctx.has_callback_code());
    }

    #[test]
    fn empty_code_is_ignored() {
        let ctx = RequestContext::new(SessionId::from("s")).with_callback_code("");
        assert!(!ctx.has_callback_code());
    }
}
