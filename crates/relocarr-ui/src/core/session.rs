//! Session lifecycle primitives.
//!
//! # Design
//! - Keep the three-valued phase as explicit store data rather than a
//!   module-level flag so transitions stay testable.
//! - Forward backend error text verbatim; the login form renders it as-is.
//! - A successful config fetch is the authentication signal, and the config
//!   body rides along in the slice.

use relocarr_api_models::ConfigView;

/// Authentication lifecycle for the browser session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// The initial probe has not settled yet.
    #[default]
    Unknown,
    /// The session cookie is valid.
    Authenticated,
    /// No valid session; the login form is shown.
    Unauthenticated,
}

/// Session slice of the app store.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionSlice {
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Redacted backend config, present while authenticated.
    pub config: Option<ConfigView>,
    /// Last authentication error, forwarded verbatim.
    pub error: Option<String>,
}

/// Record a successful config probe.
pub fn establish(slice: &mut SessionSlice, config: ConfigView) {
    slice.phase = SessionPhase::Authenticated;
    slice.config = Some(config);
    slice.error = None;
}

/// Record a failed probe, a rejected login, or an explicit logout.
pub fn invalidate(slice: &mut SessionSlice, error: Option<String>) {
    slice.phase = SessionPhase::Unauthenticated;
    slice.config = None;
    slice.error = error;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_starts_unknown() {
        let slice = SessionSlice::default();
        assert_eq!(slice.phase, SessionPhase::Unknown);
        assert!(slice.config.is_none());
        assert!(slice.error.is_none());
    }

    #[test]
    fn establish_clears_prior_errors() {
        let mut slice = SessionSlice::default();
        invalidate(&mut slice, Some("Invalid credentials".to_string()));
        assert_eq!(slice.phase, SessionPhase::Unauthenticated);
        establish(&mut slice, ConfigView::default());
        assert_eq!(slice.phase, SessionPhase::Authenticated);
        assert!(slice.error.is_none());
        assert!(slice.config.is_some());
    }

    #[test]
    fn invalidate_keeps_error_text_verbatim() {
        let mut slice = SessionSlice::default();
        establish(&mut slice, ConfigView::default());
        invalidate(&mut slice, Some("503 Service Unavailable".to_string()));
        assert_eq!(slice.error.as_deref(), Some("503 Service Unavailable"));
        assert!(slice.config.is_none());
    }
}
