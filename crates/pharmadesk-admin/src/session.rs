//! Signed-in admin context.
//!
//! The session is created when the identity provider reports a signed-in
//! user and torn down at sign-out. UI preferences that belong to the
//! visit (theme, sidebar) live on it instead of in process globals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AdminError;

/// Role string that grants dashboard access.
pub const ADMIN_ROLE: &str = "admin";

/// User profile as returned by the identity provider's user document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

impl AdminUser {
    /// Create a user profile.
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: role.into(),
        }
    }

    /// Whether the role grants dashboard access.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Saved preference if any, otherwise the system preference.
    pub fn resolve(saved: Option<Theme>, prefers_dark: bool) -> Self {
        match saved {
            Some(theme) => theme,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Context for one signed-in visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSession {
    pub user: AdminUser,
    pub theme: Theme,
    pub sidebar_open: bool,
    pub started_at: DateTime<Utc>,
}

impl AdminSession {
    /// Start a session with the sidebar closed.
    pub fn new(user: AdminUser, theme: Theme) -> Self {
        Self {
            user,
            theme,
            sidebar_open: false,
            started_at: Utc::now(),
        }
    }

    /// Flip the sidebar and return the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Owns the session across sign-in and sign-out.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<AdminSession>,
}

impl SessionManager {
    /// Create a manager with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `user`, replacing any previous one.
    pub fn sign_in(&mut self, user: AdminUser, theme: Theme) -> &AdminSession {
        tracing::info!(email = %user.email, role = %user.role, "session started");
        self.current.insert(AdminSession::new(user, theme))
    }

    /// Tear the session down, returning it.
    pub fn sign_out(&mut self) -> Option<AdminSession> {
        let session = self.current.take();
        if let Some(session) = &session {
            tracing::info!(email = %session.user.email, "session ended");
        }
        session
    }

    /// The active session.
    pub fn session(&self) -> Result<&AdminSession, AdminError> {
        self.current.as_ref().ok_or(AdminError::NotSignedIn)
    }

    /// The active session, mutably.
    pub fn session_mut(&mut self) -> Result<&mut AdminSession, AdminError> {
        self.current.as_mut().ok_or(AdminError::NotSignedIn)
    }

    /// The active session, if its user is an admin.
    pub fn require_admin(&self) -> Result<&AdminSession, AdminError> {
        let session = self.session()?;
        if !session.user.is_admin() {
            return Err(AdminError::NotAuthorized(session.user.role.clone()));
        }
        Ok(session)
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminUser {
        AdminUser::new("ops@pharmacy.example", "Ops", "admin")
    }

    #[test]
    fn test_no_session_before_sign_in() {
        let manager = SessionManager::new();
        assert_eq!(manager.session().unwrap_err(), AdminError::NotSignedIn);
        assert!(!manager.is_signed_in());
    }

    #[test]
    fn test_sign_in_then_out() {
        let mut manager = SessionManager::new();
        manager.sign_in(admin(), Theme::Dark);
        assert_eq!(manager.session().unwrap().theme, Theme::Dark);
        assert!(manager.require_admin().is_ok());

        let ended = manager.sign_out().unwrap();
        assert_eq!(ended.user.email, "ops@pharmacy.example");
        assert_eq!(manager.require_admin().unwrap_err(), AdminError::NotSignedIn);
        assert!(manager.sign_out().is_none());
    }

    #[test]
    fn test_non_admin_role_is_rejected() {
        let mut manager = SessionManager::new();
        manager.sign_in(AdminUser::new("c@x.example", "C", "customer"), Theme::Light);
        assert_eq!(
            manager.require_admin().unwrap_err(),
            AdminError::NotAuthorized("customer".to_string())
        );
    }

    #[test]
    fn test_role_comparison_is_exact() {
        assert!(!AdminUser::new("a", "a", "Admin").is_admin());
        assert!(admin().is_admin());
    }

    #[test]
    fn test_ui_preferences_live_on_session() {
        let mut manager = SessionManager::new();
        manager.sign_in(admin(), Theme::Light);
        let session = manager.session_mut().unwrap();
        assert!(!session.sidebar_open);
        assert!(session.toggle_sidebar());
        assert_eq!(session.toggle_theme(), Theme::Dark);

        manager.sign_out();
        manager.sign_in(admin(), Theme::Light);
        assert!(!manager.session().unwrap().sidebar_open);
    }

    #[test]
    fn test_theme_resolution() {
        assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(None, false), Theme::Light);
    }
}
