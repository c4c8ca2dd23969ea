//! Session state shared through the app context, and the route guard's
//! decision table.

use crate::policy::Role;
use crate::SessionUser;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub username: String,
    pub name: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Set(SessionUser),
    Clear,
}

impl AuthState {
    pub fn apply(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Set(user) => AuthState {
                is_authenticated: true,
                username: user.username,
                name: user.name,
                is_admin: user.is_admin,
            },
            SessionAction::Clear => AuthState::default(),
        }
    }

    pub fn role(&self) -> Role {
        Role::from_is_admin(self.is_admin)
    }

    /// Name shown in the header, falling back to the username
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }

    /// Up to two initials for the avatar; `U` when there is no name
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Outcome of a protected route's session check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still in flight
    Pending,
    Allow,
    RedirectToLogin,
    /// Signed in, but the route is admin-only
    RedirectHome,
}

/// `checked` is `None` while the session check is pending, otherwise the
/// confirmed user (or `None` inside when the check failed or came back
/// unauthenticated).
pub fn guard_decision(checked: Option<Option<&SessionUser>>, require_admin: bool) -> GuardDecision {
    match checked {
        None => GuardDecision::Pending,
        Some(None) => GuardDecision::RedirectToLogin,
        Some(Some(user)) if require_admin && !user.is_admin => GuardDecision::RedirectHome,
        Some(Some(_)) => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, is_admin: bool) -> SessionUser {
        SessionUser {
            username: "ana@example.com".to_string(),
            name: name.to_string(),
            is_admin,
        }
    }

    #[test]
    fn test_set_and_clear() {
        let state = AuthState::default().apply(SessionAction::Set(user("Ana Lopez", true)));
        assert!(state.is_authenticated);
        assert_eq!(state.role(), Role::Admin);

        let cleared = state.apply(SessionAction::Clear);
        assert_eq!(cleared, AuthState::default());
        assert_eq!(cleared.role(), Role::User);
    }

    #[test]
    fn test_initials() {
        let state = AuthState::default().apply(SessionAction::Set(user("ana maria lopez", false)));
        assert_eq!(state.initials(), "AM");
        assert_eq!(AuthState::default().initials(), "U");

        let blank = AuthState::default().apply(SessionAction::Set(user("   ", false)));
        assert_eq!(blank.initials(), "U");
        assert_eq!(blank.display_name(), "ana@example.com");
    }

    #[test]
    fn test_guard_decisions() {
        let admin = user("Ana", true);
        let member = user("Sam", false);
        assert_eq!(guard_decision(None, false), GuardDecision::Pending);
        assert_eq!(guard_decision(Some(None), false), GuardDecision::RedirectToLogin);
        assert_eq!(guard_decision(Some(Some(&member)), false), GuardDecision::Allow);
        assert_eq!(guard_decision(Some(Some(&member)), true), GuardDecision::RedirectHome);
        assert_eq!(guard_decision(Some(Some(&admin)), true), GuardDecision::Allow);
    }
}
