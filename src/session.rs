use crate::model::{Role, School, User};
use crate::store::EntityStore;
use thiserror::Error;

pub const LOGIN_FAILED_MESSAGE: &str = "Email ou senha inválidos. Tente novamente.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    /// Unknown email or empty password. Deliberately indistinguishable.
    #[error("{}", LOGIN_FAILED_MESSAGE)]
    InvalidCredentials,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("only the secretary can switch school scope")]
    NotSecretary,
    #[error("school not found: {0}")]
    UnknownSchool(String),
}

/// Who is signed in and, for the secretary, which school the screens are narrowed to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<User>,
    selected_school: Option<School>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn selected_school(&self) -> Option<&School> {
        self.selected_school.as_ref()
    }

    /// The password is not checked beyond being non-empty.
    pub fn login(&mut self, store: &EntityStore, email: &str, password: &str) -> Result<&User, LoginError> {
        if password.is_empty() {
            tracing::info!(email, "login rejected: empty password");
            return Err(LoginError::InvalidCredentials);
        }
        let Some(user) = store.user_by_email(email) else {
            tracing::info!(email, "login rejected: unknown email");
            return Err(LoginError::InvalidCredentials);
        };
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "login");
        self.selected_school = None;
        Ok(self.current_user.insert(user.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(u) = self.current_user.take() {
            tracing::info!(user_id = %u.id, "logout");
        }
        self.selected_school = None;
    }

    /// `None` clears the scope and restores the network-wide view.
    pub fn set_selected_school(&mut self, store: &EntityStore, school_id: Option<&str>) -> Result<(), ScopeError> {
        let role = self.role().ok_or(ScopeError::Unauthenticated)?;
        if role != Role::Secretary {
            tracing::warn!(role = role.as_str(), "school scope change denied");
            return Err(ScopeError::NotSecretary);
        }
        self.selected_school = match school_id {
            None => None,
            Some(id) => Some(
                store
                    .school(id)
                    .cloned()
                    .ok_or_else(|| ScopeError::UnknownSchool(id.to_string()))?,
            ),
        };
        tracing::info!(
            school_id = self.selected_school.as_ref().map(|s| s.id.as_str()).unwrap_or("all"),
            "school scope changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn store() -> EntityStore {
        EntityStore::load(seed::generate(1, NaiveDate::from_ymd_opt(2025, 3, 31).expect("date")))
            .expect("load")
    }

    #[test]
    fn secretary_login_with_any_password() {
        let store = store();
        let mut session = Session::new();
        let user = session
            .login(&store, "secretario@estacaotech.com", "whatever")
            .expect("login");
        assert_eq!(user.role, Role::Secretary);
        assert_eq!(session.role(), Some(Role::Secretary));
    }

    #[test]
    fn unknown_email_leaves_session_unauthenticated() {
        let store = store();
        let mut session = Session::new();
        assert_eq!(
            session.login(&store, "nobody@x.com", "pw").map(|u| u.id.clone()),
            Err(LoginError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
    }

    #[test]
    fn email_must_match_exactly() {
        let store = store();
        let mut session = Session::new();
        assert!(session.login(&store, " secretario@estacaotech.com ", "pw").is_err());
        assert!(session.login(&store, "Secretario@estacaotech.com", "pw").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn empty_password_is_rejected() {
        let store = store();
        let mut session = Session::new();
        assert!(session.login(&store, "maria@estacaotech.com", "").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_user_and_scope() {
        let store = store();
        let mut session = Session::new();
        session
            .login(&store, "secretario@estacaotech.com", "x")
            .expect("login");
        session
            .set_selected_school(&store, Some("school2"))
            .expect("scope");
        assert_eq!(session.selected_school().map(|s| s.id.as_str()), Some("school2"));
        session.logout();
        assert!(session.user().is_none());
        assert!(session.selected_school().is_none());
    }

    #[test]
    fn only_secretary_switches_scope() {
        let store = store();
        let mut session = Session::new();
        assert_eq!(
            session.set_selected_school(&store, Some("school1")),
            Err(ScopeError::Unauthenticated)
        );
        session.login(&store, "maria@estacaotech.com", "x").expect("login");
        assert_eq!(
            session.set_selected_school(&store, Some("school1")),
            Err(ScopeError::NotSecretary)
        );
        assert!(session.selected_school().is_none());
    }

    #[test]
    fn unknown_school_keeps_previous_scope() {
        let store = store();
        let mut session = Session::new();
        session
            .login(&store, "secretario@estacaotech.com", "x")
            .expect("login");
        session
            .set_selected_school(&store, Some("school1"))
            .expect("scope");
        assert_eq!(
            session.set_selected_school(&store, Some("school99")),
            Err(ScopeError::UnknownSchool("school99".to_string()))
        );
        assert_eq!(session.selected_school().map(|s| s.id.as_str()), Some("school1"));
    }
}
