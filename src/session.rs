//! Sessions and the simulated auth backend
//!
//! There is no real identity provider: customer logins always succeed, the
//! Google path returns a fixed profile, and the admin login checks the
//! configured credential pair. Sessions are keyed by an opaque session id
//! supplied by the client and mirrored to the `users` document so they
//! survive restarts. Absence of a stored user means unauthenticated.

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::storage::{JsonStore, DOC_USERS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Customer,
}

pub struct SessionService {
    store: JsonStore,
    sessions: RwLock<HashMap<String, User>>,
    admin_username: String,
    admin_password: String,
    simulated_delay: Duration,
}

impl SessionService {
    /// Restores persisted sessions from the document store.
    pub fn open(store: JsonStore, config: &Config) -> Result<Self> {
        let sessions = store.load::<HashMap<String, User>>(DOC_USERS)?.unwrap_or_default();
        Ok(Self {
            store,
            sessions: RwLock::new(sessions),
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
            simulated_delay: Duration::from_millis(config.auth_delay_ms),
        })
    }

    /// Mock customer login: any credentials are accepted and the display
    /// name is the email's local part.
    pub async fn login(&self, session: &str, email: &str, _password: &str) -> Result<User> {
        self.simulate_backend().await;
        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            id: "1".to_string(),
            email: email.to_string(),
            name,
            role: Role::Customer,
            avatar: None,
        };
        self.persist(session, user.clone()).await?;
        Ok(user)
    }

    pub async fn login_with_google(&self, session: &str) -> Result<User> {
        self.simulate_backend().await;
        let user = User {
            id: "google-1".to_string(),
            email: "user@gmail.com".to_string(),
            name: "Google User".to_string(),
            role: Role::Customer,
            avatar: Some("https://via.placeholder.com/40".to_string()),
        };
        self.persist(session, user.clone()).await?;
        Ok(user)
    }

    /// Admin login checks the configured credential pair. A failed check
    /// creates no session.
    pub async fn admin_login(&self, session: &str, username: &str, password: &str) -> Result<User> {
        if username != self.admin_username || password != self.admin_password {
            return Err(StoreError::InvalidCredentials);
        }
        self.simulate_backend().await;
        let user = User {
            id: "admin-1".to_string(),
            email: "admin@fruitbasket.com".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
            avatar: None,
        };
        self.persist(session, user.clone()).await?;
        Ok(user)
    }

    pub async fn logout(&self, session: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session);
        self.store.save(DOC_USERS, &*sessions)?;
        Ok(())
    }

    pub async fn current_user(&self, session: &str) -> Option<User> {
        self.sessions.read().await.get(session).cloned()
    }

    pub async fn require_admin(&self, session: &str) -> Result<User> {
        match self.current_user(session).await {
            Some(user) if user.role == Role::Admin => Ok(user),
            _ => Err(StoreError::AdminRequired),
        }
    }

    async fn persist(&self, session: &str, user: User) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.to_string(), user);
        self.store.save(DOC_USERS, &*sessions)?;
        Ok(())
    }

    async fn simulate_backend(&self) {
        if !self.simulated_delay.is_zero() {
            tokio::time::sleep(self.simulated_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn service() -> SessionService {
        let dir = std::env::temp_dir().join(format!("fb-session-{}", Uuid::new_v4()));
        let config = Config::for_tests(dir.clone());
        SessionService::open(JsonStore::open(dir).unwrap(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_customer_login_always_succeeds() {
        let svc = service();
        let user = svc.login("s1", "maya@example.com", "whatever").await.unwrap();
        assert_eq!(user.name, "maya");
        assert_eq!(user.role, Role::Customer);
        assert_eq!(svc.current_user("s1").await, Some(user));
    }

    #[tokio::test]
    async fn test_admin_login_checks_credentials() {
        let svc = service();
        let user = svc.admin_login("s1", "admin", "password").await.unwrap();
        assert_eq!(user.role, Role::Admin);
        assert!(svc.require_admin("s1").await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_admin_credentials_create_no_session() {
        let svc = service();
        let err = svc.admin_login("s1", "x", "y").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(svc.current_user("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_customer_is_not_admin() {
        let svc = service();
        svc.login("s1", "maya@example.com", "pw").await.unwrap();
        assert!(matches!(svc.require_admin("s1").await, Err(StoreError::AdminRequired)));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let svc = service();
        svc.login("s1", "a@b.com", "pw").await.unwrap();
        svc.logout("s1").await.unwrap();
        assert!(svc.current_user("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_survive_reopen() {
        let dir = std::env::temp_dir().join(format!("fb-session-{}", Uuid::new_v4()));
        let config = Config::for_tests(dir.clone());
        {
            let svc = SessionService::open(JsonStore::open(&dir).unwrap(), &config).unwrap();
            svc.login("s1", "a@b.com", "pw").await.unwrap();
        }
        let svc = SessionService::open(JsonStore::open(&dir).unwrap(), &config).unwrap();
        assert!(svc.current_user("s1").await.is_some());
    }
}
