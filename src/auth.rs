use std::sync::RwLock;

/// Read-only authentication capability the pipeline depends on. The login
/// flow itself is an external collaborator; `login` is fire-and-forget and
/// flips the authenticated state when the platform completes it.
pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;
    fn user_id(&self) -> Option<String>;
    fn login(&self, user_id: &str);
    fn logout(&self);
}

/// In-process session auth: one signed-in user per server session.
#[derive(Default)]
pub struct SessionAuth {
    user: RwLock<Option<String>>,
}

impl SessionAuth {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: RwLock::new(Some(user_id.into())),
        }
    }
}

impl AuthProvider for SessionAuth {
    fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .map(|u| u.as_deref().is_some_and(|id| !id.is_empty()))
            .unwrap_or(false)
    }

    fn user_id(&self) -> Option<String> {
        self.user.read().ok()?.clone()
    }

    fn login(&self, user_id: &str) {
        if user_id.is_empty() {
            return;
        }
        if let Ok(mut user) = self.user.write() {
            *user = Some(user_id.to_string());
        }
    }

    fn logout(&self) {
        if let Ok(mut user) = self.user.write() {
            *user = None;
        }
    }
}
