use super::repo_types::User;

/// Decides whether an authenticated user holds administrator capability.
pub trait AdminPolicy: Send + Sync {
    fn is_admin(&self, user: &User) -> bool;
}

/// Exactly one administrator, identified by email.
pub struct SingleAdmin {
    email: String,
}

impl SingleAdmin {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
        }
    }
}

impl AdminPolicy for SingleAdmin {
    fn is_admin(&self, user: &User) -> bool {
        user.email == self.email
    }
}
