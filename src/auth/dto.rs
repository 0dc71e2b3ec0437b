use serde::Deserialize;

/// Request body for `POST /auth`.
#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for VerifyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
