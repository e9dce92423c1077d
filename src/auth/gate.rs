use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Role;
use crate::store::UserDirectory;

use super::token;

/// Verified caller reference derived from a credential token.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

/// Decides, per operation, whether a caller may proceed. Authentication
/// (who are you) and authorization (are you allowed) are separate calls;
/// `authorize` never re-verifies the token.
#[derive(Clone)]
pub struct AuthGate {
    jwt_secret: String,
    users: Arc<UserDirectory>,
}

impl AuthGate {
    pub fn new(config: &Config, users: Arc<UserDirectory>) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            users,
        }
    }

    /// Verify the bearer token and resolve its subject to a live
    /// identity. The role comes from the directory rather than the
    /// claim, so a stale token cannot outlive a role change.
    pub fn authenticate(&self, bearer: Option<&str>) -> AppResult<Identity> {
        let token = bearer.ok_or(AppError::MissingToken)?;
        let claims = token::verify(token, &self.jwt_secret)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AppError::InvalidToken("malformed subject".to_string()))?;
        let user = self
            .users
            .lookup(user_id)
            .ok_or(AppError::IdentityNotFound)?;
        Ok(Identity {
            id: user.id,
            role: user.role,
        })
    }

    /// Pure role-membership check. No side effects, no I/O.
    pub fn authorize(&self, identity: &Identity, required: &[Role]) -> AppResult<()> {
        if required.contains(&identity.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{:?} role may not perform this operation",
                identity.role
            )))
        }
    }
}
