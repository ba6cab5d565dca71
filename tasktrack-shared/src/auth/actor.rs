/// Authenticated actor context
///
/// After the API layer validates a bearer token, it resolves the claims
/// into an [`Actor`] and attaches it to the request. Handlers receive the
/// actor and pass it to store operations and the policy; nothing below
/// the HTTP layer ever re-parses a token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;
use crate::models::user::{Role, User};

/// The authenticated identity performing an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// User ID
    pub id: Uuid,

    /// Role carried by the token
    pub role: Role,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl Actor {
    /// Builds an actor from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            name: claims.name.clone(),
            email: claims.email.clone(),
        }
    }

    /// Builds an actor from a user row (used at login and in tests)
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    /// Whether list/report results must be scoped to this actor's own
    /// assigned tasks
    pub fn is_scoped(&self) -> bool {
        self.role == Role::Member
    }

    /// The assignee filter for visibility-scoped queries: `Some(id)` for
    /// members, `None` (no filter) for admins and managers
    pub fn visibility_filter(&self) -> Option<Uuid> {
        if self.is_scoped() {
            Some(self.id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_filter_scopes_members_only() {
        let member = Actor {
            id: Uuid::new_v4(),
            role: Role::Member,
            name: "Member One".to_string(),
            email: "member1@example.com".to_string(),
        };
        assert_eq!(member.visibility_filter(), Some(member.id));

        let admin = Actor {
            role: Role::Admin,
            ..member.clone()
        };
        assert_eq!(admin.visibility_filter(), None);

        let manager = Actor {
            role: Role::Manager,
            ..member
        };
        assert_eq!(manager.visibility_filter(), None);
    }
}
