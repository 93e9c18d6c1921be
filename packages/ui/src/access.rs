//! Who may see a view.

use crate::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Access {
    /// The one authorization check every guarded view goes through.
    pub fn allows(self, auth: &AuthState) -> bool {
        match self {
            Access::Public => true,
            Access::Authenticated => auth.is_signed_in(),
            Access::Admin => auth.is_admin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::User;

    fn signed_in(role: &str) -> AuthState {
        AuthState {
            user: Some(User {
                id: 1,
                email: "a@b.c".into(),
                name: "A".into(),
                role: role.into(),
            }),
            token: Some("t".into()),
        }
    }

    #[test]
    fn test_access_levels() {
        let anonymous = AuthState::default();
        assert!(Access::Public.allows(&anonymous));
        assert!(!Access::Authenticated.allows(&anonymous));
        assert!(!Access::Admin.allows(&anonymous));

        assert!(Access::Authenticated.allows(&signed_in("user")));
        assert!(!Access::Admin.allows(&signed_in("user")));
        assert!(Access::Admin.allows(&signed_in("Admin")));
    }
}
