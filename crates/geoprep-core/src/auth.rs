//! Login, signup and admin access.
//!
//! Plaintext lookup against the user directory plus a shared admin passcode.

use crate::error::CoreError;
use crate::model::{ProfileType, User, UserRole};
use crate::storage::UserDirectory;

/// Display name given to whoever enters with the admin passcode.
pub const ADMIN_USERNAME: &str = "Administrator";

/// Passcode used when the configuration does not set one.
pub const DEFAULT_ADMIN_PASSCODE: &str = "BABYMONK";

#[derive(Debug, Clone)]
pub enum LoginRequest {
    Login {
        username: String,
        password: String,
    },
    Signup {
        username: String,
        password: String,
        profile: ProfileType,
    },
    Admin {
        passcode: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    LoggedIn(User),
    /// Account created; the caller still has to log in.
    Registered { username: String },
}

/// Handle a login-screen submission.
///
/// Inputs are trimmed before use.
pub fn login(
    directory: &UserDirectory<'_>,
    request: LoginRequest,
    admin_passcode: &str,
) -> Result<AuthOutcome, CoreError> {
    match request {
        LoginRequest::Admin { passcode } => {
            if passcode.trim() == admin_passcode {
                tracing::info!("admin login");
                Ok(AuthOutcome::LoggedIn(User {
                    username: ADMIN_USERNAME.to_string(),
                    role: UserRole::Admin,
                    profile_type: ProfileType::General,
                }))
            } else {
                Err(CoreError::AccessDenied)
            }
        }
        LoginRequest::Signup {
            username,
            password,
            profile,
        } => {
            let (username, password) = require_credentials(&username, &password)?;
            if directory.register(username, password, profile)? {
                Ok(AuthOutcome::Registered {
                    username: username.to_string(),
                })
            } else {
                Err(CoreError::UserExists(username.to_string()))
            }
        }
        LoginRequest::Login { username, password } => {
            let (username, password) = require_credentials(&username, &password)?;
            match directory.authenticate(username, password)? {
                Some(profile) => Ok(AuthOutcome::LoggedIn(User {
                    username: username.to_string(),
                    role: UserRole::Student,
                    profile_type: profile,
                })),
                None => Err(CoreError::InvalidCredentials),
            }
        }
    }
}

fn require_credentials<'a>(
    username: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), CoreError> {
    let (username, password) = (username.trim(), password.trim());
    if username.is_empty() || password.is_empty() {
        return Err(CoreError::MissingCredentials);
    }
    Ok((username, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn signup(name: &str, pw: &str) -> LoginRequest {
        LoginRequest::Signup {
            username: name.into(),
            password: pw.into(),
            profile: ProfileType::Fresher,
        }
    }

    #[test]
    fn admin_passcode() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);

        let outcome = login(
            &dir,
            LoginRequest::Admin {
                passcode: " BABYMONK ".into(),
            },
            DEFAULT_ADMIN_PASSCODE,
        )
        .unwrap();
        match outcome {
            AuthOutcome::LoggedIn(user) => {
                assert!(user.is_admin());
                assert_eq!(user.username, ADMIN_USERNAME);
                assert_eq!(user.profile_type, ProfileType::General);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let err = login(
            &dir,
            LoginRequest::Admin {
                passcode: "guess".into(),
            },
            DEFAULT_ADMIN_PASSCODE,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::AccessDenied));
    }

    #[test]
    fn signup_then_login() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);

        let outcome = login(&dir, signup("  asha ", "pw"), DEFAULT_ADMIN_PASSCODE).unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::Registered {
                username: "asha".into()
            }
        );

        let outcome = login(
            &dir,
            LoginRequest::Login {
                username: "asha".into(),
                password: " pw ".into(),
            },
            DEFAULT_ADMIN_PASSCODE,
        )
        .unwrap();
        assert_eq!(
            outcome,
            AuthOutcome::LoggedIn(User {
                username: "asha".into(),
                role: UserRole::Student,
                profile_type: ProfileType::Fresher,
            })
        );
    }

    #[test]
    fn duplicate_signup_rejected() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);
        login(&dir, signup("asha", "pw"), DEFAULT_ADMIN_PASSCODE).unwrap();
        let err = login(&dir, signup("asha", "pw2"), DEFAULT_ADMIN_PASSCODE).unwrap_err();
        assert!(matches!(err, CoreError::UserExists(name) if name == "asha"));
    }

    #[test]
    fn blank_fields_rejected() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);
        let err = login(&dir, signup("   ", "pw"), DEFAULT_ADMIN_PASSCODE).unwrap_err();
        assert!(matches!(err, CoreError::MissingCredentials));

        let err = login(
            &dir,
            LoginRequest::Login {
                username: "asha".into(),
                password: "".into(),
            },
            DEFAULT_ADMIN_PASSCODE,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::MissingCredentials));
    }

    #[test]
    fn wrong_password_rejected() {
        let store = MemoryStore::new();
        let dir = UserDirectory::new(&store);
        login(&dir, signup("asha", "pw"), DEFAULT_ADMIN_PASSCODE).unwrap();
        let err = login(
            &dir,
            LoginRequest::Login {
                username: "asha".into(),
                password: "nope".into(),
            },
            DEFAULT_ADMIN_PASSCODE,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
    }
}
