//! Credentials handed to the identity provider.
//!
//! Screens build these only after their own checks pass, so the provider
//! port never sees blank input. Passwords are wiped from memory on drop.

use zeroize::Zeroizing;

use thiserror::Error;

/// Error returned when credential parts are blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialsError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

fn split_parts(email: &str, password: &str) -> Result<(String, Zeroizing<String>), CredentialsError> {
    let normalized = email.trim();
    if normalized.is_empty() {
        return Err(CredentialsError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(CredentialsError::EmptyPassword);
    }
    Ok((normalized.to_owned(), Zeroizing::new(password.to_owned())))
}

/// Email and password used to open a new account.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignUpCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let (email, password) = split_parts(email, password)?;
        Ok(Self { email, password })
    }

    /// Email used as the account identifier.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password chosen by the user.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Email and password presented on the login screen.
///
/// # Examples
/// ```
/// use rdv_auth::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("  ada@example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let (email, password) = split_parts(email, password)?;
        Ok(Self { email, password })
    }

    /// Email identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsError::EmptyEmail)]
    #[case("   ", "pw", CredentialsError::EmptyEmail)]
    #[case("ada@example.com", "", CredentialsError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let login = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(login, expected);
        let sign_up = SignUpCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(sign_up, expected);
    }

    #[rstest]
    #[case("  ada@example.com  ", "secret")]
    #[case("bob@example.com", "  padded password  ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = SignUpCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }
}
