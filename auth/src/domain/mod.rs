//! Domain primitives, screen services and ports.
//!
//! Purpose: own everything the sign-up and login screens decide on their
//! own (draft values, validation, error slots, submit serialisation) and
//! reach every outside collaborator through [`ports`].
//!
//! Public surface:
//! - [`SignUpForm`] / [`SignUpField`]: draft registration values.
//! - [`validate`]: pure validator producing an [`ErrorReport`].
//! - [`map_field_to_error_slot`]: defensive field name lookup.
//! - [`SignUpScreen`] / [`LoginScreen`]: stateful screen services.

pub mod auth;
pub mod error;
pub mod error_report;
pub mod login_screen;
pub mod notice;
pub mod ports;
pub mod sign_up_form;
pub mod sign_up_screen;
mod submission;
pub mod user;
pub mod validation;

pub use self::auth::{CredentialsError, LoginCredentials, SignUpCredentials};
pub use self::error::{ProviderError, codes};
pub use self::error_report::{ErrorReport, ErrorSlot, map_field_to_error_slot};
pub use self::login_screen::{
    LoginEvent, LoginField, LoginForm, LoginOutcome, LoginScreen, LoginView, ResetOutcome,
};
pub use self::notice::{Notice, NoticeKind};
pub use self::sign_up_form::{SignUpField, SignUpForm, UnknownFieldError};
pub use self::sign_up_screen::{SignUpEvent, SignUpScreen, SignUpView, SubmitOutcome};
pub use self::user::{UserId, UserIdError};
pub use self::validation::{
    PASSWORD_MIN_LEN, SignUpValidationError, Validation, password_length, validate,
};
