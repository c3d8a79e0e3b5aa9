//! Driven port for screen navigation.
//!
//! Destinations carry no parameters; the host application decides what each
//! screen looks like.

/// Navigation requests raised by the screens.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Show the login screen.
    fn go_to_login(&self);

    /// Show the sign-up screen.
    fn go_to_sign_up(&self);

    /// Show the signed-in home screen.
    fn go_to_home(&self);
}
