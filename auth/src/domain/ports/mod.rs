//! Ports the screens depend on.
//!
//! Every collaborator outside the core (identity provider, navigation,
//! notifications) sits behind one of these traits so screens can be driven
//! by test doubles.

mod identity_provider;
mod navigator;
mod notifier;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::IdentityProvider;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::Notifier;
