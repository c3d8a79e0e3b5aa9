//! Driven adapters implementing the domain ports.

mod in_memory_identity;
mod tracing_collaborators;

pub use in_memory_identity::InMemoryIdentityProvider;
pub use tracing_collaborators::{TracingNavigator, TracingNotifier};
