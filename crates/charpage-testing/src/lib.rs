//! Testing utilities and harness for the character browser

pub mod executor;
pub mod fixtures;
pub mod rule;
pub mod transport;

pub use executor::ManualExecutor;
pub use fixtures::*;
pub use rule::ListTestRule;
pub use transport::{ScriptedResponse, ScriptedTransport};
