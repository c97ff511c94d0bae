//! Built-in providers.

mod mixcloud;
mod soundcloud;

pub use mixcloud::{MIXCLOUD, mixcloud};
pub use soundcloud::{SOUNDCLOUD, soundcloud};

/// Every built-in provider, in registration order.
pub static BUILTIN: [&crate::Provider; 2] = [&MIXCLOUD, &SOUNDCLOUD];
