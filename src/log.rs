//! Logging macros that compile away without the `tracing` feature.
//!
//! With `tracing` enabled these are the `tracing` macros, so structured
//! fields (`row = 3`, `%error`) work as usual. Without it they expand to
//! nothing and their arguments are never evaluated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
