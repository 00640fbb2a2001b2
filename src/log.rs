//! A wrapper module to export logging functionality from
//! [`log`] or [`tracing`] depending on the `tracing` feature.
//!
//! [`log`]: https://docs.rs/log
//! [`tracing`]: https://docs.rs/tracing

#[cfg(not(feature = "tracing"))]
pub use log::{trace, warn};

#[cfg(feature = "tracing")]
pub use tracing::{trace, warn};
