//! Public view-model types consumed by the rendering layer.
//!
//! The dashboard talks to the engine through plain function calls; these
//! are the serializable structures those calls return. Conversions from
//! domain types live in [`conversions`].

pub mod conversions;
pub mod types;

pub use types::*;
