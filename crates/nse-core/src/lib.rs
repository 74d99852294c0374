//! nse-core: shared foundation for the NSE equilibrium workspace.
//!
//! Contains:
//! - units (uom constructors + fixed physical constants)
//! - numeric (Real + finiteness and range guards)
//! - species (neutron, proton, alpha)
//! - state (validated density / temperature / proton-fraction triples)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod species;
pub mod state;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{NseError, NseResult};
pub use numeric::*;
pub use species::Species;
pub use state::StatePoint;
pub use units::*;
