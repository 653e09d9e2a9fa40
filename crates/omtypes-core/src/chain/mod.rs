//! Release chain.
//!
//! Each release adds types to, or patches types in, a registry that already
//! holds everything earlier releases contributed.

mod error;
mod release;
mod sequence;

pub use error::BuildError;
pub use release::{Release, ReleaseContext, Step};
pub use sequence::{PopulationResult, ReleaseChain, ReleasePhase};
