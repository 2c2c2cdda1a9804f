//! Page assembly, navigation registry and svelte output.
//!
//! - [`assemble`] - metadata gate, href derivation, registry insertion
//! - [`Registry`] - published pages grouped by layout
//! - [`artifact`] - `+page.svelte` rendering

pub mod artifact;
mod assemble;
mod registry;

pub use assemble::{Assembly, PageArtifact, assemble};
pub use registry::{LayoutKey, PageSummary, Registry};
