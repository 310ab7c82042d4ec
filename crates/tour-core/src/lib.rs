pub mod catalog;
pub mod constants;
pub mod nav;
pub mod pano;
pub mod sequencer;
pub mod state;

/// Built-in site catalog document, validated by `Catalog::builtin()`.
pub static BUILTIN_SITES_JSON: &str = include_str!("../assets/sites.json");

pub use catalog::*;
pub use constants::*;
pub use nav::*;
pub use pano::*;
pub use sequencer::*;
pub use state::*;
