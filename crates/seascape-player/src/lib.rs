//! Camera controllers: key-driven free flight and pointer-driven orbiting.

pub mod free_fly;
pub mod orbit;

pub use free_fly::FreeFlyController;
pub use orbit::{OrbitControls, reconcile_target};
