mod flat_torus;
pub use flat_torus::*;

mod winding;
pub use winding::*;

mod trajectory;
pub use trajectory::*;

mod poincare;
pub use poincare::*;

mod density;
pub use density::*;

mod quasiperiodic;
pub use quasiperiodic::*;

mod minimal_surfaces;
pub use minimal_surfaces::*;

mod quasicrystal;
pub use quasicrystal::*;
