// world/ - Static world layout
//
// Placement runs once at construction; terrain is pure queries.
// Nothing here changes after the world is built.

mod placement;
mod terrain;

pub use placement::*;
pub use terrain::*;
