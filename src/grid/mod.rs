pub mod identity;
pub mod resolver;

pub use identity::{BlockShape, GridIdentity, GridLayout, GroupShape, TileCoord};
pub use resolver::{check_disjoint_cover, global_coord, owned_coords, validate_cover, OwnedCoords};
