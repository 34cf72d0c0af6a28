//! Runtime queries over navigation zones
//!
//! [`Pathfinding`] keeps a registry of named zones and answers group lookup,
//! nearest node, path and step clamping queries against them. The individual
//! stages (A* corridor search, funnel string pulling) are exposed as well.

mod astar;
mod funnel;
mod pathfinding;
mod query;

#[cfg(test)]
pub(crate) mod test_zone_helpers;

pub use astar::find_corridor;
pub use funnel::{string_pull, Portal, END_PORTAL_EPSILON_SQR, PORTAL_DEVIATION_SQR};
pub use pathfinding::{PathResult, Pathfinding};
pub use query::{
    ClampedStep, ZoneQuery, CLAMP_STEP_MAX_DEPTH, COPLANAR_TOLERANCE, GROUP_SEARCH_RADIUS,
};

pub use navzone_build::{ZoneBuilder, ZoneConfig};
pub use navzone_common::{Error, Node, Result, TriMesh, Zone};
