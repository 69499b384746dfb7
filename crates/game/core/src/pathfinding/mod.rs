//! Grid navigation: A* over the cost grid and the route post-processing that
//! turns a tile path into world-space waypoints for an actor.
mod astar;
mod route;

pub use astar::{NEIGHBOR_OFFSETS, PathError, find_route};
pub use route::{Route, plan_route};
