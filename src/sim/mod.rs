//! Deterministic simulation module
//!
//! All collision logic lives here. This module must be pure and deterministic:
//! - Discrete steps of caller-supplied displacement only
//! - Seeded RNG only (scene generation)
//! - Stable iteration order (ball index, wall index, edge index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bounce;
pub mod contact;
pub mod line;
pub mod pair;
pub mod scene;
pub mod select;
pub mod vector;
pub mod wall;
pub mod world;

pub use ball::Ball;
pub use bounce::{WallHit, WallOutcome, nearest_wall_contact, resolve_ball_walls, resolve_ball_walls_by};
pub use contact::{
    Contact, ContactSource, Endpoint, ball_segment_contact, reflect_remaining, vertex_tangency,
};
pub use line::{
    LineHit, RayCrossing, Segment, distance_point_to_segment, nearest_point,
    project_point_onto_line, ray_cross_segment,
};
pub use pair::{
    BallCollision, PairHit, PairPass, ball_ball_collision, collide_balls, resolve_ball_pair,
    resolve_ball_pairs,
};
pub use scene::{SceneParams, random_scene};
pub use select::select_best;
pub use vector::VecExt;
pub use wall::Wall;
pub use world::{StepReport, World};
