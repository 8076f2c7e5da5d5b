//! Camera Module
//!
//! Camera state and math only; the host owns the actual view/projection.

pub mod follow;

pub use follow::{CAMERA_HEIGHT, FollowCamera, ORBIT_MARGIN, TARGET_LIFT};
