//! # gcodesplit CAM tools
//!
//! Geometric operations over parsed programs.
//!
//! ## Tools Included
//!
//! - **Plane split**: partition a program into left and right programs
//!   along a rotated vertical plane, cutting lines and arcs at the boundary
//!   and synthesizing safe retract / re-approach moves
//! - **Transforms**: translate or rotate a whole program, e.g. to re-home
//!   one half of a split

pub mod error;
pub mod plane;
pub mod plane_split;
pub mod transform;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult, SplitDiagnostic};
pub use plane::{Side, SplitPlane};
pub use plane_split::{
    split, PlaneSplitter, SplitOptions, SplitResult, DEFAULT_ARC_RADIUS_TOLERANCE,
    DEFAULT_BOUNDARY_EPSILON, DEFAULT_MIN_ARC_LENGTH,
};
pub use transform::{rotate_program, translate};
