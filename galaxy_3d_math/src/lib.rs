/*!
# Galaxy 3D Math

Transform decomposition and frustum algebra for the Galaxy 3D engine.

This crate sits on top of `glam` (re-exported at the root) and adds the
geometric operations the engine needs beyond plain vector arithmetic.

## Architecture

- **transform**: SHRT decomposition of 2D (`Mat3`) and 3D (`Mat4`) affine
  matrices into scale, shear, rotation and translation, and the canonical
  `T * R * H * S` recomposition
- **camera**: `Frustum` parameters, projection matrices, boundary planes,
  depth conversions, screen projection and AABB culling
- **scalar**: successor/predecessor stepping, integer rounding and
  sign-aware integer division
- **log**: pluggable logger receiving every error before it is returned

Every fallible operation returns `galaxy3d::Result`. Unchecked frustum
queries never fail and never log; their `try_` twins validate first.
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod scalar;
pub mod transform;
pub mod camera;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger registry
    pub use crate::diagnostics::Diagnostics;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Affine decomposition
    pub mod transform {
        pub use crate::transform::*;
    }

    // Frustum, planes and culling
    pub mod camera {
        pub use crate::camera::*;
    }

    // Float helpers
    pub mod scalar {
        pub use crate::scalar::*;
    }
}

// Re-export math library at crate root
pub use glam;
