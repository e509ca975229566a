/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec3;

/// Wide signed integer backing every fixed-point coordinate
pub type Fixed = i128;

/// Euclidean length using `libm` so results do not depend on the platform's
/// `sqrt` implementation.
#[inline]
pub fn length(v: Vector) -> Scalar {
    libm::sqrt(v.length_squared())
}

/// Relative deviation of `current` from `initial`, falling back to the
/// absolute deviation when `initial` is zero.
pub fn relative_error(initial: Scalar, current: Scalar) -> Scalar {
    let deviation = (current - initial).abs();
    if initial.abs() > Scalar::EPSILON {
        deviation / initial.abs()
    } else {
        deviation
    }
}
