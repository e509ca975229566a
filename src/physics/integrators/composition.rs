//! Symmetric composition of the second-order leapfrog
//!
//! A composition runs the base drift-kick-drift step several times with
//! timesteps `γ_i * dt`. When the coefficients read the same forwards and
//! backwards and sum to one, the composite step is itself symmetric, so
//! running it with `-dt` undoes it exactly.

use crate::physics::math::Scalar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition {
    order: usize,
    coefficients: &'static [Scalar],
}

const GAMMA_1: Scalar = 0.392_161_444_007_314_139_28;
const GAMMA_2: Scalar = 0.332_599_136_789_359_438_60;
const GAMMA_3: Scalar = -0.706_246_172_557_639_359_81;
const GAMMA_4: Scalar = 0.082_213_596_293_550_800_230;
const GAMMA_5: Scalar = 0.798_543_990_934_829_963_40;

impl Composition {
    /// Plain leapfrog: a single sub-step spanning the whole timestep
    pub const SECOND_ORDER: Self = Self {
        order: 2,
        coefficients: &[1.0],
    };

    /// Nine-stage palindromic composition
    pub const FOURTH_ORDER: Self = Self {
        order: 4,
        coefficients: &[
            GAMMA_1, GAMMA_2, GAMMA_3, GAMMA_4, GAMMA_5, GAMMA_4, GAMMA_3, GAMMA_2, GAMMA_1,
        ],
    };

    pub fn for_order(order: usize) -> Option<Self> {
        match order {
            2 => Some(Self::SECOND_ORDER),
            4 => Some(Self::FOURTH_ORDER),
            _ => None,
        }
    }

    pub fn supported_orders() -> &'static [usize] {
        &[2, 4]
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Sub-step coefficients as fractions of the full timestep
    #[inline]
    pub fn coefficients(&self) -> &'static [Scalar] {
        self.coefficients
    }

    /// Sub-step timesteps for a full timestep `dt`, in execution order
    pub fn sub_steps(&self, dt: Scalar) -> impl Iterator<Item = Scalar> + '_ {
        self.coefficients.iter().map(move |gamma| gamma * dt)
    }

    pub fn is_palindromic(&self) -> bool {
        self.coefficients
            .iter()
            .eq(self.coefficients.iter().rev())
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::FOURTH_ORDER
    }
}
