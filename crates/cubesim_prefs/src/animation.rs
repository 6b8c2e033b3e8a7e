use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Seconds per twist. Zero means twists complete instantly.
    pub twist_duration: f32,
    /// Whether to twist faster when many twists are queued.
    pub dynamic_twist_speed: bool,
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            twist_duration: 0.3,
            dynamic_twist_speed: true,
            twist_interpolation: InterpolateFn::EaseOutCubic,
        }
    }
}
impl AnimationPreferences {
    /// Preferences that complete every twist on the next frame.
    pub const INSTANT: Self = Self {
        twist_duration: 0.0,
        dynamic_twist_speed: false,
        twist_interpolation: InterpolateFn::Lerp,
    };
}

pub mod interpolation {
    //! Interpolation functions.

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        strum::VariantArray,
        strum::IntoStaticStr,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum InterpolateFn {
        Lerp,
        #[default]
        EaseOutCubic,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        pub fn interpolate(self, t: f32) -> f32 {
            match self {
                Self::Lerp => t,
                Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            }
        }
    }
}
