/// Easing curves used by the effect transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    OutCubic,
    OutQuart,
    OutBack,
    OutElastic,
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = (2.0 * std::f64::consts::PI) / 3.0;

impl Ease {
    pub const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::OutCubic,
        Ease::OutQuart,
        Ease::OutBack,
        Ease::OutElastic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::OutBack => {
                // The polynomial only lands on 0/1 up to rounding; pin the endpoints.
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
                }
            }
            Self::OutElastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
