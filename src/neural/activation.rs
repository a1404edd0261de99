use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Relu,
    Elu { alpha: f64 },
    Sigmoid { slope: f64 },
}

impl Activation {
    pub const DEFAULT_ELU_ALPHA: f64 = 0.3;
    pub const DEFAULT_SIGMOID_SLOPE: f64 = 1.0;

    pub fn elu() -> Self {
        Activation::Elu {
            alpha: Self::DEFAULT_ELU_ALPHA,
        }
    }

    /// Slopes below 1.0 widen the curve.
    pub fn sigmoid() -> Self {
        Activation::Sigmoid {
            slope: Self::DEFAULT_SIGMOID_SLOPE,
        }
    }

    pub fn apply(&self, input: f64) -> f64 {
        match *self {
            Activation::Relu => input.max(0.0),
            Activation::Elu { alpha } => {
                if input >= 0.0 {
                    input
                } else {
                    alpha * (input.exp() - 1.0)
                }
            }
            Activation::Sigmoid { slope } => 1.0 / (1.0 + (-slope * input).exp()),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Activation::Relu => "ReLU".to_string(),
            Activation::Elu { alpha } => format!("ELU, alpha = {}", alpha),
            Activation::Sigmoid { slope } => format!("Sigmoid, slope = {}", slope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu() {
        let relu = Activation::Relu;
        assert_eq!(relu.apply(-2.5), 0.0);
        assert_eq!(relu.apply(0.0), 0.0);
        assert_eq!(relu.apply(1.25), 1.25);
    }

    #[test]
    fn test_elu() {
        let elu = Activation::elu();
        assert_eq!(elu.apply(0.7), 0.7);
        assert_eq!(elu.apply(0.0), 0.0);

        let negative = elu.apply(-1.0);
        assert!((negative - 0.3 * ((-1.0f64).exp() - 1.0)).abs() < 1e-12);
        assert!(elu.apply(-100.0) > -0.3 - 1e-9);
    }

    #[test]
    fn test_sigmoid() {
        let sigmoid = Activation::sigmoid();
        assert_eq!(sigmoid.apply(0.0), 0.5);
        assert!(sigmoid.apply(20.0) > 0.999);
        assert!(sigmoid.apply(-20.0) < 0.001);

        let wide = Activation::Sigmoid { slope: 0.5 };
        assert!(wide.apply(2.0) < sigmoid.apply(2.0));
    }

    #[test]
    fn test_activation_serialization() {
        let json = serde_json::to_string(&Activation::elu()).unwrap();
        let restored: Activation = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, Activation::elu());

        let relu: Activation = serde_json::from_str(r#"{"kind":"relu"}"#).unwrap();
        assert_eq!(relu, Activation::Relu);
    }
}
