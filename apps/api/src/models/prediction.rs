use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary placement outcome. Class index 1 of the fitted model is `Placed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Placed,
    #[serde(rename = "Not Placed")]
    NotPlaced,
}

impl Prediction {
    pub fn from_class_index(index: usize) -> Self {
        if index == 1 {
            Prediction::Placed
        } else {
            Prediction::NotPlaced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Prediction::Placed => "Placed",
            Prediction::NotPlaced => "Not Placed",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
