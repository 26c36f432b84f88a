use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Cost in cents, displayed in dollars.
pub type Cost = Quantity<f64, 0, 0, 1>;

impl Cost {
    pub fn from_dollars(dollars: f64) -> Self {
        Self(dollars * 100.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} $", self.0 / 100.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}¢", self.0)
    }
}
