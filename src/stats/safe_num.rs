//! A number that may be missing.
//!
//! Arithmetic with a null operand is null, and division by zero is null
//! rather than infinity or NaN, so a stat derived from a missing count simply
//! comes out missing.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SafeNum(Option<f64>);

impl SafeNum {
    pub const NULL: SafeNum = SafeNum(None);

    /// Wrap `value`; NaN and infinities become null.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self::NULL
        }
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_none()
    }

    /// Round half away from zero to `places` decimals.
    pub fn round(self, places: i32) -> Self {
        self.map(|v| {
            let factor = 10f64.powi(places);
            (v * factor).round() / factor
        })
    }

    fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self.0 {
            Some(v) => Self::new(f(v)),
            None => Self::NULL,
        }
    }

    fn zip(self, rhs: SafeNum, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Self::new(f(a, b)),
            _ => Self::NULL,
        }
    }
}

impl From<f64> for SafeNum {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for SafeNum {
    fn from(value: u32) -> Self {
        Self(Some(value as f64))
    }
}

impl From<Option<f64>> for SafeNum {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NULL, Self::new)
    }
}

impl From<Option<u32>> for SafeNum {
    fn from(value: Option<u32>) -> Self {
        Self(value.map(f64::from))
    }
}

impl Add for SafeNum {
    type Output = SafeNum;
    fn add(self, rhs: SafeNum) -> SafeNum {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for SafeNum {
    type Output = SafeNum;
    fn sub(self, rhs: SafeNum) -> SafeNum {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul for SafeNum {
    type Output = SafeNum;
    fn mul(self, rhs: SafeNum) -> SafeNum {
        self.zip(rhs, |a, b| a * b)
    }
}

impl Div for SafeNum {
    type Output = SafeNum;
    fn div(self, rhs: SafeNum) -> SafeNum {
        match rhs.0 {
            Some(d) if d == 0.0 => Self::NULL,
            _ => self.zip(rhs, |a, b| a / b),
        }
    }
}

impl Neg for SafeNum {
    type Output = SafeNum;
    fn neg(self) -> SafeNum {
        self.map(|v| -v)
    }
}

// Mixed arithmetic with plain constants, e.g. `9.0 * (r / ip)` or `hr * 13.0`.
macro_rules! impl_scalar_ops {
    ($($trait:ident $method:ident),*) => {$(
        impl $trait<f64> for SafeNum {
            type Output = SafeNum;
            fn $method(self, rhs: f64) -> SafeNum {
                $trait::$method(self, SafeNum::new(rhs))
            }
        }

        impl $trait<SafeNum> for f64 {
            type Output = SafeNum;
            fn $method(self, rhs: SafeNum) -> SafeNum {
                $trait::$method(SafeNum::new(self), rhs)
            }
        }
    )*};
}

impl_scalar_ops!(Add add, Sub sub, Mul mul, Div div);

impl fmt::Display for SafeNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for SafeNum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
