//! Tag values and the primitive data types a value can be coerced into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single value read from or written to a controller tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Real(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// Primitive types accepted for writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Sint,
    Int,
    Dint,
    Lint,
    Usint,
    Uint,
    Udint,
    Real,
    Lreal,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("unsupported data type '{0}'")]
    UnsupportedType(String),
    #[error("'{value}' is not a valid {data_type}")]
    InvalidValue { value: String, data_type: DataType },
}

impl DataType {
    pub const ALL: [DataType; 11] = [
        DataType::Bool,
        DataType::Sint,
        DataType::Int,
        DataType::Dint,
        DataType::Lint,
        DataType::Usint,
        DataType::Uint,
        DataType::Udint,
        DataType::Real,
        DataType::Lreal,
        DataType::String,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataType::Bool => "BOOL",
            DataType::Sint => "SINT",
            DataType::Int => "INT",
            DataType::Dint => "DINT",
            DataType::Lint => "LINT",
            DataType::Usint => "USINT",
            DataType::Uint => "UINT",
            DataType::Udint => "UDINT",
            DataType::Real => "REAL",
            DataType::Lreal => "LREAL",
            DataType::String => "STRING",
        }
    }

    /// Inclusive bounds of the integer types.
    fn integer_bounds(self) -> Option<(i64, i64)> {
        match self {
            DataType::Sint => Some((i8::MIN.into(), i8::MAX.into())),
            DataType::Int => Some((i16::MIN.into(), i16::MAX.into())),
            DataType::Dint => Some((i32::MIN.into(), i32::MAX.into())),
            DataType::Lint => Some((i64::MIN, i64::MAX)),
            DataType::Usint => Some((0, u8::MAX.into())),
            DataType::Uint => Some((0, u16::MAX.into())),
            DataType::Udint => Some((0, u32::MAX.into())),
            _ => None,
        }
    }

    /// Converts spreadsheet text into a value of this type.
    ///
    /// `BOOL` is true for `1`, `true` and `yes` (any case) and false otherwise.
    pub fn coerce(self, raw: &str) -> Result<Scalar, CoercionError> {
        let invalid = || CoercionError::InvalidValue {
            value: raw.to_string(),
            data_type: self,
        };

        match self {
            DataType::Bool => {
                let lowered = raw.trim().to_ascii_lowercase();
                Ok(Scalar::Bool(matches!(lowered.as_str(), "1" | "true" | "yes")))
            }
            DataType::Real | DataType::Lreal => {
                raw.trim().parse::<f64>().map(Scalar::Real).map_err(|_| invalid())
            }
            DataType::String => Ok(Scalar::Text(raw.to_string())),
            integer => {
                let value: i64 = raw.trim().parse().map_err(|_| invalid())?;
                let (low, high) = integer.integer_bounds().ok_or_else(invalid)?;
                if value < low || value > high {
                    return Err(invalid());
                }
                Ok(Scalar::Int(value))
            }
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.name() == upper)
            .ok_or_else(|| CoercionError::UnsupportedType(s.trim().to_string()))
    }
}
