//! Typed, validated option values.
//!
//! Every admin operation shares one validation code path: an option is a
//! [`ConfVal`] whose kind is fixed at construction, and every write goes
//! through [`ConfVal::set`], which enforces the kind tag and, for numeric
//! kinds, an inclusive range. Reads fall back to the configured default when
//! the option was never set.

use std::fmt;

use crate::error::ValidationError;

/// The kind of an option value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptionKind {
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// String.
    Str,
    /// Boolean.
    Bool,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OptionKind::I16 => "i16",
            OptionKind::I32 => "i32",
            OptionKind::Str => "string",
            OptionKind::Bool => "bool",
        };
        write!(f, "{}", name)
    }
}

/// An option value, tagged with its kind.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionValue {
    /// Signed 16-bit integer value.
    I16(i16),
    /// Signed 32-bit integer value.
    I32(i32),
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
}

impl OptionValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::I16(_) => OptionKind::I16,
            OptionValue::I32(_) => OptionKind::I32,
            OptionValue::Str(_) => OptionKind::Str,
            OptionValue::Bool(_) => OptionKind::Bool,
        }
    }

    /// Returns the contained `i16`, if this is an [`OptionKind::I16`] value.
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            OptionValue::I16(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained `i32`, if this is an [`OptionKind::I32`] value.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            OptionValue::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained string, if this is an [`OptionKind::Str`] value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the contained `bool`, if this is an [`OptionKind::Bool`] value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i16> for OptionValue {
    fn from(v: i16) -> OptionValue {
        OptionValue::I16(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> OptionValue {
        OptionValue::I32(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> OptionValue {
        OptionValue::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> OptionValue {
        OptionValue::Str(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> OptionValue {
        OptionValue::Bool(v)
    }
}

/// A named, optionally-set configuration value.
///
/// The kind is the kind of the configured default and never changes. Numeric
/// kinds carry an inclusive valid range; the default itself is trusted and
/// may lie outside the range when it acts as an "unset" sentinel.
#[derive(Clone, Debug)]
pub struct ConfVal {
    name: &'static str,
    is_set: bool,
    value: OptionValue,
    default: OptionValue,
    min: i64,
    max: i64,
}

impl ConfVal {
    /// Creates an i16 option with an inclusive valid range.
    pub fn int16(name: &'static str, min: i16, max: i16, default: i16) -> ConfVal {
        ConfVal {
            name,
            is_set: false,
            value: OptionValue::I16(default),
            default: OptionValue::I16(default),
            min: min as i64,
            max: max as i64,
        }
    }

    /// Creates an i32 option with an inclusive valid range.
    pub fn int32(name: &'static str, min: i32, max: i32, default: i32) -> ConfVal {
        ConfVal {
            name,
            is_set: false,
            value: OptionValue::I32(default),
            default: OptionValue::I32(default),
            min: min as i64,
            max: max as i64,
        }
    }

    /// Creates a string option.
    pub fn string(name: &'static str, default: &str) -> ConfVal {
        ConfVal {
            name,
            is_set: false,
            value: OptionValue::Str(default.to_string()),
            default: OptionValue::Str(default.to_string()),
            min: 0,
            max: 0,
        }
    }

    /// Creates a boolean option.
    pub fn boolean(name: &'static str, default: bool) -> ConfVal {
        ConfVal {
            name,
            is_set: false,
            value: OptionValue::Bool(default),
            default: OptionValue::Bool(default),
            min: 0,
            max: 0,
        }
    }

    /// The option's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The option's kind tag.
    pub fn kind(&self) -> OptionKind {
        self.default.kind()
    }

    /// Whether the option has been set explicitly.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Sets the option's value.
    ///
    /// Fails with [`ValidationError::TypeMismatch`] if the value's kind does
    /// not match the option's kind, and with [`ValidationError::OutOfRange`]
    /// if a numeric value lies outside the configured range. On failure the
    /// stored value and set flag are left untouched.
    pub fn set(&mut self, value: OptionValue) -> Result<(), ValidationError> {
        if value.kind() != self.kind() {
            return Err(ValidationError::TypeMismatch {
                option: self.name,
                expected: self.kind(),
                found: value.kind(),
            });
        }
        let numeric = match &value {
            OptionValue::I16(v) => Some(*v as i64),
            OptionValue::I32(v) => Some(*v as i64),
            _ => None,
        };
        if let Some(v) = numeric {
            if v < self.min || v > self.max {
                return Err(ValidationError::OutOfRange {
                    option: self.name,
                    value: v,
                    min: self.min,
                    max: self.max,
                });
            }
        }
        self.value = value;
        self.is_set = true;
        Ok(())
    }

    /// Returns the stored value if set, the configured default otherwise.
    pub fn get_or_default(&self) -> &OptionValue {
        if self.is_set {
            &self.value
        } else {
            &self.default
        }
    }
}
