use crate::types::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Value of an element attribute or of a query constraint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UiValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Rect(Rect),
    Point(Point),
    Size(Size),
}

impl UiValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UiValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            UiValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            UiValue::Rect(rect) => Some(*rect),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            UiValue::Integer(value) => Some(*value as f64),
            UiValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Equality used for query constraints and property waits.
    ///
    /// Integers and floating point numbers compare by numeric value, so a fixture that
    /// reports `buttonIndex` as `0.0` still satisfies a constraint of `0`.
    pub fn matches(&self, expected: &UiValue) -> bool {
        match (self, expected) {
            (
                UiValue::Integer(_) | UiValue::Number(_),
                UiValue::Integer(_) | UiValue::Number(_),
            ) => self.as_number() == expected.as_number(),
            _ => self == expected,
        }
    }
}

impl Display for UiValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UiValue::Null => f.write_str("null"),
            UiValue::Bool(value) => write!(f, "{value}"),
            UiValue::Integer(value) => write!(f, "{value}"),
            UiValue::Number(value) => write!(f, "{value}"),
            UiValue::String(value) => write!(f, "{value:?}"),
            UiValue::Rect(rect) => write!(f, "{rect}"),
            UiValue::Point(point) => write!(f, "{point}"),
            UiValue::Size(size) => write!(f, "{}x{}", size.width(), size.height()),
        }
    }
}

impl From<bool> for UiValue {
    fn from(value: bool) -> Self {
        UiValue::Bool(value)
    }
}

impl From<i64> for UiValue {
    fn from(value: i64) -> Self {
        UiValue::Integer(value)
    }
}

impl From<i32> for UiValue {
    fn from(value: i32) -> Self {
        UiValue::Integer(i64::from(value))
    }
}

impl From<f64> for UiValue {
    fn from(value: f64) -> Self {
        UiValue::Number(value)
    }
}

impl From<&str> for UiValue {
    fn from(value: &str) -> Self {
        UiValue::String(value.to_owned())
    }
}

impl From<String> for UiValue {
    fn from(value: String) -> Self {
        UiValue::String(value)
    }
}

impl From<Rect> for UiValue {
    fn from(value: Rect) -> Self {
        UiValue::Rect(value)
    }
}

impl From<Point> for UiValue {
    fn from(value: Point) -> Self {
        UiValue::Point(value)
    }
}
