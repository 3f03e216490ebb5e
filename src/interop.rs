//! Fixed-layout records shared with the navdata decoder.

use crate::kind::{SlotValue, Value, ValueKind};
use std::fmt;

/// 2D integer screen coordinate as laid out on the wire.
///
/// Two sequential little-endian `i32`s, `x` then `y`, no padding, 1-byte
/// alignment: 8 bytes total.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const SIZE: usize = 8;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        let [x0, x1, x2, x3, y0, y1, y2, y3] = bytes;
        Self {
            x: i32::from_le_bytes([x0, x1, x2, x3]),
            y: i32::from_le_bytes([y0, y1, y2, y3]),
        }
    }

    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..4].copy_from_slice(&{ self.x }.to_le_bytes());
        out[4..].copy_from_slice(&{ self.y }.to_le_bytes());
        out
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Copy out of the packed struct before formatting takes references.
        let (x, y) = (self.x, self.y);
        write!(f, "({}, {})", x, y)
    }
}

/// Records have no text parser; a `Slot<ScreenPoint>` fails to build.
impl SlotValue for ScreenPoint {
    fn kind() -> ValueKind {
        ValueKind::Record("ScreenPoint")
    }

    fn from_value(_value: Value) -> Option<Self> {
        None
    }

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}
