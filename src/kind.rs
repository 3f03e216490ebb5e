//! Value kinds and the parser resolver.
//!
//! Every slot type declares a [`ValueKind`] through [`SlotValue`]. The
//! resolver maps a kind to a pure parse function exactly once, when the slot
//! is built, so an unsupported kind is reported before any update arrives.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Declared kind of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text, stored as given.
    Text,
    /// 32-bit signed integer in base 10.
    Integer,
    /// `true` / `false`, case-insensitive.
    Boolean,
    Float32,
    Float64,
    /// Closed set of labels, matched case-sensitively.
    Enumeration {
        name: &'static str,
        labels: &'static [&'static str],
    },
    /// Composite record. No parser is registered for records.
    Record(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "text"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Float32 => write!(f, "float32"),
            ValueKind::Float64 => write!(f, "float64"),
            ValueKind::Enumeration { name, .. } => write!(f, "enum {}", name),
            ValueKind::Record(name) => write!(f, "record {}", name),
        }
    }
}

/// Kind-erased configuration value, used for uniform iteration over slots.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent text (nullable text slots that were never set).
    Null,
    Text(String),
    Integer(i32),
    Boolean(bool),
    Float32(f32),
    Float64(f64),
    Label(&'static str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Label(l) => f.write_str(l),
        }
    }
}

/// A type that can be held by a [`Slot`](crate::slot::Slot).
///
/// `Default` supplies the value a slot holds before its first update.
pub trait SlotValue: Clone + PartialEq + Default + fmt::Debug + 'static {
    /// The kind used to resolve this type's parser.
    fn kind() -> ValueKind;

    /// Convert a parsed value back into `Self`; `None` when the variant does
    /// not belong to this type.
    fn from_value(value: Value) -> Option<Self>;

    fn to_value(&self) -> Value;

    /// Equality used for change detection.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

/// Pure conversion from raw text to a kind-erased value.
pub type ParseFn = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Returned by [`resolve`] for kinds without a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no parser registered for {0}")]
pub struct UnsupportedKind(pub ValueKind);

/// Resolve the parser for a kind.
pub fn resolve(kind: ValueKind) -> Result<ParseFn, UnsupportedKind> {
    let parser: ParseFn = match kind {
        ValueKind::Text => Arc::new(|raw: &str| Some(Value::Text(raw.to_string()))),
        ValueKind::Integer => {
            Arc::new(|raw: &str| raw.trim().parse::<i32>().ok().map(Value::Integer))
        }
        ValueKind::Boolean => Arc::new(|raw: &str| parse_bool(raw).map(Value::Boolean)),
        // str::parse for floats only accepts `.` as the decimal separator. It
        // also takes `inf`, `infinity` and `nan` in any letter case, plus an
        // optional exponent.
        ValueKind::Float32 => {
            Arc::new(|raw: &str| raw.trim().parse::<f32>().ok().map(Value::Float32))
        }
        ValueKind::Float64 => {
            Arc::new(|raw: &str| raw.trim().parse::<f64>().ok().map(Value::Float64))
        }
        ValueKind::Enumeration { labels, .. } => Arc::new(move |raw: &str| {
            labels
                .iter()
                .copied()
                .find(|label| *label == raw)
                .map(Value::Label)
        }),
        ValueKind::Record(_) => return Err(UnsupportedKind(kind)),
    };
    Ok(parser)
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl SlotValue for String {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

/// Nullable text: starts absent, becomes present on the first update.
impl SlotValue for Option<String> {
    fn kind() -> ValueKind {
        ValueKind::Text
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(Some(s)),
            Value::Null => Some(None),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(s) => Value::Text(s.clone()),
            None => Value::Null,
        }
    }
}

impl SlotValue for i32 {
    fn kind() -> ValueKind {
        ValueKind::Integer
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl SlotValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Boolean
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl SlotValue for f32 {
    fn kind() -> ValueKind {
        ValueKind::Float32
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float32(v) => Some(v),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Float32(*self)
    }

    /// NaN counts as equal to NaN, so a repeated `NaN` is not a change.
    fn same_as(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl SlotValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float64
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    /// NaN counts as equal to NaN, so a repeated `NaN` is not a change.
    fn same_as(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

/// Declare a closed label set usable as a slot kind.
///
/// The first variant is the default. Labels are the variant names, matched
/// case-sensitively.
///
/// ```
/// drone_config::slot_enum! {
///     /// Flight state reported by the drone.
///     pub enum FlightState { Idle, Flying, Landing }
/// }
///
/// let slot = drone_config::Slot::<FlightState>::new("control:state").unwrap();
/// assert_eq!(*slot.value(), FlightState::Idle);
/// ```
#[macro_export]
macro_rules! slot_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $first:ident $(, $rest:ident)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $first,
            $($rest,)*
        }

        impl $name {
            /// All labels, in declaration order.
            pub const LABELS: &'static [&'static str] =
                &[stringify!($first) $(, stringify!($rest))*];

            pub fn label(&self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$rest => stringify!($rest),)*
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                if label == stringify!($first) {
                    return Some($name::$first);
                }
                $(
                    if label == stringify!($rest) {
                        return Some($name::$rest);
                    }
                )*
                None
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl $crate::kind::SlotValue for $name {
            fn kind() -> $crate::kind::ValueKind {
                $crate::kind::ValueKind::Enumeration {
                    name: stringify!($name),
                    labels: $name::LABELS,
                }
            }

            fn from_value(value: $crate::kind::Value) -> Option<Self> {
                match value {
                    $crate::kind::Value::Label(label) => $name::from_label(label),
                    _ => None,
                }
            }

            fn to_value(&self) -> $crate::kind::Value {
                $crate::kind::Value::Label(self.label())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::slot_enum! {
        enum Phase { Idle, Flying, Landing }
    }

    fn parse(kind: ValueKind, raw: &str) -> Option<Value> {
        let parser = resolve(kind).expect("kind should be supported");
        parser(raw)
    }

    #[test]
    fn test_text_is_identity() {
        assert_eq!(
            parse(ValueKind::Text, "  Hello Drone "),
            Some(Value::Text("  Hello Drone ".into()))
        );
        assert_eq!(parse(ValueKind::Text, ""), Some(Value::Text(String::new())));
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(parse(ValueKind::Integer, "42"), Some(Value::Integer(42)));
        assert_eq!(parse(ValueKind::Integer, "-7"), Some(Value::Integer(-7)));
        assert_eq!(parse(ValueKind::Integer, " 3000 "), Some(Value::Integer(3000)));
        assert_eq!(parse(ValueKind::Integer, "4.5"), None);
        assert_eq!(parse(ValueKind::Integer, "abc"), None);
        // i32::MAX + 1
        assert_eq!(parse(ValueKind::Integer, "2147483648"), None);
    }

    #[test]
    fn test_boolean_parsing() {
        assert_eq!(parse(ValueKind::Boolean, "True"), Some(Value::Boolean(true)));
        assert_eq!(parse(ValueKind::Boolean, "true"), Some(Value::Boolean(true)));
        assert_eq!(parse(ValueKind::Boolean, "FALSE"), Some(Value::Boolean(false)));
        assert_eq!(parse(ValueKind::Boolean, "1"), None);
        assert_eq!(parse(ValueKind::Boolean, "notabool"), None);
    }

    #[test]
    fn test_float_parsing_is_locale_invariant() {
        assert_eq!(parse(ValueKind::Float32, "0.25"), Some(Value::Float32(0.25)));
        assert_eq!(parse(ValueKind::Float64, "-1.5e3"), Some(Value::Float64(-1500.0)));
        assert_eq!(parse(ValueKind::Float32, "0,25"), None);
        assert_eq!(parse(ValueKind::Float64, "one"), None);
    }

    #[test]
    fn test_float_special_literals() {
        assert_eq!(parse(ValueKind::Float64, "INF"), Some(Value::Float64(f64::INFINITY)));
        assert_eq!(
            parse(ValueKind::Float32, "-Infinity"),
            Some(Value::Float32(f32::NEG_INFINITY))
        );
        assert!(matches!(parse(ValueKind::Float64, "NaN"), Some(Value::Float64(v)) if v.is_nan()));
        assert_eq!(parse(ValueKind::Float32, "+1.5"), Some(Value::Float32(1.5)));
    }

    #[test]
    fn test_float_same_as_treats_nan_as_equal() {
        assert!(f64::NAN.same_as(&f64::NAN));
        assert!(f32::NAN.same_as(&f32::NAN));
        assert!(!f64::NAN.same_as(&0.0));
        assert!((-0.0f64).same_as(&0.0));
        assert!(1.5f32.same_as(&1.5));
    }

    #[test]
    fn test_enumeration_is_case_sensitive() {
        let kind = <Phase as SlotValue>::kind();
        assert_eq!(parse(kind, "Flying"), Some(Value::Label("Flying")));
        assert_eq!(parse(kind, "flying"), None);
        assert_eq!(parse(kind, "Hovering"), None);
    }

    #[test]
    fn test_record_is_unsupported() {
        let result = resolve(ValueKind::Record("ScreenPoint"));
        assert_eq!(
            result.err(),
            Some(UnsupportedKind(ValueKind::Record("ScreenPoint")))
        );
    }

    #[test]
    fn test_slot_enum_labels() {
        assert_eq!(Phase::LABELS, &["Idle", "Flying", "Landing"]);
        assert_eq!(Phase::default(), Phase::Idle);
        assert_eq!(Phase::Landing.to_string(), "Landing");
        assert_eq!(Phase::from_value(Value::Label("Flying")), Some(Phase::Flying));
        assert_eq!(Phase::from_value(Value::Integer(1)), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Float32.to_string(), "float32");
        assert_eq!(<Phase as SlotValue>::kind().to_string(), "enum Phase");
        assert_eq!(ValueKind::Record("ScreenPoint").to_string(), "record ScreenPoint");
    }

    #[test]
    fn test_nullable_text_roundtrip() {
        assert_eq!(<Option<String>>::default().to_value(), Value::Null);
        assert_eq!(
            <Option<String>>::from_value(Value::Text("ssid".into())),
            Some(Some("ssid".to_string()))
        );
    }
}
