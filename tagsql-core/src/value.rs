use crate::{Error, Result};
use rust_decimal::Decimal;
use std::fmt::{self, Display, Formatter};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed scalar bound to a statement placeholder.
///
/// Every typed variant wraps an `Option`, `None` being the typed NULL.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Int128(l), Self::Int128(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::UInt128(l), Self::UInt128(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    /// True for NULL and for the variants carrying `None`.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int8(None)
                | Value::Int16(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::Int128(None)
                | Value::UInt8(None)
                | Value::UInt16(None)
                | Value::UInt32(None)
                | Value::UInt64(None)
                | Value::UInt128(None)
                | Value::Float32(None)
                | Value::Float64(None)
                | Value::Decimal(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Date(None)
                | Value::Time(None)
                | Value::Timestamp(None)
                | Value::TimestampWithTimezone(None)
                | Value::Uuid(None)
        )
    }

    /// Whether the value equals the zero value of its type, the condition `omitempty` skips on.
    ///
    /// Floating point zero is checked on the bit pattern, so `-0.0` is not zero.
    /// Temporal values have no zero and are only zero when NULL.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Boolean(Some(v)) => !*v,
            Value::Int8(Some(v)) => *v == 0,
            Value::Int16(Some(v)) => *v == 0,
            Value::Int32(Some(v)) => *v == 0,
            Value::Int64(Some(v)) => *v == 0,
            Value::Int128(Some(v)) => *v == 0,
            Value::UInt8(Some(v)) => *v == 0,
            Value::UInt16(Some(v)) => *v == 0,
            Value::UInt32(Some(v)) => *v == 0,
            Value::UInt64(Some(v)) => *v == 0,
            Value::UInt128(Some(v)) => *v == 0,
            Value::Float32(Some(v)) => v.to_bits() == 0,
            Value::Float64(Some(v)) => v.to_bits() == 0,
            Value::Decimal(Some(v)) => v.is_zero(),
            Value::Varchar(Some(v)) => v.is_empty(),
            Value::Blob(Some(v)) => v.is_empty(),
            Value::Uuid(Some(v)) => v.is_nil(),
            Value::Date(Some(..))
            | Value::Time(Some(..))
            | Value::Timestamp(Some(..))
            | Value::TimestampWithTimezone(Some(..)) => false,
            _ => self.is_null(),
        }
    }

    /// Reads an unsigned count, a NULL unsigned value counts as zero.
    pub fn as_unsigned(&self) -> Result<u64> {
        match self {
            Value::UInt8(v) => Ok(v.unwrap_or_default() as u64),
            Value::UInt16(v) => Ok(v.unwrap_or_default() as u64),
            Value::UInt32(v) => Ok(v.unwrap_or_default() as u64),
            Value::UInt64(v) => Ok(v.unwrap_or_default()),
            Value::UInt128(v) => u64::try_from(v.unwrap_or_default()).map_err(|_| {
                Error::msg(format!(
                    "Value {}: u128 is out of range for u64",
                    v.unwrap_or_default()
                ))
            }),
            _ => Err(Error::msg(format!(
                "expected an unsigned integer, given {}",
                self.type_name()
            ))),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int8(..) => "Int8",
            Value::Int16(..) => "Int16",
            Value::Int32(..) => "Int32",
            Value::Int64(..) => "Int64",
            Value::Int128(..) => "Int128",
            Value::UInt8(..) => "UInt8",
            Value::UInt16(..) => "UInt16",
            Value::UInt32(..) => "UInt32",
            Value::UInt64(..) => "UInt64",
            Value::UInt128(..) => "UInt128",
            Value::Float32(..) => "Float32",
            Value::Float64(..) => "Float64",
            Value::Decimal(..) => "Decimal",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Date(..) => "Date",
            Value::Time(..) => "Time",
            Value::Timestamp(..) => "Timestamp",
            Value::TimestampWithTimezone(..) => "TimestampWithTimezone",
            Value::Uuid(..) => "Uuid",
        }
    }
}

/// Raw rendering of the scalar, strings are not quoted and NULL prints as `NULL`.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self {
            Value::Boolean(Some(v)) => v.fmt(f),
            Value::Int8(Some(v)) => v.fmt(f),
            Value::Int16(Some(v)) => v.fmt(f),
            Value::Int32(Some(v)) => v.fmt(f),
            Value::Int64(Some(v)) => v.fmt(f),
            Value::Int128(Some(v)) => v.fmt(f),
            Value::UInt8(Some(v)) => v.fmt(f),
            Value::UInt16(Some(v)) => v.fmt(f),
            Value::UInt32(Some(v)) => v.fmt(f),
            Value::UInt64(Some(v)) => v.fmt(f),
            Value::UInt128(Some(v)) => v.fmt(f),
            Value::Float32(Some(v)) => v.fmt(f),
            Value::Float64(Some(v)) => v.fmt(f),
            Value::Decimal(Some(v)) => v.fmt(f),
            Value::Varchar(Some(v)) => f.write_str(v),
            Value::Blob(Some(v)) => {
                for b in v.iter() {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Value::Date(Some(v)) => v.fmt(f),
            Value::Time(Some(v)) => v.fmt(f),
            Value::Timestamp(Some(v)) => v.fmt(f),
            Value::TimestampWithTimezone(Some(v)) => v.fmt(f),
            Value::Uuid(Some(v)) => v.fmt(f),
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn zero_values() {
        assert!(Value::Null.is_zero());
        assert!(Value::Int32(Some(0)).is_zero());
        assert!(Value::Int32(None).is_zero());
        assert!(!Value::Int32(Some(-1)).is_zero());
        assert!(Value::Boolean(Some(false)).is_zero());
        assert!(!Value::Boolean(Some(true)).is_zero());
        assert!(Value::Varchar(Some("".into())).is_zero());
        assert!(!Value::Varchar(Some(" ".into())).is_zero());
        assert!(Value::Float64(Some(0.0)).is_zero());
        assert!(!Value::Float64(Some(-0.0)).is_zero());
        assert!(Value::Decimal(Some(Decimal::ZERO)).is_zero());
        assert!(Value::Uuid(Some(Uuid::nil())).is_zero());
        assert!(Value::Blob(Some([].into())).is_zero());
        assert!(!Value::Blob(Some([0u8].into())).is_zero());
    }

    #[test]
    fn unsigned_counts() {
        assert_eq!(Value::UInt64(Some(10)).as_unsigned().unwrap(), 10);
        assert_eq!(Value::UInt8(Some(3)).as_unsigned().unwrap(), 3);
        assert_eq!(Value::UInt32(None).as_unsigned().unwrap(), 0);
        assert!(Value::UInt128(Some(u128::MAX)).as_unsigned().is_err());
        let error = Value::Int64(Some(10)).as_unsigned().unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected an unsigned integer, given Int64"
        );
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(Value::Varchar(Some("John".into())).to_string(), "John");
        assert_eq!(Value::Int32(Some(30)).to_string(), "30");
        assert_eq!(Value::Varchar(None).to_string(), "NULL");
        assert_eq!(Value::Blob(Some([0xab, 0x01].into())).to_string(), "ab01");
    }
}
