//! Sort key values extracted from elements
//!
//! Every registered property produces a [`SortValue`]. Keys of one term all
//! carry the same variant (or `Null`), so the derived ordering is the natural
//! ordering of the underlying type.

use chrono::{DateTime, NaiveDate, Utc};
use ordered_float::OrderedFloat;
use sortpage_model::SortDirection;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Comparable key for a single sort term.
///
/// `Null` is declared last so it compares greater than any value: missing
/// data sorts last ascending and first descending.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortValue {
    /// Boolean, `false` first
    Bool(bool),
    /// Signed integers, widened
    Int(i64),
    /// Unsigned integers, widened
    UInt(u64),
    /// Floats under a total order
    Float(OrderedFloat<f64>),
    /// Text in ordinal byte order
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// UTC instant
    Timestamp(DateTime<Utc>),
    /// UUID in byte order
    Uuid(Uuid),
    /// Missing value
    Null,
}

impl SortValue {
    /// True for a missing value
    pub fn is_null(&self) -> bool {
        matches!(self, SortValue::Null)
    }

    /// Compare two keys under the given direction
    #[inline]
    pub fn compare_with_direction(&self, other: &Self, direction: SortDirection) -> Ordering {
        direction.apply(self.cmp(other))
    }
}

/// Static type of a value property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Stored as [`SortValue::Bool`]
    Bool,
    /// Stored as [`SortValue::Int`]
    Int,
    /// Stored as [`SortValue::UInt`]
    UInt,
    /// Stored as [`SortValue::Float`]
    Float,
    /// Stored as [`SortValue::Text`]
    Text,
    /// Stored as [`SortValue::Date`]
    Date,
    /// Stored as [`SortValue::Timestamp`]
    Timestamp,
    /// Stored as [`SortValue::Uuid`]
    Uuid,
}

impl ValueType {
    /// Name of the storage type
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "i64",
            ValueType::UInt => "u64",
            ValueType::Float => "f64",
            ValueType::Text => "String",
            ValueType::Date => "NaiveDate",
            ValueType::Timestamp => "DateTime<Utc>",
            ValueType::Uuid => "Uuid",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field types that can be registered as sort properties
pub trait SortField {
    /// Storage kind of the converted key
    const VALUE_TYPE: ValueType;

    /// Convert into a comparable key
    fn into_sort_value(self) -> SortValue;
}

macro_rules! sort_field {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl SortField for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                #[inline]
                fn into_sort_value(self) -> SortValue {
                    SortValue::$variant(<$target>::from(self))
                }
            }
        )*
    };
}

sort_field! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    bool => Bool as bool,
    String => Text as String,
    &str => Text as String,
    NaiveDate => Date as NaiveDate,
    DateTime<Utc> => Timestamp as DateTime<Utc>,
    Uuid => Uuid as Uuid,
}

impl SortField for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn into_sort_value(self) -> SortValue {
        SortValue::Float(OrderedFloat(f64::from(self)))
    }
}

impl SortField for f64 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn into_sort_value(self) -> SortValue {
        SortValue::Float(OrderedFloat(self))
    }
}

impl SortField for usize {
    const VALUE_TYPE: ValueType = ValueType::UInt;

    fn into_sort_value(self) -> SortValue {
        SortValue::UInt(u64::try_from(self).unwrap_or(u64::MAX))
    }
}

impl<V: SortField> SortField for Option<V> {
    const VALUE_TYPE: ValueType = V::VALUE_TYPE;

    fn into_sort_value(self) -> SortValue {
        self.map(SortField::into_sort_value)
            .unwrap_or(SortValue::Null)
    }
}
