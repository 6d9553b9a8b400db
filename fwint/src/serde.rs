use alloc::string::{String, ToString};
use core::{fmt, str::FromStr};

use num_bigint::BigInt;
use serde::{
    de,
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeStruct, SerializeTuple},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::FixedWidthInteger;

/// A `serde_support` impl
impl Serialize for FixedWidthInteger {
    /// Serializes `self` in a platform independent way. In human readable
    /// form, it serializes into a struct named "FixedWidthInteger" with the
    /// fields "value", "width", and "signed". "value" is a decimal string so
    /// that any bitwidth is supported. Other formats get a tuple of the same
    /// three elements.
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name.
    /// use fwint::FixedWidthInteger;
    /// use ron::to_string;
    ///
    /// let x = FixedWidthInteger::new(-1234, 100, true).unwrap();
    /// assert_eq!(
    ///     to_string(&x).unwrap(),
    ///     "(value:\"-1234\",width:100,signed:true)"
    /// );
    /// ```
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.value.to_string();
        if serializer.is_human_readable() {
            let mut s = serializer.serialize_struct("FixedWidthInteger", 3)?;
            s.serialize_field("value", &value)?;
            s.serialize_field("width", &self.width())?;
            s.serialize_field("signed", &self.signed)?;
            s.end()
        } else {
            let mut s = serializer.serialize_tuple(3)?;
            s.serialize_element(&value)?;
            s.serialize_element(&self.width())?;
            s.serialize_element(&self.signed)?;
            s.end()
        }
    }
}

const FIELDS: &[&str] = &["value", "width", "signed"];

/// Helper for the deserialization impl
enum Field {
    Value,
    Width,
    Signed,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`value`, `width`, or `signed`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Field, E>
            where
                E: de::Error,
            {
                match value {
                    "value" => Ok(Field::Value),
                    "width" => Ok(Field::Width),
                    "signed" => Ok(Field::Signed),
                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

/// Validates the deserialized parts through `FixedWidthInteger::new`
fn construct<E: de::Error>(value: &str, w: usize, signed: bool) -> Result<FixedWidthInteger, E> {
    let value = BigInt::from_str(value).map_err(de::Error::custom)?;
    FixedWidthInteger::new(value, w, signed).map_err(de::Error::custom)
}

struct FixedWidthIntegerVisitor;

impl<'de> Visitor<'de> for FixedWidthIntegerVisitor {
    type Value = FixedWidthInteger;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "struct FixedWidthInteger consisting of a decimal string \"value\", a bitwidth \
             \"width\", and a bool \"signed\"",
        )
    }

    fn visit_map<V>(self, mut map: V) -> Result<FixedWidthInteger, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut value: Option<String> = None;
        let mut w: Option<usize> = None;
        let mut signed: Option<bool> = None;
        while let Some(key) = map.next_key()? {
            match key {
                Field::Value => {
                    if value.is_some() {
                        return Err(de::Error::duplicate_field("value"))
                    }
                    value = Some(map.next_value()?);
                }
                Field::Width => {
                    if w.is_some() {
                        return Err(de::Error::duplicate_field("width"))
                    }
                    w = Some(map.next_value()?);
                }
                Field::Signed => {
                    if signed.is_some() {
                        return Err(de::Error::duplicate_field("signed"))
                    }
                    signed = Some(map.next_value()?);
                }
            }
        }
        let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
        let w = w.ok_or_else(|| de::Error::missing_field("width"))?;
        let signed = signed.ok_or_else(|| de::Error::missing_field("signed"))?;
        construct(&value, w, signed)
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<FixedWidthInteger, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let value: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let w: usize = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let signed: bool = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;
        construct(&value, w, signed)
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for FixedWidthInteger {
    /// Deserializes `self` in a platform independent way, checking that the
    /// value is representable.
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name.
    /// use fwint::FixedWidthInteger;
    /// use ron::from_str;
    ///
    /// let x: FixedWidthInteger = from_str("(value:\"255\",width:8,signed:false)").unwrap();
    /// assert_eq!(x, 255);
    /// assert!(from_str::<FixedWidthInteger>("(value:\"255\",width:8,signed:true)").is_err());
    /// ```
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("FixedWidthInteger", FIELDS, FixedWidthIntegerVisitor)
    }
}
