//! Field decoders for upstream records that may carry `null` or odd values.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Reads `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads any JSON number as a decimal. `null` and values the decimal range
/// cannot hold read as zero instead of failing the whole record.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.to_string().parse::<Decimal>().ok())
        .unwrap_or_default())
}
