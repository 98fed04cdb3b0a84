use {
    alloy::primitives::U256,
    serde::{Deserialize, Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::borrow::Cow,
};

/// Serializes [`U256`] as a decimal string and deserializes it from either a
/// decimal string or a `0x` prefixed hex string.
pub struct HexOrDecimalU256;

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S: Serializer>(source: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&source.to_string())
    }
}

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = Cow::<str>::deserialize(deserializer)?;
        let s = s.trim();
        match s.strip_prefix("0x") {
            Some(hex) => U256::from_str_radix(hex, 16)
                .map_err(|err| de::Error::custom(format!("failed to decode {s:?} as hex u256: {err}"))),
            None => U256::from_str_radix(s, 10).map_err(|err| {
                de::Error::custom(format!("failed to decode {s:?} as decimal u256: {err}"))
            }),
        }
    }
}
