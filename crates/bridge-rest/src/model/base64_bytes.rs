//! Serde adapter for optional byte fields sent as standard base64 strings.
//!
//! ```
//! use bridge_rest::model::base64_bytes;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Upload {
//!     #[serde(default, with = "base64_bytes")]
//!     data: Option<Vec<u8>>,
//! }
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> SerializeResult<S>
where
    S: Serializer,
{
    match bytes {
        Some(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(encoded) => BASE64.decode(encoded).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}
