//! Type-tagged opaque payloads.

use serde::{Deserialize, Serialize};

use crate::wire::AnyProto;

/// An opaque payload tagged with the protobuf type URL that describes it.
///
/// Used for messages on the wire, public keys and extension options. The
/// value bytes are never interpreted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Any {
    pub type_url: String,
    #[serde(with = "hex::serde")]
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }
}

impl From<Any> for AnyProto {
    fn from(any: Any) -> Self {
        AnyProto {
            type_url: any.type_url,
            value: any.value,
        }
    }
}

impl From<AnyProto> for Any {
    fn from(proto: AnyProto) -> Self {
        Any::new(proto.type_url, proto.value)
    }
}
