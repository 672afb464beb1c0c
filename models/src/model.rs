use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One entry of a model's attribute map: the Rust field, the key it is
/// written under on the wire, and the wire type name of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub field: &'static str,
    pub key: &'static str,
    pub type_name: &'static str,
}

impl Attribute {
    pub const fn new(field: &'static str, key: &'static str, type_name: &'static str) -> Self {
        Self {
            field,
            key,
            type_name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to serialize {model}: {source}")]
    Serialize {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to deserialize {model}: {source}")]
    Deserialize {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared (de)serialization behaviour of the API models.
///
/// Implementors declare their wire type name and attribute map; the serde
/// derives on each type must agree with `ATTRIBUTES` (checked in tests).
pub trait ApiModel: Serialize + DeserializeOwned {
    const TYPE_NAME: &'static str;
    const ATTRIBUTES: &'static [Attribute];

    fn attribute(field: &str) -> Option<&'static Attribute> {
        Self::ATTRIBUTES.iter().find(|a| a.field == field)
    }

    fn to_json(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(|source| ModelError::Serialize {
            model: Self::TYPE_NAME,
            source,
        })
    }

    fn to_vec(&self) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec(self).map_err(|source| ModelError::Serialize {
            model: Self::TYPE_NAME,
            source,
        })
    }

    fn from_json(value: Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(|source| ModelError::Deserialize {
            model: Self::TYPE_NAME,
            source,
        })
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        serde_json::from_slice(bytes).map_err(|source| ModelError::Deserialize {
            model: Self::TYPE_NAME,
            source,
        })
    }
}

/// Asserts that every key a model serializes to is declared in its attribute
/// map and that no snake_case field name leaks onto the wire.
#[cfg(test)]
pub(crate) fn assert_keys_declared<T: ApiModel>(value: &T) {
    let json = value.to_json().expect("serialize");
    let obj = json.as_object().expect("models serialize to objects");
    for key in obj.keys() {
        assert!(
            T::ATTRIBUTES.iter().any(|a| a.key == key),
            "{} serialized undeclared key {}",
            T::TYPE_NAME,
            key
        );
    }
    for attr in T::ATTRIBUTES {
        if attr.field != attr.key {
            assert!(
                !obj.contains_key(attr.field),
                "{} leaked field name {}",
                T::TYPE_NAME,
                attr.field
            );
        }
    }
}
