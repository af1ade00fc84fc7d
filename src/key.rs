use crate::error::CallbackError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Namespaced registration key, keyed in the dispatcher maps as `namespace:key`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentifierKey {
    namespace: String,
    key: String,
}

impl IdentifierKey {
    pub fn of(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for IdentifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

impl FromStr for IdentifierKey {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((ns, key)) if !ns.is_empty() && !key.is_empty() => Ok(Self::of(ns, key)),
            _ => Err(CallbackError::InvalidKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for IdentifierKey {
    type Error = CallbackError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IdentifierKey> for String {
    fn from(k: IdentifierKey) -> Self {
        k.to_string()
    }
}

/// Anything usable as a dispatcher key: identifier keys and plain strings.
/// Both forms end up as the same string, so `IdentifierKey::of("a", "b")` and
/// `"a:b"` address the same slot.
pub trait CallbackKey {
    fn to_key(&self) -> String;
}

impl CallbackKey for IdentifierKey {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl CallbackKey for str {
    fn to_key(&self) -> String {
        self.to_owned()
    }
}

impl CallbackKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }
}

impl<K: CallbackKey + ?Sized> CallbackKey for &K {
    fn to_key(&self) -> String {
        (**self).to_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let k = IdentifierKey::of("mythmc", "chat");
        assert_eq!(k.to_string(), "mythmc:chat");
        assert_eq!("mythmc:chat".parse::<IdentifierKey>().unwrap(), k);
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        for bad in ["", "plain", ":x", "x:"] {
            assert_eq!(
                bad.parse::<IdentifierKey>(),
                Err(CallbackError::InvalidKey(bad.to_string()))
            );
        }
    }

    #[test]
    fn key_may_contain_further_colons() {
        let k: IdentifierKey = "ns:a:b".parse().unwrap();
        assert_eq!(k.namespace(), "ns");
        assert_eq!(k.key(), "a:b");
    }

    #[test]
    fn both_key_forms_normalise_identically() {
        let k = IdentifierKey::of("ns", "k");
        assert_eq!(k.to_key(), "ns:k".to_key());
        assert_eq!((&k).to_key(), String::from("ns:k").to_key());
    }

    #[test]
    fn serde_uses_string_form() {
        let k = IdentifierKey::of("ns", "k");
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "\"ns:k\"");
        let back: IdentifierKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
        assert!(serde_json::from_str::<IdentifierKey>("\"nokey\"").is_err());
    }
}
