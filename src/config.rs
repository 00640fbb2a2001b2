//! Client configuration.
//!
//! A [`ClientConfig`] is a plain key-value map; the transport that is built
//! from it decides which properties it understands and rejects the
//! configuration otherwise.

use std::collections::HashMap;

use crate::error::KafkaResult;

/// Client configuration.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    conf_map: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates a new empty configuration.
    pub fn new() -> ClientConfig {
        ClientConfig::default()
    }

    /// Gets the value of a parameter in the configuration.
    ///
    /// Returns `None` if the key is not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.conf_map.get(key).map(|v| v.as_str())
    }

    /// Sets a parameter in the configuration.
    ///
    /// If there is an existing value for `key` in the configuration, it is
    /// overwritten with the new `value`.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut ClientConfig
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.conf_map.insert(key.into(), value.into());
        self
    }

    /// Removes a parameter from the configuration.
    pub fn remove(&mut self, key: &str) -> &mut ClientConfig {
        self.conf_map.remove(key);
        self
    }

    /// Uses the current configuration to create a new client.
    pub fn create<T: FromClientConfig>(&self) -> KafkaResult<T> {
        T::from_config(self)
    }
}

/// Create a new client based on the provided configuration.
pub trait FromClientConfig: Sized {
    /// Creates a client from a client configuration.
    fn from_config(config: &ClientConfig) -> KafkaResult<Self>;
}
