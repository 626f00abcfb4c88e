//! Configuration accessor for backend test parameters.
//!
//! [`ConfigParams`] is a handle over a (namespace, resource filename) pair.
//! The YAML resource is read lazily on first lookup and cached; nothing is
//! validated at construction time.

use crate::error::TestkitError;
use log::debug;
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable overriding the directory the resource is read from.
pub const CONFIG_DIR_ENV: &str = "FRAMEGUARD_TESTKIT_CONFIG_DIR";

const DEFAULT_CONFIG_DIR: &str = "tests/data";

#[derive(Debug)]
pub struct ConfigParams {
    namespace: String,
    resource: String,
    cache: OnceLock<Result<HashMap<String, YamlValue>, String>>,
}

impl ConfigParams {
    pub fn new(namespace: impl Into<String>, resource: impl Into<String>) -> Self {
        ConfigParams {
            namespace: namespace.into(),
            resource: resource.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Path the resource will be read from. The file is not required to
    /// exist until the first lookup.
    pub fn path(&self) -> PathBuf {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        PathBuf::from(dir).join(&self.resource)
    }

    /// Look up a parameter in this handle's namespace.
    pub fn get(&self, key: &str) -> Result<&YamlValue, TestkitError> {
        let params = self.load()?;
        params.get(key).ok_or_else(|| {
            TestkitError::NotFound(format!(
                "parameter '{key}' in namespace '{}' of {}",
                self.namespace, self.resource
            ))
        })
    }

    pub fn get_str(&self, key: &str) -> Result<&str, TestkitError> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| {
            TestkitError::Config(format!("parameter '{key}' is not a string: {value:?}"))
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, TestkitError> {
        let value = self.get(key)?;
        value.as_bool().ok_or_else(|| {
            TestkitError::Config(format!("parameter '{key}' is not a boolean: {value:?}"))
        })
    }

    fn load(&self) -> Result<&HashMap<String, YamlValue>, TestkitError> {
        let loaded = self.cache.get_or_init(|| {
            let path = self.path();
            debug!("loading test parameters from {}", path.display());
            let text = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
            let doc: HashMap<String, HashMap<String, YamlValue>> =
                serde_yaml::from_str(&text).map_err(|e| e.to_string())?;
            doc.get(&self.namespace).cloned().ok_or_else(|| {
                format!(
                    "namespace '{}' missing from {}",
                    self.namespace,
                    path.display()
                )
            })
        });
        loaded
            .as_ref()
            .map_err(|e| TestkitError::Config(e.clone()))
    }
}
