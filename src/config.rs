// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ConfigValue {
    /// Parse a value typed by the user: integers, then floats, then booleans,
    /// falling back to a string.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(i) = raw.parse::<i64>() {
            return ConfigValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return ConfigValue::Float(f);
        }
        match raw {
            "true" | "on" | "yes" => ConfigValue::Bool(true),
            "false" | "off" | "no" => ConfigValue::Bool(false),
            _ => ConfigValue::String(raw.to_string()),
        }
    }
}

impl Config {
    /// Bind a key to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Get integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Get string setting
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.keybindings.is_empty());
        assert!(config.settings.is_empty());
    }

    #[test]
    fn test_bind_key() {
        let mut config = Config::default();
        config.bind("^S", "save-file");
        assert_eq!(config.keybindings.get("^S"), Some(&"save-file".to_string()));
    }

    #[test]
    fn test_set_get_settings() {
        let mut config = Config::default();

        config.set("int_setting", 42i64);
        assert_eq!(config.get_int("int_setting"), Some(42));

        config.set("string_setting", "hello");
        assert_eq!(config.get_string("string_setting"), Some("hello"));

        config.set("float_setting", 0.5);
        assert_eq!(config.get("float_setting"), Some(&ConfigValue::Float(0.5)));
    }

    #[test]
    fn test_type_mismatch() {
        let mut config = Config::default();
        config.set("val", 10i64);
        assert_eq!(config.get_string("val"), None);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(ConfigValue::parse(" 12 "), ConfigValue::Int(12));
        assert_eq!(ConfigValue::parse("0.7"), ConfigValue::Float(0.7));
        assert_eq!(ConfigValue::parse("on"), ConfigValue::Bool(true));
        assert_eq!(
            ConfigValue::parse("dict.txt"),
            ConfigValue::String("dict.txt".to_string())
        );
    }
}
