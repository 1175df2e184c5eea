//! Encoder configuration.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

bitflags! {
    /// Kitty keyboard protocol progressive enhancement flags.
    /// <https://sw.kovidgoyal.net/kitty/keyboard-protocol/>
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct KittyFlags: u8 {
        /// Disambiguate escape codes
        const DISAMBIGUATE_ESCAPE_CODES       = 0b0000_0001;
        /// Report press, repeat and release
        const REPORT_EVENT_TYPES              = 0b0000_0010;
        /// Report shifted keys alongside the base key
        const REPORT_ALTERNATE_KEYS           = 0b0000_0100;
        /// Report every key, text keys included, as an escape code
        const REPORT_ALL_KEYS_AS_ESCAPE_CODES = 0b0000_1000;
        /// Report the text a key produces
        const REPORT_ASSOCIATED_TEXT          = 0b0001_0000;
    }
}

impl KittyFlags {
    /// Validate raw flag bits, e.g. from a `CSI > flags u` push.
    pub fn from_raw(bits: u8) -> Result<Self, ConfigError> {
        KittyFlags::from_bits(bits).ok_or(ConfigError::UnknownKittyFlags(bits))
    }
}

/// Keyboard protocol the encoder speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// xterm-compatible legacy encoding
    #[default]
    Legacy,
    /// Kitty keyboard protocol
    Kitty,
}

/// xterm `modifyOtherKeys` state (`CSI > 4 ; n m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifyOtherKeys {
    /// Disabled
    #[default]
    Off,
    /// Level 1: only combinations without a well-defined legacy encoding
    ExceptWellDefined,
    /// Level 2: every modified key
    All,
}

/// Encoding configuration for a key encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Active keyboard protocol
    pub protocol: Protocol,
    /// Kitty flags, only meaningful with the kitty protocol
    pub kitty_flags: KittyFlags,
    /// DECCKM: arrows send SS3 instead of CSI
    pub cursor_key_application: bool,
    /// DECKPAM: keypad sends SS3 application sequences
    pub keypad_application: bool,
    /// Alt sends an ESC prefix
    pub alt_esc_prefix: bool,
    /// xterm modifyOtherKeys state
    pub modify_other_keys: ModifyOtherKeys,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Legacy,
            kitty_flags: KittyFlags::empty(),
            cursor_key_application: false,
            keypad_application: false,
            alt_esc_prefix: true,
            modify_other_keys: ModifyOtherKeys::Off,
        }
    }
}

impl EncoderConfig {
    /// Kitty protocol with the given flags.
    pub fn kitty(flags: KittyFlags) -> Self {
        Self {
            protocol: Protocol::Kitty,
            kitty_flags: flags,
            ..Self::default()
        }
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EncoderConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EncoderConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.protocol {
            Protocol::Legacy => {
                if !self.kitty_flags.is_empty() {
                    return Err(ConfigError::KittyFlagsWithoutKitty(self.kitty_flags.bits()));
                }
            }
            Protocol::Kitty => {
                if self.kitty_flags.is_empty() {
                    return Err(ConfigError::EmptyKittyFlags);
                }
                if self.modify_other_keys != ModifyOtherKeys::Off {
                    return Err(ConfigError::ModifyOtherKeysWithKitty);
                }
                if self
                    .kitty_flags
                    .contains(KittyFlags::REPORT_ASSOCIATED_TEXT)
                    && !self
                        .kitty_flags
                        .contains(KittyFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES)
                {
                    return Err(ConfigError::AssociatedTextWithoutAllKeys);
                }
            }
        }

        Ok(())
    }

    /// Kitty flags in effect, empty under the legacy protocol.
    pub fn active_kitty_flags(&self) -> KittyFlags {
        match self.protocol {
            Protocol::Legacy => KittyFlags::empty(),
            Protocol::Kitty => self.kitty_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.protocol, Protocol::Legacy);
        assert!(config.kitty_flags.is_empty());
        assert!(config.alt_esc_prefix);
        assert!(!config.cursor_key_application);
        assert_eq!(config.modify_other_keys, ModifyOtherKeys::Off);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kitty_config() {
        let config = EncoderConfig::kitty(KittyFlags::DISAMBIGUATE_ESCAPE_CODES);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.active_kitty_flags(),
            KittyFlags::DISAMBIGUATE_ESCAPE_CODES
        );
    }

    #[test]
    fn test_legacy_with_kitty_flags() {
        let config = EncoderConfig {
            kitty_flags: KittyFlags::REPORT_EVENT_TYPES,
            ..EncoderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::KittyFlagsWithoutKitty(0x02))
        );
    }

    #[test]
    fn test_kitty_without_flags() {
        let config = EncoderConfig::kitty(KittyFlags::empty());
        assert_eq!(config.validate(), Err(ConfigError::EmptyKittyFlags));
    }

    #[test]
    fn test_kitty_with_modify_other_keys() {
        let config = EncoderConfig {
            modify_other_keys: ModifyOtherKeys::All,
            ..EncoderConfig::kitty(KittyFlags::DISAMBIGUATE_ESCAPE_CODES)
        };
        assert_eq!(config.validate(), Err(ConfigError::ModifyOtherKeysWithKitty));
    }

    #[test]
    fn test_associated_text_requires_all_keys() {
        let config = EncoderConfig::kitty(
            KittyFlags::DISAMBIGUATE_ESCAPE_CODES | KittyFlags::REPORT_ASSOCIATED_TEXT,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::AssociatedTextWithoutAllKeys)
        );

        let config = EncoderConfig::kitty(
            KittyFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES | KittyFlags::REPORT_ASSOCIATED_TEXT,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_kitty_flags_from_raw() {
        assert_eq!(KittyFlags::from_raw(0b11111).unwrap(), KittyFlags::all());
        assert_eq!(
            KittyFlags::from_raw(0b10_0000),
            Err(ConfigError::UnknownKittyFlags(0x20))
        );
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
protocol: kitty
kitty_flags: DISAMBIGUATE_ESCAPE_CODES | REPORT_EVENT_TYPES
cursor_key_application: true
alt_esc_prefix: false
"#;

        let config = EncoderConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.protocol, Protocol::Kitty);
        assert_eq!(
            config.kitty_flags,
            KittyFlags::DISAMBIGUATE_ESCAPE_CODES | KittyFlags::REPORT_EVENT_TYPES
        );
        assert!(config.cursor_key_application);
        assert!(!config.keypad_application);
        assert!(!config.alt_esc_prefix);
    }

    #[test]
    fn test_parse_yaml_defaults() {
        let config = EncoderConfig::from_yaml("modify_other_keys: except_well_defined\n").unwrap();
        assert_eq!(config.protocol, Protocol::Legacy);
        assert_eq!(config.modify_other_keys, ModifyOtherKeys::ExceptWellDefined);
        assert!(config.alt_esc_prefix);
    }

    #[test]
    fn test_parse_yaml_inconsistent() {
        let yaml = "protocol: legacy\nkitty_flags: REPORT_EVENT_TYPES\n";
        assert_eq!(
            EncoderConfig::from_yaml(yaml),
            Err(ConfigError::KittyFlagsWithoutKitty(0x02))
        );
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = EncoderConfig::from_yaml("protocol: [unclosed");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = EncoderConfig::from_yaml("protocol: vt52\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"protocol":"kitty","kitty_flags":"REPORT_ALL_KEYS_AS_ESCAPE_CODES"}"#;
        let config = EncoderConfig::from_json(json).unwrap();
        assert_eq!(
            config.kitty_flags,
            KittyFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = EncoderConfig {
            keypad_application: true,
            ..EncoderConfig::kitty(KittyFlags::all())
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EncoderConfig::from_json(&json).unwrap(), config);
    }
}
