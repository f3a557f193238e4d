//! XML configuration support.
//! - Loads logging settings from config.xml (quick_xml + serde).
//! - Unknown elements are rejected so typos surface instead of being ignored.
//!
//! Only `log_level`, `log_file` and `json` live here; `verbose`, `input` and
//! `output` come from the command line alone. Every element is optional and
//! values are trimmed.

use anyhow::Result;
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{config_path_is_explicit, default_config_path};
use crate::config::types::{Config, LogLevel};
use crate::errors::IncubatorError;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    json: Option<bool>,
}

// Accepts surrounding whitespace and an empty element (treated as unset).
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean '{other}'"
            ))),
        },
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> IncubatorError {
    IncubatorError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

// Map XmlConfig -> Config, validating the log level.
fn xml_to_config(path: &Path, parsed: XmlConfig) -> Result<Config, IncubatorError> {
    let mut cfg = Config::default();

    if let Some(s) = parsed.log_level.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_level = trimmed
                .parse::<LogLevel>()
                .map_err(|e| invalid(path, e))?;
        }
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(j) = parsed.json {
        cfg.json = j;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| invalid(path, format!("read failed: {e}")))?;
    let parsed: XmlConfig = if contents.trim().is_empty() {
        XmlConfig::default()
    } else {
        from_xml_str(&contents).map_err(|e| invalid(path, e.to_string()))?
    };
    Ok(xml_to_config(path, parsed)?)
}

/// Load the config file, if any.
///
/// - explicit path (env) missing: `ConfigNotFound`
/// - default path missing: `Ok(None)`, built-in defaults apply
/// - present but malformed: `ConfigInvalid`
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = default_config_path() else {
        debug!("No config location could be determined; using defaults");
        return Ok(None);
    };

    if !path.exists() {
        if config_path_is_explicit() {
            return Err(IncubatorError::ConfigNotFound(path).into());
        }
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }

    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "Loaded config file");
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn load_str(xml: &str) -> Result<Config> {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, xml).unwrap();
        load_config_from_xml_path(&p)
    }

    #[test]
    fn reads_all_fields() {
        let cfg = load_str(
            r#"<config>
  <log_level>QUIET</log_level>
  <log_file> /tmp/bi.log </log_file>
  <json> true </json>
</config>"#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, LogLevel::Quiet);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/bi.log")));
        assert!(cfg.json);
        assert!(!cfg.verbose);
        assert_eq!(cfg.input, "");
        assert_eq!(cfg.output, "");
    }

    #[test]
    fn missing_elements_keep_defaults() {
        let cfg = load_str("<config><json>1</json></config>").unwrap();
        assert!(cfg.json);
        assert_eq!(cfg.log_file, None);
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = load_str("   \n").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = load_str("<config><colour>red</colour></config>").unwrap_err();
        let typed = err.downcast_ref::<IncubatorError>().expect("typed error");
        assert_eq!(typed.code(), "config_invalid");
    }

    #[test]
    fn run_settings_are_not_file_settings() {
        for xml in [
            "<config><input>a.txt</input></config>",
            "<config><output>b.txt</output></config>",
            "<config><verbose>true</verbose></config>",
        ] {
            let err = load_str(xml).unwrap_err();
            let typed = err.downcast_ref::<IncubatorError>().expect("typed error");
            assert_eq!(typed.code(), "config_invalid", "{xml}");
        }
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = load_str("<config><log_level>loud</log_level></config>").unwrap_err();
        assert!(err.to_string().contains("invalid log level"), "{err}");
    }

    #[test]
    fn bad_bool_is_rejected() {
        assert!(load_str("<config><json>maybe</json></config>").is_err());
    }
}
