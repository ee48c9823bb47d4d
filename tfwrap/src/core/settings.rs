//! Settings model for `tfwrap.toml`.
//!
//! Parsing and validation only; reading the file lives in [`crate::io::settings`].

use serde::{Deserialize, Serialize};

use crate::core::filter::FilterWindow;
use crate::error::TfwrapError;

/// Name of the settings file expected at the repository root.
pub const SETTINGS_FILE: &str = "tfwrap.toml";

/// Begin marker of Terraform's "Objects have changed outside of Terraform" note,
/// including the color escapes terraform emits in interactive mode.
pub const DRIFT_NOTE_BEGIN: &str =
    "\u{1b}[0m\u{1b}[1m\u{1b}[33mNote: \u{1b}[0m\u{1b}[1mObjects have changed outside of Terraform";

/// Horizontal rule terraform prints after the drift note.
pub const DRIFT_NOTE_END: &str = "─────────────────────────────────────────────────────────────────────────────";

/// Parsed `tfwrap.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub init: InitSettings,

    #[serde(default)]
    pub tool: ToolSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// `[init]`: backend and provider lock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitSettings {
    /// Platforms passed to `terraform providers lock`, in order.
    pub arch: Vec<String>,

    /// `[init.s3]` backend parameters, in file order.
    #[serde(default)]
    pub s3: Option<toml::Table>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolSettings {
    /// Program invoked for every terraform command.
    pub binary: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Blocks elided from plan/apply output.
    pub suppress: Vec<FilterWindow>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            suppress: vec![FilterWindow::new(DRIFT_NOTE_BEGIN, DRIFT_NOTE_END)],
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. Call [`Settings::validate`] afterwards.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), TfwrapError> {
        if self.tool.binary.trim().is_empty() {
            return Err(TfwrapError::ConfigInvalid(
                "tool.binary must not be empty".to_string(),
            ));
        }
        if let Some(arch) = self.init.arch.iter().find(|a| a.trim().is_empty()) {
            return Err(TfwrapError::ConfigInvalid(format!(
                "init.arch contains an empty platform: {arch:?}"
            )));
        }
        for window in &self.output.suppress {
            if window.begin.is_empty() || window.end.is_empty() {
                return Err(TfwrapError::ConfigInvalid(
                    "output.suppress entries need non-empty begin and end markers".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// The `[init.s3]` section, required by every backend-aware command.
    pub fn backend(&self) -> Result<&toml::Table, TfwrapError> {
        self.init.s3.as_ref().ok_or(TfwrapError::UnsupportedBackend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[init]
arch = ["linux_amd64", "darwin_amd64"]

[init.s3]
bucket = "state-bucket"
region = "eu-west-1"
profile = "infra"
dynamodb_table = "tf-locks"
encrypt = true

[tool]
binary = "/opt/terraform/bin/terraform"

[[output.suppress]]
begin = "Note: "
end = "---"
"#;

    #[test]
    fn parses_full_settings_in_file_order() {
        let settings = Settings::from_toml(FULL).expect("parse");
        assert_eq!(settings.init.arch, vec!["linux_amd64", "darwin_amd64"]);
        let keys: Vec<&str> = settings
            .backend()
            .expect("backend")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["bucket", "region", "profile", "dynamodb_table", "encrypt"]
        );
        assert_eq!(settings.tool.binary, "/opt/terraform/bin/terraform");
        assert_eq!(
            settings.output.suppress,
            vec![FilterWindow::new("Note: ", "---")]
        );
        settings.validate().expect("valid");
    }

    #[test]
    fn defaults_apply_to_optional_sections() {
        let settings = Settings::from_toml("[init]\narch = []\n[init.s3]\nbucket = \"b\"\n")
            .expect("parse");
        assert_eq!(settings.tool, ToolSettings::default());
        assert_eq!(
            settings.output.suppress,
            vec![FilterWindow::new(DRIFT_NOTE_BEGIN, DRIFT_NOTE_END)]
        );
    }

    #[test]
    fn missing_backend_is_unsupported() {
        let settings = Settings::from_toml("[init]\narch = [\"linux_amd64\"]\n").expect("parse");
        assert!(matches!(
            settings.backend(),
            Err(TfwrapError::UnsupportedBackend)
        ));
    }

    #[test]
    fn missing_init_section_fails_to_parse() {
        assert!(Settings::from_toml("[tool]\nbinary = \"terraform\"\n").is_err());
    }

    #[test]
    fn arch_must_be_a_list() {
        assert!(Settings::from_toml("[init]\narch = \"linux_amd64\"\n").is_err());
    }

    #[test]
    fn empty_binary_is_rejected() {
        let settings =
            Settings::from_toml("[init]\narch = []\n[tool]\nbinary = \" \"\n").expect("parse");
        assert!(matches!(
            settings.validate(),
            Err(TfwrapError::ConfigInvalid(_))
        ));
    }
}
