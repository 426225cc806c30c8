//! Probing and parsing the version an orchestrator binary reports.

use std::fmt;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A `major.minor.patch` tool version, ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ToolVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first `major.minor[.patch]` token from arbitrary version
    /// output, tolerating surrounding prose such as `AMBuild 2.2.5`.
    pub fn parse(text: &str) -> Result<Self> {
        let pattern = Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?")?;
        let captures = pattern
            .captures(text)
            .ok_or_else(|| anyhow!("no version token in {text:?}"))?;

        let component = |idx: usize| -> Result<u32> {
            captures
                .get(idx)
                .map(|m| m.as_str().parse::<u32>())
                .transpose()
                .with_context(|| format!("version component out of range in {text:?}"))
                .map(|parsed| parsed.unwrap_or(0))
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for ToolVersion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToolVersion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ToolVersion::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Run `<binary> --version` and parse the reported version out of whatever
/// the tool printed on stdout or stderr.
pub fn probe(binary: &Path) -> Result<ToolVersion> {
    let output = Command::new(binary)
        .arg("--version")
        .output()
        .with_context(|| format!("running {} --version", binary.display()))?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push('\n');
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    debug!(
        "{} --version reported {:?} (status {})",
        binary.display(),
        text.trim(),
        output.status
    );

    ToolVersion::parse(&text)
        .with_context(|| format!("parsing version output of {}", binary.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_triple() {
        let version = ToolVersion::parse("2.2.5").expect("parse");
        assert_eq!(version, ToolVersion::new(2, 2, 5));
    }

    #[test]
    fn parses_from_surrounding_prose() {
        let version = ToolVersion::parse("AMBuild 2.1\n").expect("parse");
        assert_eq!(version, ToolVersion::new(2, 1, 0));
    }

    #[test]
    fn takes_the_first_version_token() {
        let version = ToolVersion::parse("ambuild 1.0.4166 (legacy)").expect("parse");
        assert_eq!(version, ToolVersion::new(1, 0, 4166));
    }

    #[test]
    fn rejects_output_without_a_version() {
        assert!(ToolVersion::parse("usage: ambuild [options]").is_err());
        assert!(ToolVersion::parse("").is_err());
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert!(ToolVersion::new(2, 10, 0) > ToolVersion::new(2, 9, 9));
        assert!(ToolVersion::new(10, 0, 0) > ToolVersion::new(9, 99, 99));
    }

    #[test]
    fn displays_full_triple() {
        assert_eq!(ToolVersion::new(2, 1, 0).to_string(), "2.1.0");
    }

    #[test]
    fn serde_round_trips_through_display_form() {
        let json = serde_json::to_string(&ToolVersion::new(2, 2, 5)).expect("serialize");
        assert_eq!(json, "\"2.2.5\"");

        let parsed: ToolVersion = serde_json::from_str("\"2.2.5\"").expect("deserialize");
        assert_eq!(parsed, ToolVersion::new(2, 2, 5));
    }
}
