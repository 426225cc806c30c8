//! Configure option registration and canonical argument rendering.
//!
//! The registry mirrors what the orchestrator's own option parser consumes:
//! each option has a command-line flag, a destination key, an optional
//! default, and help text. String options carry a user-supplied value;
//! const options store a fixed value when the flag is present. Registration
//! order is preserved everywhere, and only explicitly set options appear in
//! the forwarded argument list.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("option {0} is already registered")]
    DuplicateFlag(String),

    #[error("destination {0} is already registered")]
    DuplicateDest(String),

    #[error("unknown option destination {0}")]
    UnknownDest(String),

    #[error("option {0} does not take a value")]
    TakesNoValue(String),

    #[error("option {0} requires a value")]
    RequiresValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Expects a string value on the command line.
    Str,
    /// Stores a fixed value when the flag is present.
    Const(&'static str),
}

/// One registered configure option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub flag: String,
    pub dest: String,
    pub kind: OptionKind,
    pub default: Option<String>,
    pub help: String,
}

/// Ordered set of option specs plus the values resolved for them.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: Vec<OptionSpec>,
    values: HashMap<String, String>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option that expects a string value.
    pub fn add_str(
        &mut self,
        flag: &str,
        dest: &str,
        default: Option<&str>,
        help: &str,
    ) -> Result<(), OptionError> {
        self.add(OptionSpec {
            flag: flag.to_string(),
            dest: dest.to_string(),
            kind: OptionKind::Str,
            default: default.map(str::to_string),
            help: help.to_string(),
        })
    }

    /// Register a flag that stores `value` when present.
    pub fn add_const(
        &mut self,
        flag: &str,
        dest: &str,
        value: &'static str,
        help: &str,
    ) -> Result<(), OptionError> {
        self.add(OptionSpec {
            flag: flag.to_string(),
            dest: dest.to_string(),
            kind: OptionKind::Const(value),
            default: None,
            help: help.to_string(),
        })
    }

    fn add(&mut self, spec: OptionSpec) -> Result<(), OptionError> {
        if self.specs.iter().any(|s| s.flag == spec.flag) {
            return Err(OptionError::DuplicateFlag(spec.flag));
        }
        if self.specs.iter().any(|s| s.dest == spec.dest) {
            return Err(OptionError::DuplicateDest(spec.dest));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Record a value for a string option.
    pub fn set(&mut self, dest: &str, value: impl Into<String>) -> Result<(), OptionError> {
        match self.kind_of(dest)? {
            OptionKind::Str => {
                self.values.insert(dest.to_string(), value.into());
                Ok(())
            }
            OptionKind::Const(_) => Err(OptionError::TakesNoValue(dest.to_string())),
        }
    }

    /// Mark a const option as present, storing its fixed value.
    pub fn enable(&mut self, dest: &str) -> Result<(), OptionError> {
        match self.kind_of(dest)? {
            OptionKind::Const(value) => {
                self.values.insert(dest.to_string(), value.to_string());
                Ok(())
            }
            OptionKind::Str => Err(OptionError::RequiresValue(dest.to_string())),
        }
    }

    fn kind_of(&self, dest: &str) -> Result<OptionKind, OptionError> {
        self.specs
            .iter()
            .find(|s| s.dest == dest)
            .map(|s| s.kind.clone())
            .ok_or_else(|| OptionError::UnknownDest(dest.to_string()))
    }

    /// The resolved value for a destination: the set value, or the spec's
    /// default when nothing was set.
    pub fn value(&self, dest: &str) -> Option<&str> {
        if let Some(value) = self.values.get(dest) {
            return Some(value.as_str());
        }
        self.specs
            .iter()
            .find(|s| s.dest == dest)
            .and_then(|s| s.default.as_deref())
    }

    pub fn is_set(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    /// Registered specs, in registration order.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Canonical forwarded argument list: `--flag <value>` for set string
    /// options, bare `--flag` for enabled const options. Unset options are
    /// omitted; defaults are never forwarded.
    pub fn to_args(&self) -> Vec<String> {
        self.to_args_without(&[])
    }

    /// Like [`to_args`](Self::to_args), skipping the listed destinations.
    pub fn to_args_without(&self, skip: &[&str]) -> Vec<String> {
        let mut args = Vec::new();
        for spec in &self.specs {
            if skip.contains(&spec.dest.as_str()) {
                continue;
            }
            if let Some(value) = self.values.get(&spec.dest) {
                match spec.kind {
                    OptionKind::Const(_) => args.push(spec.flag.clone()),
                    OptionKind::Str => {
                        args.push(spec.flag.clone());
                        args.push(value.clone());
                    }
                }
            }
        }
        args
    }
}
