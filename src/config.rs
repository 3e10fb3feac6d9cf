//! Layered settings: built-in defaults, then the config file, then flags

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use podscanner_k8s::{ClientSettings, DEFAULT_BURST, DEFAULT_QPS, resolve_kubeconfig_path};
use podscanner_scan::{ScanConfig, ScanMode};
use podscanner_types::OutputFormat;

use crate::Args;

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub burst: Option<u32>,
    pub qps: Option<f32>,
    pub keep_going: Option<bool>,
    pub output: Option<OutputFormat>,
}

impl FileConfig {
    /// `~/.config/podscanner/config.toml` (platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("podscanner").join("config.toml"))
    }

    /// Load an explicit config file, or the default one if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(explicit, Self::default_path().as_deref())
    }

    /// A missing `default` is not an error; a missing `explicit` file is
    fn load_from(explicit: Option<&Path>, default: Option<&Path>) -> Result<Self> {
        let path = match (explicit, default) {
            (Some(path), _) => path,
            (None, Some(path)) if path.is_file() => path,
            (None, _) => return Ok(Self::default()),
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Everything needed to run one scan
#[derive(Debug)]
pub struct Settings {
    pub client: ClientSettings,
    pub scan: ScanConfig,
    pub output: OutputFormat,
}

impl Settings {
    /// Merge flags over the file config and resolve the kubeconfig path
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let kubeconfig = args.kubeconfig.as_deref().or(file.kubeconfig.as_deref());
        let kubeconfig =
            resolve_kubeconfig_path(kubeconfig).context("Failed to resolve kubeconfig")?;

        let keep_going = if args.fail_fast {
            false
        } else {
            args.keep_going || file.keep_going.unwrap_or(false)
        };
        let mode = if keep_going {
            ScanMode::KeepGoing
        } else {
            ScanMode::FailFast
        };

        Ok(Self {
            client: ClientSettings {
                kubeconfig,
                context: args.context.clone().or(file.context),
                burst: args.burst.or(file.burst).unwrap_or(DEFAULT_BURST),
                qps: args.qps.or(file.qps).unwrap_or(DEFAULT_QPS),
            },
            scan: ScanConfig {
                namespace: args.namespace.clone().filter(|ns| !ns.is_empty()),
                mode,
            },
            output: args.output.or(file.output).unwrap_or_default(),
        })
    }
}
