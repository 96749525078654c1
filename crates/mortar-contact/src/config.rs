//! Configuration of the master/slave contact pass.

use mortar_mesh::CONTACT_SUB_VIEW;

use crate::{Error, Result};

/// Configuration for [`crate::MasterSlaveProcess`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcessConfig {
    /// Sub-view receiving the interface entities
    pub contact_sub_view: String,

    /// Sub-view to classify; `None` scans the whole root
    pub region: Option<String>,

    /// Dedicated worker count; `None` uses the global pool
    pub num_threads: Option<usize>,

    /// Zero contact quantities on nodes outside the interface
    pub reset_stale_state: bool,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            contact_sub_view: CONTACT_SUB_VIEW.to_string(),
            region: None,
            num_threads: None,
            reset_stale_state: true,
        }
    }
}

impl ProcessConfig {
    /// Create config from environment variables with defaults for anything unset.
    ///
    /// - `MORTAR_CONTACT_SUB_VIEW`: target sub-view name
    /// - `MORTAR_REGION`: scanned sub-view (empty = root)
    /// - `MORTAR_THREADS`: worker count
    /// - `MORTAR_RESET_STALE`: `true`/`false`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ProcessConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("MORTAR_CONTACT_SUB_VIEW") {
            config.contact_sub_view = name.trim().to_string();
        }

        config.region = lookup("MORTAR_REGION")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(threads) = lookup("MORTAR_THREADS") {
            let n = threads
                .trim()
                .parse::<usize>()
                .map_err(|e| Error::InvalidConfig(format!("MORTAR_THREADS={threads:?}: {e}")))?;
            config.num_threads = Some(n);
        }

        if let Some(flag) = lookup("MORTAR_RESET_STALE") {
            config.reset_stale_state = flag
                .trim()
                .parse::<bool>()
                .map_err(|e| Error::InvalidConfig(format!("MORTAR_RESET_STALE={flag:?}: {e}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_contact_sub_view(mut self, name: impl Into<String>) -> Self {
        self.contact_sub_view = name.into();
        self
    }

    pub fn with_region(mut self, name: impl Into<String>) -> Self {
        self.region = Some(name.into());
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    pub fn with_reset_stale_state(mut self, reset: bool) -> Self {
        self.reset_stale_state = reset;
        self
    }

    /// Reject configurations the pass cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.contact_sub_view.is_empty() {
            return Err(Error::InvalidConfig("contact sub-view name is empty".into()));
        }
        if self.num_threads == Some(0) {
            return Err(Error::InvalidConfig("worker count must be at least 1".into()));
        }
        Ok(())
    }
}
