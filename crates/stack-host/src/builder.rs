//! Fluent builder for constructing a [`Stage`].

use std::collections::HashSet;

use stack_core::RunConfig;

use crate::{Host, Stage, StageError, StageResult};

/// Fluent builder for [`Stage`].
///
/// # Example
///
/// ```rust,ignore
/// let mut stage = StageBuilder::new(RunConfig::default())
///     .host(Host::new("guard").with_action(Patrol::new()))
///     .host(Host::new("door"))
///     .build()?;
/// stage.run(&mut NoopObserver)?;
/// ```
pub struct StageBuilder {
    config: RunConfig,
    hosts:  Vec<Host>,
}

impl StageBuilder {
    pub fn new(config: RunConfig) -> Self {
        Self { config, hosts: Vec::new() }
    }

    /// Add a host.  Hosts are stepped in the order they were added.
    pub fn host(mut self, host: Host) -> Self {
        self.hosts.push(host);
        self
    }

    pub fn hosts(mut self, hosts: impl IntoIterator<Item = Host>) -> Self {
        self.hosts.extend(hosts);
        self
    }

    /// Validate the config and host labels and return a ready-to-run
    /// [`Stage`].
    pub fn build(self) -> StageResult<Stage> {
        self.config.validate()?;

        let mut labels = HashSet::with_capacity(self.hosts.len());
        for host in &self.hosts {
            if !labels.insert(host.label.as_str()) {
                return Err(StageError::DuplicateHost(host.label.clone()));
            }
        }

        Ok(Stage {
            clock:  self.config.make_clock(),
            config: self.config,
            hosts:  self.hosts,
        })
    }
}
