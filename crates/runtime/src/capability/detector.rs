//! One-shot, memoized subsystem detection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use super::probe::{AccessorHandle, ExtensionHost, ProbePlan, ResolvedPeerSource, Subsystem};
use super::{Capability, PeerSource};

/// Resolves the [`Capability`] once and hands out the memoized result.
pub struct CapabilityDetector {
    plan: ProbePlan,
    resolved: OnceLock<Capability>,
    probes: AtomicUsize,
}

impl CapabilityDetector {
    pub fn new(plan: ProbePlan) -> Self {
        Self {
            plan,
            resolved: OnceLock::new(),
            probes: AtomicUsize::new(0),
        }
    }

    /// Creates a detector that is already resolved to a host-provided source.
    pub fn with_source(subsystem: impl Into<String>, source: Arc<dyn PeerSource>) -> Self {
        let detector = Self::new(ProbePlan::default());
        let _ = detector
            .resolved
            .set(Capability::with_source(subsystem, source));
        detector
    }

    /// Returns the capability, probing the host on the first call only.
    pub fn detect(&self, host: &dyn ExtensionHost) -> &Capability {
        self.resolved.get_or_init(|| self.probe(host))
    }

    /// Returns the capability if detection already ran.
    pub fn resolved(&self) -> Option<&Capability> {
        self.resolved.get()
    }

    /// Number of times the host was actually probed (0 or 1).
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    pub fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    fn probe(&self, host: &dyn ExtensionHost) -> Capability {
        self.probes.fetch_add(1, Ordering::Relaxed);

        let found = self
            .plan
            .subsystems
            .iter()
            .find_map(|name| host.lookup_subsystem(name).map(|s| (name.clone(), s)));

        let Some((name, subsystem)) = found else {
            info!(
                target: "share::capability",
                candidates = self.plan.subsystems.len(),
                "Cooperative subsystem not found, sharing disabled"
            );
            return Capability::absent();
        };

        match self.resolve_accessor(&name, subsystem.as_ref()) {
            Some(handle) => {
                info!(
                    target: "share::capability",
                    subsystem = %name,
                    accessor = %handle,
                    "Cooperative subsystem detected"
                );
                let source = ResolvedPeerSource::new(subsystem, handle);
                Capability::with_source(name, Arc::new(source))
            }
            None => {
                info!(
                    target: "share::capability",
                    subsystem = %name,
                    "Cooperative subsystem has no peer collection, no peers will be offered"
                );
                Capability::without_accessor(name)
            }
        }
    }

    fn resolve_accessor(&self, name: &str, subsystem: &dyn Subsystem) -> Option<AccessorHandle> {
        self.plan.accessors.iter().find_map(|candidate| {
            let shape = subsystem.member_shape(candidate.kind, &candidate.member)?;
            if !shape.is_collection() {
                debug!(
                    target: "share::capability",
                    member = %candidate.member,
                    shape = ?shape,
                    "Skipping accessor candidate that is not a collection"
                );
                return None;
            }
            Some(AccessorHandle {
                subsystem: name.to_owned(),
                kind: candidate.kind,
                member: candidate.member.clone(),
            })
        })
    }
}

impl Default for CapabilityDetector {
    fn default() -> Self {
        Self::new(ProbePlan::default())
    }
}
