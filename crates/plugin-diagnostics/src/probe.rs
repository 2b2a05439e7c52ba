//! Compatibility probe: decides which of its features the runtime supports.

use std::sync::{Mutex, PoisonError};

use blockidle_plugin_sdk::prelude::*;

/// Annotates every surface, but only on runtimes new enough for it.
#[derive(Debug)]
pub struct CompatProbePlugin {
    gate: Mutex<FeatureGate>,
}

impl CompatProbePlugin {
    /// Registration id.
    pub const ID: &'static str = "compat-probe";
    /// Feature gated on the configured SDK version number.
    pub const SURFACE_ANNOTATIONS: &'static str = "surface-annotations";
    /// Feature gated on a release-channel runtime.
    pub const STABLE_TELEMETRY: &'static str = "stable-telemetry";

    /// Creates the probe, requiring `min_sdk_version_number` for annotations.
    pub fn new(min_sdk_version_number: u32) -> Self {
        let gate = FeatureGate::new()
            .feature(
                Self::SURFACE_ANNOTATIONS,
                CompatibilityRequirement::any().with_min_sdk_version_number(min_sdk_version_number),
            )
            .feature(
                Self::STABLE_TELEMETRY,
                CompatibilityRequirement::any().with_min_release_channel(ReleaseChannel::Release),
            );
        Self {
            gate: Mutex::new(gate),
        }
    }

    /// Returns whether `feature` was granted at process start.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_enabled(feature)
    }
}

impl PluginContract for CompatProbePlugin {
    fn on_host_process_ready(&self, application: &HostApplicationHandle) -> AppResult<()> {
        let runtime = application.runtime_descriptor();
        application.log(format!(
            "runtime host={} code={} sdk={} #{} ({})",
            runtime.host_version_name(),
            runtime.host_version_code(),
            runtime.sdk().display_name(),
            runtime.sdk().version_number(),
            runtime.sdk().release_channel(),
        ));

        let mut gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        for grant in gate.evaluate(runtime) {
            if grant.granted {
                application.log(format!("feature {} enabled", grant.feature));
            } else {
                let reasons: Vec<String> = grant.reasons.iter().map(ToString::to_string).collect();
                application.log(format!(
                    "feature {} disabled: {}",
                    grant.feature,
                    reasons.join("; ")
                ));
            }
        }
        Ok(())
    }

    fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()> {
        if self.is_enabled(Self::SURFACE_ANNOTATIONS) {
            screen.log(format!("annotating {}", screen.runtime_identity_tag()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockidle_plugin::PluginHost;
    use blockidle_plugin::api::RecordingSink;

    use super::*;

    fn runtime(sdk_number: u32) -> RuntimeDescriptor {
        let sdk = SdkDescriptor::new(
            "0.0.1",
            "0.0.1",
            sdk_number,
            ReleaseChannel::Alpha,
            1,
            "0-alpha-1",
        );
        RuntimeDescriptor::new("1.0", 1, sdk)
    }

    fn run(min_sdk: u32, sdk_number: u32) -> (Arc<CompatProbePlugin>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let probe = Arc::new(CompatProbePlugin::new(min_sdk));
        let mut host = PluginHost::with_sink(sink.clone());
        host.register(CompatProbePlugin::ID, probe.clone()).unwrap();
        host.start_process(Arc::new(()), runtime(sdk_number)).unwrap();
        host.create_surface(Arc::new(()), "ui.Editor").unwrap();
        (probe, sink)
    }

    #[test]
    fn test_annotates_on_new_enough_runtime() {
        let (probe, sink) = run(2, 2);
        assert!(probe.is_enabled(CompatProbePlugin::SURFACE_ANNOTATIONS));
        assert!(!probe.is_enabled(CompatProbePlugin::STABLE_TELEMETRY));
        let lines = sink.lines();
        assert!(lines.iter().any(|l| l == "[Plugin] annotating ui.Editor"));
    }

    #[test]
    fn test_degrades_on_old_runtime() {
        let (probe, sink) = run(2, 1);
        assert!(!probe.is_enabled(CompatProbePlugin::SURFACE_ANNOTATIONS));
        let lines = sink.lines();
        assert!(lines.iter().all(|l| !l.contains("annotating")));
        assert!(lines.iter().any(|l| {
            l.contains("feature surface-annotations disabled")
                && l.contains("sdk version number 1 < required 2")
        }));
    }
}
