#![allow(dead_code)]

use metrics::LocalRecorderGuard;
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

// ============================================================================
// Captured metrics
// ============================================================================

/// Records every metric emitted on the current thread while alive.
///
/// `#[tokio::test]` runs on a current-thread runtime, so events emitted by
/// awaited futures land in the thread-local recorder.
pub struct MetricsCapture {
    recorder: DebuggingRecorder,
    snapshotter: Snapshotter,
}

impl MetricsCapture {
    pub fn new() -> Self {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        Self {
            recorder,
            snapshotter,
        }
    }

    pub fn install(&self) -> LocalRecorderGuard<'_> {
        metrics::set_default_local_recorder(&self.recorder)
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        let series = self
            .snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| {
                let key = key.key();
                let mut labels: Vec<(String, String)> = key
                    .labels()
                    .map(|label| (label.key().to_string(), label.value().to_string()))
                    .collect();
                labels.sort();
                Series {
                    name: key.name().to_string(),
                    labels,
                    value,
                }
            })
            .collect();
        MetricSnapshot { series }
    }
}

pub struct Series {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: DebugValue,
}

pub struct MetricSnapshot {
    series: Vec<Series>,
}

impl MetricSnapshot {
    fn find(&self, name: &str, labels: &[(&str, &str)]) -> Option<&DebugValue> {
        let mut wanted: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        wanted.sort();
        self.series
            .iter()
            .find(|series| series.name == name && series.labels == wanted)
            .map(|series| &series.value)
    }

    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        match self.find(name, labels)? {
            DebugValue::Counter(value) => Some(*value),
            _ => None,
        }
    }

    pub fn gauge(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        match self.find(name, labels)? {
            DebugValue::Gauge(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    /// Every series registered under `name`, whatever its labels.
    pub fn series_named(&self, name: &str) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|series| series.name == name)
            .collect()
    }

    /// Sum of every counter series registered under `name`.
    pub fn counter_total(&self, name: &str) -> u64 {
        self.series_named(name)
            .iter()
            .filter_map(|series| match series.value {
                DebugValue::Counter(value) => Some(value),
                _ => None,
            })
            .sum()
    }
}
