//! ``src/model/cpu_chart.rs``
//! ============================================================================
//! # Synthetic CPU usage series
//!
//! There is no telemetry source; the detail view shows a plausible curve
//! derived from uptime plus jitter. Labels are localized and rebuilt on
//! language change.

use rand::Rng;

use crate::i18n::{LanguageSubscription, Translator};
use crate::model::server::{Server, ServerId};

const HOUR_MS: i64 = 60 * 60 * 1000;
const MAX_HOURS: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuPoint {
    pub timestamp_ms: i64,
    pub usage: f64,
}

/// `hours + 1` points ending at `now_ms`, one per hour, where hours is the
/// uptime clamped to `1..=24`. Usage stays within 10..=90, one decimal.
pub fn generate_cpu_data_points<R: Rng + ?Sized>(
    uptime_hours: u32,
    now_ms: i64,
    rng: &mut R,
) -> Vec<CpuPoint> {
    let hours = uptime_hours.clamp(1, MAX_HOURS);

    (0..=hours)
        .rev()
        .map(|i| {
            let base = 40.0 + (f64::from(i) / 3.0).sin() * 15.0;
            let variation = (rng.random::<f64>() - 0.5) * 20.0;
            let usage = (base + variation).clamp(10.0, 90.0);

            CpuPoint {
                timestamp_ms: now_ms - i64::from(i) * HOUR_MS,
                usage: (usage * 10.0).round() / 10.0,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub series: String,
}

impl ChartLabels {
    #[must_use]
    pub fn localized(translator: &Translator) -> Self {
        Self {
            title: translator.instant("CHART.CPU_USAGE_TITLE"),
            x_axis: translator.instant("CHART.TIME"),
            y_axis: translator.instant("CHART.CPU_USAGE_PERCENT"),
            series: translator.instant("CHART.CPU_USAGE_LABEL"),
        }
    }
}

/// Chart state for the server on the detail view.
#[derive(Debug)]
pub struct CpuChart {
    server_id: ServerId,
    uptime_hours: u32,
    pub points: Vec<CpuPoint>,
    pub labels: ChartLabels,
    language: LanguageSubscription,
}

impl CpuChart {
    pub fn new<R: Rng + ?Sized>(
        server: &Server,
        translator: &Translator,
        now_ms: i64,
        rng: &mut R,
    ) -> Self {
        Self {
            server_id: server.id.clone(),
            uptime_hours: server.uptime_hours,
            points: generate_cpu_data_points(server.uptime_hours, now_ms, rng),
            labels: ChartLabels::localized(translator),
            language: translator.subscribe(),
        }
    }

    fn rebuild<R: Rng + ?Sized>(&mut self, translator: &Translator, now_ms: i64, rng: &mut R) {
        self.points = generate_cpu_data_points(self.uptime_hours, now_ms, rng);
        self.labels = ChartLabels::localized(translator);
    }

    /// Rebuild when the server or its uptime changed. Returns whether it did.
    pub fn sync_server<R: Rng + ?Sized>(
        &mut self,
        server: &Server,
        translator: &Translator,
        now_ms: i64,
        rng: &mut R,
    ) -> bool {
        if self.server_id == server.id && self.uptime_hours == server.uptime_hours {
            return false;
        }

        self.server_id.clone_from(&server.id);
        self.uptime_hours = server.uptime_hours;
        self.rebuild(translator, now_ms, rng);
        true
    }

    /// Rebuild if the language changed since the last check.
    pub fn refresh_if_language_changed<R: Rng + ?Sized>(
        &mut self,
        translator: &Translator,
        now_ms: i64,
        rng: &mut R,
    ) -> bool {
        if self.language.changed().is_none() {
            return false;
        }

        self.rebuild(translator, now_ms, rng);
        true
    }

    /// (min, max) timestamps for the x axis.
    #[must_use]
    pub fn time_bounds(&self) -> (i64, i64) {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first.timestamp_ms, last.timestamp_ms),
            _ => (0, 0),
        }
    }
}
