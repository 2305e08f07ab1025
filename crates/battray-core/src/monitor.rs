//! The evaluation pipeline: sample, classify, render, notify.
//!
//! One [`StatusMonitor::evaluate`] call is one cycle. It never fails:
//! missing sample data is a classification branch, a display sink that keeps
//! rejecting icon updates degrades to a diagnostics flag, and a declined
//! notification is expected control flow.

use chrono::{DateTime, Utc};

use crate::error::RenderError;
use crate::events::Event;
use crate::notify::{NotificationCandidate, NotificationGate, NotificationSink};
use crate::power::PowerSource;
use crate::retry::retry;
use crate::status::{classify, Category, ColorRole};
use crate::storage::Config;

/// Attempts before an icon update is written off as a persistent failure.
pub const MAX_ICON_ATTEMPTS: u32 = 5;

/// Rendering surface for the tray indicator. Fire-and-forget apart from the
/// icon, which may transiently refuse an update.
pub trait DisplaySink {
    fn set_icon(&mut self, text: &str, color: ColorRole) -> Result<(), RenderError>;
    fn set_tooltip(&mut self, text: &str);
}

/// Owns the injected configuration and the notification memory, and runs
/// evaluation cycles against the supplied source and sinks.
pub struct StatusMonitor<P, D, N> {
    source: P,
    display: D,
    notifier: N,
    config: Config,
    gate: NotificationGate,
    last_tooltip: String,
    render_error: Option<RenderError>,
}

impl<P, D, N> StatusMonitor<P, D, N>
where
    P: PowerSource,
    D: DisplaySink,
    N: NotificationSink,
{
    pub fn new(source: P, display: D, notifier: N, config: Config) -> Self {
        Self {
            source,
            display,
            notifier,
            config,
            gate: NotificationGate::new(),
            last_tooltip: String::new(),
            render_error: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Latest persistent icon render failure, if any. Cleared by the next
    /// successful render.
    pub fn render_error(&self) -> Option<&RenderError> {
        self.render_error.as_ref()
    }

    /// Run one evaluation cycle.
    pub fn evaluate(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let sample = self.source.current_sample();
        let report = classify(&sample, &self.config);

        let mut events = vec![Event::StatusEvaluated {
            percent: sample.percent,
            charge_state: sample.charge_state,
            color: report.color,
            category: report.category,
            at: now,
        }];

        let icon_text = &report.icon_text;
        let color = report.color;
        match retry(MAX_ICON_ATTEMPTS, || self.display.set_icon(icon_text, color)) {
            Ok(()) => self.render_error = None,
            Err(err) => {
                tracing::warn!(error = %err, attempts = MAX_ICON_ATTEMPTS, "giving up on icon render");
                self.render_error = Some(err);
                events.push(Event::IconRenderFailed {
                    attempts: MAX_ICON_ATTEMPTS,
                    at: now,
                });
            }
        }

        if let Some(tooltip) = &report.tooltip {
            self.last_tooltip = tooltip.render();
        }
        self.display.set_tooltip(&self.last_tooltip);

        let candidate = NotificationCandidate::from_report(&report);
        if candidate.category == Category::None {
            return events;
        }

        if self.gate.consider(candidate.category, now) {
            tracing::info!(category = ?candidate.category, "delivering notification");
            self.notifier
                .deliver(candidate.title.as_deref(), &candidate.body, candidate.category);
            events.push(Event::NotificationDelivered {
                category: candidate.category,
                at: now,
            });
        } else {
            events.push(Event::NotificationSuppressed {
                category: candidate.category,
                at: now,
            });
        }
        events
    }
}
