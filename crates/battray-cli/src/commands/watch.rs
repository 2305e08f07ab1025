//! Monitor loop: the debounced evaluation pipeline with console sinks.
//!
//! Trigger sources feeding the debouncer: the refresh timer at the
//! configured cadence, and stdin (any input line forces a refresh, standing
//! in for the power/display/settings events a tray shell would wire up).

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use battray_core::{
    Category, ColorRole, Config, DisplaySink, NotificationSink, RenderError, StatusMonitor,
    UpdateDebouncer, DEBOUNCE_WINDOW,
};

use crate::sysfs::SysfsPowerSource;

/// Prints icon/tooltip changes instead of drawing a tray icon.
#[derive(Default)]
struct ConsoleDisplay {
    last_icon: String,
    last_tooltip: String,
}

impl DisplaySink for ConsoleDisplay {
    fn set_icon(&mut self, text: &str, color: ColorRole) -> Result<(), RenderError> {
        let line = format!("[{color:?}] {text}");
        if line != self.last_icon {
            println!("{line}");
            self.last_icon = line;
        }
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) {
        if text != self.last_tooltip {
            println!("  {}", text.replace('\n', " / "));
            self.last_tooltip = text.to_string();
        }
    }
}

struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn deliver(&mut self, title: Option<&str>, body: &str, category: Category) {
        match title {
            Some(title) => println!("!! [{category:?}] {title}: {body}"),
            None => println!("!! [{category:?}] {body}"),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load_or_default();
    let refresh = Duration::from_secs(u64::from(config.refresh_seconds.max(1)));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut monitor = StatusMonitor::new(
            SysfsPowerSource::new(),
            ConsoleDisplay::default(),
            ConsoleNotifier,
            config,
        );

        let debouncer = Arc::new(UpdateDebouncer::spawn(DEBOUNCE_WINDOW, move || {
            let events = monitor.evaluate(Utc::now());
            for event in &events {
                tracing::debug!(?event, "evaluation event");
            }
        }));

        // Initial update.
        debouncer.request_update();

        let timer = {
            let debouncer = Arc::clone(&debouncer);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(refresh);
                interval.tick().await;
                loop {
                    interval.tick().await;
                    debouncer.request_update();
                }
            })
        };

        {
            let debouncer = Arc::clone(&debouncer);
            std::thread::spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    if line.is_err() {
                        break;
                    }
                    debouncer.request_update();
                }
            });
        }

        tokio::signal::ctrl_c().await?;
        timer.abort();
        Ok(())
    })
}
