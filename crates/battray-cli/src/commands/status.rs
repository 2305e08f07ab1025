use battray_core::{classify, Config, PowerSource};

use crate::sysfs::SysfsPowerSource;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let sample = SysfsPowerSource::new().current_sample();
    let report = classify(&sample, &config);

    if json {
        let out = serde_json::json!({
            "sample": sample,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} ({:?})", report.icon_text, report.color);
        if let Some(tooltip) = &report.tooltip {
            println!("{}", tooltip.render());
        }
    }
    Ok(())
}
