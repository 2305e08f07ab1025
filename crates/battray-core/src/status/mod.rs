mod classify;
mod format;

pub use classify::{
    classify, high_or_full_category, Category, ColorRole, StatusReport, Tooltip, FULL_GLYPH,
    NO_BATTERY_GLYPH, UNKNOWN_GLYPH,
};
pub use format::readable_duration;
