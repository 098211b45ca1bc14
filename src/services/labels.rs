use crate::models::{ComparisonState, ImageSlot};
use crate::services::metric::CompressionMetric;

/// Size in KB to two decimals, with exact halves rounded up.
fn format_kb(size_kb: f64) -> String {
    format!("{:.2}", (size_kb * 100.0).round() / 100.0)
}

/// Caption for the before image: `"<filename> (<size> KB)"`.
pub fn before_label(slot: &ImageSlot) -> String {
    format!("{} ({} KB)", slot.filename(), format_kb(slot.size_kb()))
}

/// Caption for the after image, with the size change when it is known.
pub fn after_label(slot: &ImageSlot, metric: Option<&CompressionMetric>) -> String {
    match metric {
        Some(metric) => format!(
            "{} ({} KB, {})",
            slot.filename(),
            format_kb(slot.size_kb()),
            metric.classification()
        ),
        None => format!("{} ({} KB)", slot.filename(), format_kb(slot.size_kb())),
    }
}

/// Both captions for a state snapshot, as `(before, after)`.
pub fn labels(state: &ComparisonState) -> (String, String) {
    let metric = state.compression_metric();
    (
        before_label(&state.before),
        after_label(&state.after, metric.as_ref()),
    )
}
