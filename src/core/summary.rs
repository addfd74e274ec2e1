use compact_str::{format_compact, CompactString};
use serde::Serialize;

/// One slice of the completion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySlice {
    pub label: CompactString,
    pub size: u64,
    pub percentage: f64,
    pub is_merged: bool,
    pub merged_count: usize,
}

/// Splits the size history of a scan into consecutive phases and reports how
/// much was discovered in each one.
///
/// `history` holds successive `total_size` samples of a single scan. Phases
/// whose share of the final total is below `threshold` (a fraction) are folded
/// into one trailing "Others" slice. Phases that discovered nothing are left
/// out entirely.
pub fn build_summary(history: &[u64], phases: usize, threshold: f64) -> Vec<SummarySlice> {
    let total = match history.last() {
        Some(&total) if total > 0 => total,
        _ => return Vec::new(),
    };
    let phases = phases.clamp(1, history.len());

    let mut result = Vec::new();
    let mut merged_size: u64 = 0;
    let mut merged_count: usize = 0;
    let mut previous: u64 = 0;

    for phase in 0..phases {
        let end = (phase + 1) * history.len() / phases;
        let reached = history[end - 1];
        let size = reached.saturating_sub(previous);
        previous = previous.max(reached);

        if size == 0 {
            continue;
        }

        let fraction = size as f64 / total as f64;
        if fraction >= threshold {
            result.push(SummarySlice {
                label: format_compact!("Phase {}/{}", phase + 1, phases),
                size,
                percentage: fraction * 100.0,
                is_merged: false,
                merged_count: 0,
            });
        } else {
            merged_size += size;
            merged_count += 1;
        }
    }

    if merged_count > 0 {
        result.push(SummarySlice {
            label: CompactString::const_new("Others"),
            size: merged_size,
            percentage: merged_size as f64 / total as f64 * 100.0,
            is_merged: true,
            merged_count,
        });
    }

    result
}
