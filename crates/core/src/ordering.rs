//! Output ordering for matched audio assets.
//!
//! Assets sort by the first slide that references them. Ties are broken by
//! the first run of decimal digits in the filename, compared numerically,
//! so `media9.mp3` comes before `media10.mp3`.

use crate::AudioAsset;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Regex matching the first run of decimal digits in a filename.
static DIGIT_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Extract the first run of decimal digits from a name.
pub fn first_digit_run(name: &str) -> Option<&str> {
    DIGIT_RUN_REGEX.find(name).map(|m| m.as_str())
}

/// Compare two digit runs by numeric value without parsing.
///
/// Leading zeros are ignored, so arbitrarily long runs never overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two normalized filenames for tie-breaking.
///
/// Numeric comparison applies only when both names carry a digit run;
/// otherwise, and when the numbers are equal, names compare lexically.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match (first_digit_run(a), first_digit_run(b)) {
        (Some(da), Some(db)) => compare_digit_runs(da, db).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Compare two assets in output order.
pub fn compare_assets(a: &AudioAsset, b: &AudioAsset) -> Ordering {
    a.first_slide()
        .cmp(&b.first_slide())
        .then_with(|| compare_names(&a.normalized_name, &b.normalized_name))
}

/// Sort assets into output order.
pub fn sort_assets(assets: &mut [AudioAsset]) {
    assets.sort_by(compare_assets);
}
