//! Run-length segmentation of boolean axis vectors.

use crate::geometry::RunInterval;

/// Extract every maximal run of `true` values, in ascending start order.
///
/// A run still open at the end of the vector closes at the last index.
///
/// ```
/// use spriteslice::detect::find_runs;
/// use spriteslice::geometry::RunInterval;
///
/// let runs = find_runs(&[false, true, true, false, true]);
/// assert_eq!(runs, vec![RunInterval::new(1, 2), RunInterval::new(4, 4)]);
/// ```
pub fn find_runs(flags: &[bool]) -> Vec<RunInterval> {
    let mut runs = Vec::new();
    let mut start: Option<u32> = None;

    for (i, &on) in flags.iter().enumerate() {
        let i = i as u32;
        match (on, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(RunInterval::new(s, i - 1));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        runs.push(RunInterval::new(s, flags.len() as u32 - 1));
    }

    runs
}
