//! Clone count and cycle duration for a seamless loop.

use crate::CarouselOptions;

/// Shortest allowed cycle duration in seconds.
pub const MIN_DURATION_SECS: f64 = 0.1;

/// Most clone groups a single pass will create.
///
/// A sub-pixel source group in a wide container would otherwise ask for
/// hundreds of thousands of copies. Past this cap the strip no longer
/// covers the container plus one cycle.
pub const MAX_CLONE_GROUPS: usize = 256;

/// Geometry and timing for one loop of the strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutResult {
    /// Number of duplicate groups appended after the source group
    pub clone_count: usize,
    /// Translation distance of one full loop, in pixels
    pub cycle_width: f64,
    /// Time for one full loop, in seconds
    pub duration_secs: f64,
}

/// Outcome of a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutOutcome {
    /// Content is measurable; clones and timing are known
    Active(LayoutResult),
    /// Nothing to animate yet (empty or unrendered content)
    Paused,
}

impl LayoutOutcome {
    pub fn is_paused(&self) -> bool {
        matches!(self, LayoutOutcome::Paused)
    }

    pub fn result(&self) -> Option<&LayoutResult> {
        match self {
            LayoutOutcome::Active(result) => Some(result),
            LayoutOutcome::Paused => None,
        }
    }

    /// Clones this outcome asks for (zero when paused).
    pub fn clone_count(&self) -> usize {
        self.result().map(|r| r.clone_count).unwrap_or(0)
    }
}

/// Compute the layout for a source group inside a container.
///
/// ## Arguments
///
/// * `source_width` - Rendered width of the source group in pixels
/// * `container_width` - Rendered width of the container in pixels
/// * `has_content` - Whether the source group has any child nodes
/// * `options` - Resolved configuration
///
/// ## Returns
///
/// [`LayoutOutcome::Paused`] when either width is zero (or not a positive
/// finite number) or the source group is empty. Otherwise enough clones that
/// source plus clones cover the container and one more full cycle, capped
/// at [`MAX_CLONE_GROUPS`].
///
/// ## Example
///
/// ```rust
/// use strip_marquee::{compute_layout, CarouselOptions, LayoutOutcome};
///
/// let options = CarouselOptions { speed: 100.0, ..Default::default() };
/// let outcome = compute_layout(500.0, 1200.0, true, &options);
///
/// let LayoutOutcome::Active(result) = outcome else { panic!("paused") };
/// assert_eq!(result.clone_count, 3);
/// assert_eq!(result.cycle_width, 500.0);
/// assert_eq!(result.duration_secs, 5.0);
/// ```
pub fn compute_layout(
    source_width: f64,
    container_width: f64,
    has_content: bool,
    options: &CarouselOptions,
) -> LayoutOutcome {
    if !has_content || !is_measurable(source_width) || !is_measurable(container_width) {
        return LayoutOutcome::Paused;
    }

    let required_groups = (1.0 + container_width / source_width).ceil().max(2.0);
    let clone_count = (required_groups - 1.0).min(MAX_CLONE_GROUPS as f64) as usize;

    LayoutOutcome::Active(LayoutResult {
        clone_count,
        cycle_width: source_width,
        duration_secs: cycle_duration(source_width, options),
    })
}

/// Seconds for one loop: the explicit duration when set, else
/// `source_width / speed`, never below [`MIN_DURATION_SECS`].
pub fn cycle_duration(source_width: f64, options: &CarouselOptions) -> f64 {
    let duration = match options.duration {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => source_width / options.speed.max(crate::options::MIN_SPEED),
    };
    duration.max(MIN_DURATION_SECS)
}

#[inline]
fn is_measurable(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(speed: f64, duration: Option<f64>) -> CarouselOptions {
        CarouselOptions {
            speed,
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn reference_scenario() {
        let outcome = compute_layout(500.0, 1200.0, true, &options(100.0, None));
        assert_eq!(
            outcome,
            LayoutOutcome::Active(LayoutResult {
                clone_count: 3,
                cycle_width: 500.0,
                duration_secs: 5.0,
            })
        );
    }

    #[test]
    fn zero_width_pauses() {
        let opts = options(100.0, None);
        assert_eq!(compute_layout(0.0, 1200.0, true, &opts), LayoutOutcome::Paused);
        assert_eq!(compute_layout(500.0, 0.0, true, &opts), LayoutOutcome::Paused);
        assert_eq!(compute_layout(f64::NAN, 800.0, true, &opts), LayoutOutcome::Paused);
        assert_eq!(LayoutOutcome::Paused.clone_count(), 0);
    }

    #[test]
    fn empty_source_pauses() {
        let outcome = compute_layout(500.0, 1200.0, false, &options(100.0, None));
        assert!(outcome.is_paused());
    }

    #[test]
    fn wide_source_still_gets_one_clone() {
        let outcome = compute_layout(2000.0, 300.0, true, &options(100.0, None));
        assert_eq!(outcome.clone_count(), 1);
    }

    #[test]
    fn exact_multiple_container() {
        // 1 + 1000/500 = 3 groups, so 2 clones
        let outcome = compute_layout(500.0, 1000.0, true, &options(100.0, None));
        assert_eq!(outcome.clone_count(), 2);
    }

    #[test]
    fn coverage_invariant_holds() {
        let opts = options(90.0, None);
        for source in [16.0, 22.5, 33.0, 250.0, 999.0, 4096.0] {
            for container in [0.5, 1.0, 100.0, 640.0, 1280.0, 3840.0] {
                let outcome = compute_layout(source, container, true, &opts);
                let result = outcome.result().unwrap();
                assert!(result.clone_count >= 1);
                let covered = (result.clone_count + 1) as f64 * source;
                assert!(covered >= container + source, "{source} in {container}");
            }
        }
    }

    #[test]
    fn clone_count_is_capped() {
        let opts = options(90.0, None);
        assert_eq!(compute_layout(0.01, 1920.0, true, &opts).clone_count(), MAX_CLONE_GROUPS);
        assert_eq!(compute_layout(1e-9, 1e6, true, &opts).clone_count(), MAX_CLONE_GROUPS);
        assert_eq!(
            compute_layout(f64::MIN_POSITIVE, 1.0, true, &opts).clone_count(),
            MAX_CLONE_GROUPS
        );
        // just under the cap is untouched: 1 + 255 = 256 groups, 255 clones
        assert_eq!(compute_layout(4.0, 1020.0, true, &opts).clone_count(), 255);
    }

    #[test]
    fn duration_override_wins() {
        let outcome = compute_layout(500.0, 1200.0, true, &options(100.0, Some(12.0)));
        assert_eq!(outcome.result().unwrap().duration_secs, 12.0);
    }

    #[test]
    fn duration_is_floored() {
        assert_eq!(cycle_duration(5.0, &options(1000.0, None)), MIN_DURATION_SECS);
        assert_eq!(cycle_duration(500.0, &options(100.0, Some(0.01))), MIN_DURATION_SECS);
    }

    #[test]
    fn idempotent() {
        let opts = options(75.0, None);
        let a = compute_layout(321.0, 987.0, true, &opts);
        let b = compute_layout(321.0, 987.0, true, &opts);
        assert_eq!(a, b);
    }
}
