use crate::sections::DisplayMode;

pub const MOBILE_BREAKPOINT_PX: f64 = 769.0;
pub const MD_BREAKPOINT_PX: f64 = 1182.0;
pub const LG_BREAKPOINT_PX: f64 = 1920.0;

pub const SCROLL_THROTTLE_MS: f64 = 33.0;
pub const DARKEN_FADE_EXPONENT: f64 = 0.12;
pub const MOBILE_DARKEN_FLOOR: f64 = 0.5;
pub const MOBILE_SECTION_START_EXPONENT: f64 = 1.25;
pub const MOBILE_VIRTUAL_HEIGHT_FACTOR: f64 = 1.7;
pub const MOBILE_SCROLL_SLOWDOWN: f64 = 0.6;
pub const INDEX_CHANGE_GRACE_MS: u32 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollDirection {
    Up,
    Down,
}

pub struct DirectionTracker {
    last_seen: usize,
    previous_index: usize,
    direction: Option<ScrollDirection>,
}

impl DirectionTracker {
    pub fn new(initial_index: usize) -> Self {
        Self {
            last_seen: initial_index,
            previous_index: initial_index,
            direction: None,
        }
    }

    pub fn observe(&mut self, current_index: usize) {
        if current_index > self.last_seen {
            self.direction = Some(ScrollDirection::Down);
            self.previous_index = self.last_seen;
        } else if current_index < self.last_seen {
            self.direction = Some(ScrollDirection::Up);
            self.previous_index = self.last_seen;
        }
        self.last_seen = current_index;
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    // The index that was active immediately before the most recent transition.
    pub fn previous_index(&self) -> usize {
        self.previous_index
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Breakpoint {
    Mobile,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub fn classify(viewport_width: f64, is_mobile: bool) -> Self {
        if is_mobile || viewport_width <= MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else if viewport_width <= MD_BREAKPOINT_PX {
            Self::Md
        } else if viewport_width <= LG_BREAKPOINT_PX {
            Self::Lg
        } else {
            Self::Xl
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BgStyle {
    pub position: &'static str,
    pub size: &'static str,
}

// Hand-tuned framing per breakpoint and display mode, keeps the cropped
// background centered on its subject across aspect ratios.
pub fn background_style(mode: DisplayMode, breakpoint: Breakpoint, force_center: bool) -> BgStyle {
    let resolved = match (breakpoint, mode) {
        (Breakpoint::Mobile, DisplayMode::Light) => BgStyle {
            position: "center bottom 560%",
            size: "230%",
        },
        (Breakpoint::Mobile, DisplayMode::Dark) => BgStyle {
            position: "center bottom 400%",
            size: "240%",
        },
        (Breakpoint::Md, DisplayMode::Light) => BgStyle {
            position: "center right 65%",
            size: "210%",
        },
        (Breakpoint::Md, DisplayMode::Dark) => BgStyle {
            position: "center",
            size: "220%",
        },
        (Breakpoint::Lg, _) => BgStyle {
            position: "center right 205%",
            size: "110%",
        },
        (Breakpoint::Xl, _) => BgStyle {
            position: "left",
            size: "120%",
        },
    };

    if force_center {
        BgStyle {
            position: "center",
            size: resolved.size,
        }
    } else {
        resolved
    }
}

pub fn preload_window(current_index: usize, section_count: usize) -> Vec<usize> {
    let current = current_index as i64;
    let mut indices = Vec::with_capacity(3);

    for candidate in [current, current + 1, current - 1] {
        if candidate >= 0 && (candidate as usize) < section_count {
            indices.push(candidate as usize);
        }
    }

    indices
}

// Progress of the departing layer while scrolling backward: 0 keeps it fully
// covering, 1 means fully revealed.
pub fn reveal_progress(scroll_top: f64, unit_height: f64) -> f64 {
    if unit_height <= 0.0 {
        return 0.0;
    }

    let within_unit = scroll_top.rem_euclid(unit_height);
    ((unit_height - within_unit) / unit_height).clamp(0.0, 1.0)
}

pub fn section_darken(
    scroll_top: f64,
    section_top: f64,
    section_height: f64,
    previous: f64,
) -> f64 {
    if section_height <= 0.0 {
        return previous;
    }

    // Outside the tracked section (transient during fast scroll): keep the
    // previous value rather than snapping.
    if scroll_top < section_top || scroll_top > section_top + section_height {
        return previous;
    }

    let progress = ((scroll_top - section_top) / section_height).clamp(0.0, 1.0);
    (1.0 - progress.powf(DARKEN_FADE_EXPONENT)).clamp(0.0, 1.0)
}

pub fn mobile_darken(scroll_top: f64, current_index: usize, container_height: f64) -> f64 {
    if container_height <= 0.0 {
        return 1.0;
    }

    let section_start =
        (current_index as f64).powf(MOBILE_SECTION_START_EXPONENT) * container_height;
    let virtual_height = container_height * MOBILE_VIRTUAL_HEIGHT_FACTOR;
    let progress = ((scroll_top - section_start) / virtual_height).clamp(0.0, 1.0);

    1.0 - progress * (1.0 - MOBILE_DARKEN_FLOOR)
}

pub fn slowed_scroll_top(
    touch_start_scroll_top: f64,
    touch_start_y: f64,
    current_y: f64,
    slowdown_factor: f64,
) -> f64 {
    touch_start_scroll_top + (touch_start_y - current_y) * slowdown_factor
}

pub struct ThrottleGate {
    interval_ms: f64,
    last_admitted: Option<f64>,
}

impl ThrottleGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_admitted {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_admitted = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_reports_no_direction_until_first_change() {
        let mut tracker = DirectionTracker::new(3);
        assert_eq!(tracker.direction(), None);
        assert_eq!(tracker.previous_index(), 3);

        tracker.observe(3);
        assert_eq!(tracker.direction(), None);
        assert_eq!(tracker.previous_index(), 3);
    }

    #[test]
    fn tracker_repeat_index_preserves_direction_and_previous() {
        let mut tracker = DirectionTracker::new(0);
        tracker.observe(1);
        assert_eq!(tracker.direction(), Some(ScrollDirection::Down));
        assert_eq!(tracker.previous_index(), 0);

        tracker.observe(1);
        assert_eq!(tracker.direction(), Some(ScrollDirection::Down));
        assert_eq!(tracker.previous_index(), 0);
    }

    #[test]
    fn tracker_forward_then_backward_scenario() {
        let mut tracker = DirectionTracker::new(0);
        tracker.observe(1);
        tracker.observe(2);
        assert_eq!(tracker.direction(), Some(ScrollDirection::Down));
        assert_eq!(tracker.previous_index(), 1);

        tracker.observe(1);
        assert_eq!(tracker.direction(), Some(ScrollDirection::Up));
        assert_eq!(tracker.previous_index(), 2);
    }

    #[test]
    fn tracker_previous_index_is_immediate_predecessor_after_jumps() {
        let mut tracker = DirectionTracker::new(0);
        tracker.observe(2);
        tracker.observe(5);
        tracker.observe(3);
        assert_eq!(tracker.direction(), Some(ScrollDirection::Up));
        assert_eq!(tracker.previous_index(), 5);
    }

    #[test]
    fn breakpoint_classification_boundaries() {
        assert_eq!(Breakpoint::classify(769.0, false), Breakpoint::Mobile);
        assert_eq!(Breakpoint::classify(770.0, false), Breakpoint::Md);
        assert_eq!(Breakpoint::classify(1182.0, false), Breakpoint::Md);
        assert_eq!(Breakpoint::classify(1183.0, false), Breakpoint::Lg);
        assert_eq!(Breakpoint::classify(1920.0, false), Breakpoint::Lg);
        assert_eq!(Breakpoint::classify(1921.0, false), Breakpoint::Xl);
    }

    #[test]
    fn mobile_classification_wins_over_width() {
        assert_eq!(Breakpoint::classify(2400.0, true), Breakpoint::Mobile);
    }

    #[test]
    fn force_center_overrides_position_and_keeps_size() {
        let breakpoints = [
            Breakpoint::Mobile,
            Breakpoint::Md,
            Breakpoint::Lg,
            Breakpoint::Xl,
        ];
        let modes = [DisplayMode::Dark, DisplayMode::Light];

        for breakpoint in breakpoints {
            for mode in modes {
                let plain = background_style(mode, breakpoint, false);
                let centered = background_style(mode, breakpoint, true);
                assert_eq!(centered.position, "center");
                assert_eq!(centered.size, plain.size);
            }
        }
    }

    #[test]
    fn style_table_spot_checks() {
        let mobile_dark = background_style(DisplayMode::Dark, Breakpoint::Mobile, false);
        assert_eq!(mobile_dark.position, "center bottom 400%");
        assert_eq!(mobile_dark.size, "240%");

        let xl_light = background_style(DisplayMode::Light, Breakpoint::Xl, false);
        assert_eq!(xl_light.position, "left");
        assert_eq!(xl_light.size, "120%");
    }

    #[test]
    fn preload_window_clamps_at_sequence_edges() {
        assert_eq!(preload_window(0, 3), vec![0, 1]);
        assert_eq!(preload_window(2, 3), vec![2, 1]);
        assert_eq!(preload_window(1, 3), vec![1, 2, 0]);
        assert_eq!(preload_window(0, 1), vec![0]);
        assert_eq!(preload_window(0, 0), Vec::<usize>::new());
    }

    #[test]
    fn preload_window_skips_out_of_range_current() {
        assert_eq!(preload_window(3, 3), vec![2]);
        assert_eq!(preload_window(10, 3), Vec::<usize>::new());
    }

    #[test]
    fn section_darken_is_full_at_section_top_and_fades_fast() {
        let at_top = section_darken(1000.0, 1000.0, 800.0, 1.0);
        assert!((at_top - 1.0).abs() < 1e-9);

        let shallow = section_darken(1008.0, 1000.0, 800.0, 1.0);
        assert!(shallow < 0.65, "power curve should fade quickly, got {shallow}");

        let deep = section_darken(1792.0, 1000.0, 800.0, 1.0);
        assert!(deep < 0.01);
    }

    #[test]
    fn section_darken_retains_previous_outside_bounds() {
        assert_eq!(section_darken(10.0, 1000.0, 800.0, 0.42), 0.42);
        assert_eq!(section_darken(5000.0, 1000.0, 800.0, 0.42), 0.42);
        assert_eq!(section_darken(1200.0, 1000.0, 0.0, 0.42), 0.42);
    }

    #[test]
    fn section_darken_stays_clamped_for_arbitrary_offsets() {
        let mut previous = 1.0;
        for step in -50i32..150 {
            let scroll_top = f64::from(step) * 37.0;
            previous = section_darken(scroll_top, 800.0, 800.0, previous);
            assert!((0.0..=1.0).contains(&previous), "out of range at {scroll_top}");
        }
    }

    #[test]
    fn mobile_darken_floor_is_half() {
        assert_eq!(mobile_darken(1_000_000.0, 0, 700.0), MOBILE_DARKEN_FLOOR);
        assert_eq!(mobile_darken(0.0, 2, 700.0), 1.0);
        assert_eq!(mobile_darken(-400.0, 0, 700.0), 1.0);
    }

    #[test]
    fn mobile_darken_stays_within_floor_and_one() {
        for step in -20i32..200 {
            let value = mobile_darken(f64::from(step) * 91.0, 3, 700.0);
            assert!((MOBILE_DARKEN_FLOOR..=1.0).contains(&value));
        }
    }

    #[test]
    fn mobile_darken_without_layout_defaults_to_opaque() {
        assert_eq!(mobile_darken(500.0, 1, 0.0), 1.0);
    }

    #[test]
    fn reveal_progress_is_clamped_and_periodic() {
        assert_eq!(reveal_progress(0.0, 800.0), 1.0);
        assert_eq!(reveal_progress(400.0, 800.0), 0.5);
        assert_eq!(reveal_progress(2000.0, 800.0), 0.5);
        assert_eq!(reveal_progress(-200.0, 800.0), 0.25);
        assert_eq!(reveal_progress(123.0, 0.0), 0.0);

        for step in 0..100 {
            let value = reveal_progress(f64::from(step) * 53.0, 800.0);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn slowed_scroll_top_compresses_drag_deltas() {
        let full = slowed_scroll_top(100.0, 500.0, 300.0, 1.0);
        let slowed = slowed_scroll_top(100.0, 500.0, 300.0, 0.6);
        assert_eq!(full, 300.0);
        assert_eq!(slowed, 220.0);

        let reverse = slowed_scroll_top(100.0, 300.0, 500.0, 0.6);
        assert_eq!(reverse, -20.0);
    }

    #[test]
    fn throttle_gate_admits_at_fixed_cadence() {
        let mut gate = ThrottleGate::new(SCROLL_THROTTLE_MS);
        assert!(gate.admit(1_000.0));
        assert!(!gate.admit(1_010.0));
        assert!(!gate.admit(1_032.0));
        assert!(gate.admit(1_033.0));
        assert!(!gate.admit(1_040.0));

        gate.reset();
        assert!(gate.admit(1_041.0));
    }
}
