//! Main image whitespace inspection.
//!
//! The main image column should fill the media wrapper minus the thumbnail
//! column and the gap. When it uses less than the fix threshold, a style plan
//! forces a two-column grid and stretches the main column to the computed
//! width. Read-back is synchronous: measure, apply, measure again.

use crate::config::LayoutConfig;
use crate::constants::MAIN_INNER_HEIGHT;
use crate::error::GalleryError;

/// Widths read from the host, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutMeasurement {
    /// Width of the media wrapper (gallery column of the product page)
    pub media_width: f32,
    /// Width of the thumbnail column, if it is rendered
    pub thumbnails_width: Option<f32>,
    /// Width of the main image container
    pub main_width: f32,
}

impl LayoutMeasurement {
    /// Width the main column should have.
    pub fn expected_main_width(&self, config: &LayoutConfig) -> f32 {
        let thumbnails = self
            .thumbnails_width
            .unwrap_or(config.thumbnail_column_width);
        self.media_width - thumbnails - config.column_gap
    }

    /// Rounded percentage of the expected width the main column uses.
    ///
    /// `None` when nothing measurable is rendered (zero media width or no room
    /// left beside the thumbnails).
    pub fn utilization_percent(&self, config: &LayoutConfig) -> Option<u32> {
        let expected = self.expected_main_width(config);
        if self.media_width <= 0.0 || expected <= 0.0 || self.main_width < 0.0 {
            return None;
        }
        Some((self.main_width / expected * 100.0).round() as u32)
    }

    pub fn needs_fix(&self, config: &LayoutConfig) -> bool {
        self.utilization_percent(config)
            .is_some_and(|percent| percent < config.fix_threshold_percent)
    }

    pub fn is_optimal(&self, config: &LayoutConfig) -> bool {
        self.utilization_percent(config)
            .is_some_and(|percent| percent >= config.optimal_threshold_percent)
    }
}

/// Elements the whitespace fix touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTarget {
    /// `.product-gallery`
    Gallery,
    /// `.product-gallery__main`
    Main,
    /// `.product-gallery__main-inner`
    MainInner,
    /// Every `.product-gallery__main-image`
    MainImages,
    /// Every `.product-gallery__image`
    Images,
    /// `.product__media-wrapper`
    MediaWrapper,
}

/// One inline style change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOp {
    Set {
        property: &'static str,
        value: String,
        important: bool,
    },
    Remove { property: &'static str },
}

impl StyleOp {
    fn important(property: &'static str, value: impl Into<String>) -> Self {
        StyleOp::Set {
            property,
            value: value.into(),
            important: true,
        }
    }
}

/// Ordered list of style changes per target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePlan {
    pub entries: Vec<(LayoutTarget, StyleOp)>,
}

impl StylePlan {
    fn push(&mut self, target: LayoutTarget, op: StyleOp) {
        self.entries.push((target, op));
    }

    fn set_all(&mut self, target: LayoutTarget, declarations: &[(&'static str, &str)]) {
        for &(property, value) in declarations {
            self.push(target, StyleOp::important(property, value));
        }
    }

    /// Changes aimed at one target, in order.
    #[cfg(test)]
    pub(crate) fn for_target(&self, target: LayoutTarget) -> impl Iterator<Item = &StyleOp> + '_ {
        self.entries
            .iter()
            .filter(move |(t, _)| *t == target)
            .map(|(_, op)| op)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How images sit inside the main container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Fill the container, cropping overflow
    Cover,
    /// Fit entirely inside the container
    Contain,
}

/// Style plan that switches every gallery image to `mode`.
pub fn fit_plan(mode: FitMode) -> StylePlan {
    let mut plan = StylePlan::default();
    match mode {
        FitMode::Cover => plan.set_all(
            LayoutTarget::Images,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("object-fit", "cover"),
                ("object-position", "center"),
            ],
        ),
        FitMode::Contain => plan.set_all(
            LayoutTarget::Images,
            &[
                ("width", "auto"),
                ("height", "auto"),
                ("max-width", "100%"),
                ("max-height", "100%"),
                ("object-fit", "contain"),
                ("object-position", "center"),
            ],
        ),
    }
    plan
}

/// Inline styles for one main image while only the active image is displayed.
///
/// Inactive images are taken out of the flow entirely so the main container
/// sizes itself to the active one.
pub fn single_image_styles(active: bool) -> Vec<StyleOp> {
    let declarations: &[(&'static str, &str)] = if active {
        &[
            ("display", "block"),
            ("visibility", "visible"),
            ("position", "relative"),
            ("width", "100%"),
            ("height", "auto"),
            ("top", "auto"),
            ("left", "auto"),
        ]
    } else {
        &[
            ("display", "none"),
            ("visibility", "hidden"),
            ("position", "absolute"),
            ("top", "-9999px"),
            ("left", "-9999px"),
        ]
    };
    declarations
        .iter()
        .map(|&(property, value)| StyleOp::important(property, value))
        .collect()
}

/// Style plan letting the main container follow the single visible image.
pub fn single_image_plan() -> StylePlan {
    let mut plan = StylePlan::default();
    plan.set_all(
        LayoutTarget::Main,
        &[
            ("height", "auto"),
            ("min-height", "0"),
            ("max-height", "none"),
            ("position", "relative"),
        ],
    );
    plan.set_all(
        LayoutTarget::Images,
        &[
            ("width", "100%"),
            ("height", "auto"),
            ("display", "block"),
            ("object-fit", "contain"),
        ],
    );
    plan
}

/// Style plan that stretches the main column to its expected width.
pub fn whitespace_fix_plan(measurement: &LayoutMeasurement, config: &LayoutConfig) -> StylePlan {
    let thumbnails = measurement
        .thumbnails_width
        .unwrap_or(config.thumbnail_column_width);
    let main_width = format!("{}px", measurement.expected_main_width(config).max(0.0));
    let columns = format!("{}px 1fr", thumbnails);
    let gap = format!("{}px", config.column_gap);

    let mut plan = StylePlan::default();
    plan.set_all(
        LayoutTarget::Gallery,
        &[
            ("display", "grid"),
            ("grid-template-columns", columns.as_str()),
            ("gap", gap.as_str()),
            ("max-width", "none"),
            ("width", "100%"),
        ],
    );
    plan.set_all(
        LayoutTarget::Main,
        &[
            ("max-width", "none"),
            ("width", main_width.as_str()),
            ("min-width", main_width.as_str()),
            ("padding", "0"),
            ("margin", "0"),
            ("flex-basis", main_width.as_str()),
            ("flex-grow", "0"),
            ("flex-shrink", "0"),
        ],
    );
    plan.set_all(
        LayoutTarget::MainInner,
        &[
            ("max-width", "none"),
            ("width", "100%"),
            ("min-width", "0"),
            ("height", MAIN_INNER_HEIGHT),
            ("max-height", MAIN_INNER_HEIGHT),
        ],
    );
    plan.set_all(
        LayoutTarget::MainImages,
        &[("max-width", "none"), ("width", "100%")],
    );
    for (target, op) in fit_plan(FitMode::Cover).entries {
        plan.push(target, op);
    }
    plan.push(LayoutTarget::Images, StyleOp::important("max-width", "none"));
    plan.push(
        LayoutTarget::MediaWrapper,
        StyleOp::Remove {
            property: "max-width",
        },
    );
    plan
}

/// Host side of the inspector: measures widths and applies inline styles.
pub trait LayoutHost {
    /// Measure the current layout. Fails when the main container or media
    /// wrapper is not rendered.
    fn measure(&self) -> Result<LayoutMeasurement, GalleryError>;

    /// Apply one style change. Returns false when the target is not rendered.
    fn apply(&mut self, target: LayoutTarget, op: &StyleOp) -> bool;
}

/// Apply every entry of a plan; returns how many landed on a rendered target.
pub fn apply_plan(host: &mut impl LayoutHost, plan: &StylePlan) -> usize {
    plan.entries
        .iter()
        .filter(|(target, op)| host.apply(*target, op))
        .count()
}

/// Before/after comparison of one fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReport {
    pub before: LayoutMeasurement,
    pub after: LayoutMeasurement,
    pub before_percent: Option<u32>,
    pub after_percent: Option<u32>,
    /// Whether the layout reached the optimal threshold after the fix
    pub success: bool,
}

impl LayoutReport {
    pub fn compare(
        before: LayoutMeasurement,
        after: LayoutMeasurement,
        config: &LayoutConfig,
    ) -> Self {
        Self {
            before,
            after,
            before_percent: before.utilization_percent(config),
            after_percent: after.utilization_percent(config),
            success: after.is_optimal(config),
        }
    }

    /// Main column width gained by the fix.
    pub fn width_improvement(&self) -> f32 {
        self.after.main_width - self.before.main_width
    }

    /// Utilization points gained by the fix.
    pub fn utilization_improvement(&self) -> Option<i64> {
        Some(i64::from(self.after_percent?) - i64::from(self.before_percent?))
    }
}

/// Checks and fixes main image whitespace on a host.
#[derive(Debug, Clone, Default)]
pub struct LayoutInspector {
    config: LayoutConfig,
}

impl LayoutInspector {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current utilization, logging what was measured.
    pub fn check(&self, host: &impl LayoutHost) -> Result<Option<u32>, GalleryError> {
        let measurement = host.measure()?;
        let percent = measurement.utilization_percent(&self.config);
        log::debug!(
            "Main image utilization: {:?}% ({}px / {}px)",
            percent,
            measurement.main_width,
            measurement.expected_main_width(&self.config)
        );
        Ok(percent)
    }

    /// Apply the whitespace fix when utilization is below the fix threshold.
    ///
    /// Returns `Ok(None)` when no fix was needed.
    pub fn fix_if_needed(
        &self,
        host: &mut impl LayoutHost,
    ) -> Result<Option<LayoutReport>, GalleryError> {
        let before = host.measure()?;
        if !before.needs_fix(&self.config) {
            log::debug!(
                "Whitespace fix not needed ({:?}%)",
                before.utilization_percent(&self.config)
            );
            return Ok(None);
        }

        let plan = whitespace_fix_plan(&before, &self.config);
        let applied = apply_plan(host, &plan);
        let after = host.measure()?;
        let report = LayoutReport::compare(before, after, &self.config);

        if report.success {
            log::info!(
                "Whitespace fix applied ({} styles): {:?}% -> {:?}% (+{}px, {:?} points)",
                applied,
                report.before_percent,
                report.after_percent,
                report.width_improvement(),
                report.utilization_improvement()
            );
        } else {
            log::warn!(
                "Whitespace fix only partial ({} styles): {:?}% -> {:?}%",
                applied,
                report.before_percent,
                report.after_percent
            );
        }
        Ok(Some(report))
    }
}
