//! Scripted gallery sessions for the native replay tool.
//!
//! A scenario lists the host's images and variants plus a sequence of input
//! steps; replaying it drives a navigator over a [`RecordingSurface`] exactly
//! as the browser binding would.

use serde::Deserialize;
use thumbnav_ui::{Bounds, Event, Key, Point};

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::input::{InputAction, InputAdapter};
use crate::model::{GalleryImage, HostVariantEvent, SelectedOptions, Variant};
use crate::navigator::{GalleryNavigator, ImageChanged, VariantOutcome};
use crate::surface::RecordingSurface;

/// Thumbnail strip geometry for the recording surface.
#[derive(Debug, Clone, Deserialize)]
pub struct StripGeometry {
    pub thumbnail_size: f32,
    #[serde(default)]
    pub gap: f32,
    /// Height of the visible part of the strip; no scroll container when absent
    #[serde(default)]
    pub viewport_height: Option<f32>,
}

/// One scripted input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Key press by DOM key name
    Key(Key),
    /// Click on the thumbnail at this display index
    Click(i64),
    /// Touch swipe between two points
    Swipe { from: [f32; 2], to: [f32; 2] },
    /// `variant:changed` with `{ selectedOptions }`
    SelectOptions(SelectedOptions),
    /// Raw `variant:changed` detail
    VariantEvent(serde_json::Value),
    OpenZoom,
    /// Fail the replay if the surface drifted from the navigator
    Verify,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub images: Vec<GalleryImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub strip: Option<StripGeometry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        Ok(serde_json::from_str(json)?)
    }

    fn surface(&self) -> RecordingSurface {
        let mut surface = RecordingSurface::new(self.images.len());
        if let Some(strip) = &self.strip {
            surface = surface.with_thumbnail_strip(strip.thumbnail_size, strip.gap);
            if let Some(height) = strip.viewport_height {
                surface = surface.with_viewport(Bounds::new(0.0, 0.0, strip.thumbnail_size, height));
            }
        }
        surface
    }
}

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub transitions: Vec<ImageChanged>,
    pub final_index: usize,
    /// Pairs the surface presents as active after the last step
    pub final_active: Vec<usize>,
    pub scroll_requests: Vec<usize>,
    /// Variant events that matched nothing
    pub unmatched_variants: usize,
    pub zoom_closed: usize,
}

/// Run every step of `scenario` against a fresh navigator.
pub fn replay(scenario: &Scenario, config: &GalleryConfig) -> Result<ReplaySummary, GalleryError> {
    let mut navigator = GalleryNavigator::new(
        scenario.images.clone(),
        scenario.variants.clone(),
        scenario.surface(),
    );
    let mut adapter = InputAdapter::new(&config.input);
    let mut summary = ReplaySummary::default();

    for (number, step) in scenario.steps.iter().enumerate() {
        log::debug!("Step {}: {:?}", number + 1, step);
        let action = match step {
            Step::Key(key) => adapter.translate(&Event::key(*key)),
            Step::Click(raw) => adapter.thumbnail_clicked(*raw),
            Step::Swipe { from, to } => {
                adapter.translate(&Event::TouchStarted {
                    position: Point::new(from[0], from[1]),
                });
                adapter.translate(&Event::TouchEnded {
                    position: Point::new(to[0], to[1]),
                })
            }
            Step::SelectOptions(selected) => {
                record_outcome(&mut summary, navigator.apply_selected_options(selected));
                None
            }
            Step::VariantEvent(detail) => {
                let change = HostVariantEvent::from_json(&detail.to_string())
                    .and_then(HostVariantEvent::into_change);
                match change {
                    Ok(change) => record_outcome(&mut summary, navigator.apply_change(&change)),
                    Err(e) => log::warn!("Step {}: {}", number + 1, e),
                }
                None
            }
            Step::OpenZoom => {
                adapter.open_zoom();
                None
            }
            Step::Verify => {
                navigator.verify()?;
                None
            }
        };

        match action {
            Some(InputAction::Navigate(command)) => {
                if let Some(event) = navigator.execute(command) {
                    summary.transitions.push(event);
                }
            }
            Some(InputAction::CloseZoom) => summary.zoom_closed += 1,
            None => {}
        }
    }

    summary.final_index = navigator.current_index();
    summary.final_active = navigator.surface().active_indices();
    summary.scroll_requests = navigator.surface().scroll_requests.clone();
    Ok(summary)
}

fn record_outcome(summary: &mut ReplaySummary, outcome: VariantOutcome) {
    match outcome {
        VariantOutcome::Switched(event) => summary.transitions.push(event),
        VariantOutcome::AlreadyShown(_) => {}
        VariantOutcome::NoMatch => summary.unmatched_variants += 1,
    }
}
