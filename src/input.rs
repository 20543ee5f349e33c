//! Translates raw host input into gallery commands.
//!
//! The adapter keeps only gesture and overlay state; the active index lives in
//! the navigator.

use thumbnav_ui::{Event, Key, MouseButton, Point};

use crate::config::{InputConfig, SwipeConvention};
use crate::keybindings::{NavAction, NavKeyBindings};
use crate::navigator::GalleryCommand;

/// What the host should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Navigate(GalleryCommand),
    /// Close the zoom overlay; the index is untouched
    CloseZoom,
}

/// Convert a numeric host index (a JS number) to a gallery index.
///
/// Negative, fractional and non-finite values are rejected rather than
/// truncated.
pub fn host_index(value: f64) -> Option<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > usize::MAX as f64 {
        return None;
    }
    Some(value as usize)
}

/// Horizontal direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Negative horizontal displacement
    Leftward,
    /// Positive horizontal displacement
    Rightward,
}

/// Tracks one pointer or touch gesture from press to release.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<Point>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            origin: None,
            threshold,
        }
    }

    pub fn begin(&mut self, position: Point) {
        self.origin = Some(position);
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Finish the gesture. Only displacements strictly beyond the threshold count.
    pub fn end(&mut self, position: Point) -> Option<Swipe> {
        let origin = self.origin.take()?;
        let (dx, _) = position.delta_from(origin);
        if dx.abs() <= self.threshold {
            return None;
        }
        Some(if dx < 0.0 {
            Swipe::Leftward
        } else {
            Swipe::Rightward
        })
    }
}

/// Maps keyboard, pointer, touch and click input onto navigator commands.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    bindings: NavKeyBindings,
    convention: SwipeConvention,
    swipe: SwipeTracker,
    zoom_open: bool,
    focused_thumbnail: Option<usize>,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputAdapter {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            bindings: config.keybindings.clone(),
            convention: config.swipe_convention,
            swipe: SwipeTracker::new(config.swipe_threshold),
            zoom_open: false,
            focused_thumbnail: None,
        }
    }

    /// Translate one host event. Returns `None` for events with no gallery meaning.
    pub fn translate(&mut self, event: &Event) -> Option<InputAction> {
        match *event {
            Event::KeyPressed { key, modifiers } => {
                // Leave browser shortcuts alone; shift is harmless
                if modifiers.ctrl || modifiers.alt || modifiers.meta {
                    return None;
                }
                self.key_pressed(key)
            }
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            }
            | Event::TouchStarted { position } => {
                self.swipe.begin(position);
                None
            }
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
            }
            | Event::TouchEnded { position } => {
                let swipe = self.swipe.end(position)?;
                Some(InputAction::Navigate(self.command_for_swipe(swipe)))
            }
            Event::TouchCancelled => {
                self.swipe.cancel();
                None
            }
            Event::MousePressed { .. } | Event::MouseReleased { .. } => None,
        }
    }

    /// A thumbnail was clicked. `raw_index` is the host's ordinal, which may be
    /// garbage (e.g. a missing `data-index` parsed as -1).
    pub fn thumbnail_clicked(&mut self, raw_index: i64) -> Option<InputAction> {
        match usize::try_from(raw_index) {
            Ok(index) => {
                self.focused_thumbnail = Some(index);
                Some(InputAction::Navigate(GalleryCommand::SwitchTo(index)))
            }
            Err(_) => {
                log::debug!("Ignoring click on thumbnail with index {}", raw_index);
                None
            }
        }
    }

    /// Record which thumbnail holds keyboard focus.
    pub fn focus_thumbnail(&mut self, index: Option<usize>) {
        self.focused_thumbnail = index;
    }

    pub fn focused_thumbnail(&self) -> Option<usize> {
        self.focused_thumbnail
    }

    pub fn open_zoom(&mut self) {
        self.zoom_open = true;
    }

    pub fn close_zoom(&mut self) {
        self.zoom_open = false;
    }

    pub fn is_zoom_open(&self) -> bool {
        self.zoom_open
    }

    fn key_pressed(&mut self, key: Key) -> Option<InputAction> {
        let action = self.bindings.action_for_key(key)?;
        let command = match action {
            NavAction::CloseZoom => {
                if !self.zoom_open {
                    return None;
                }
                self.zoom_open = false;
                return Some(InputAction::CloseZoom);
            }
            NavAction::Activate => GalleryCommand::SwitchTo(self.focused_thumbnail?),
            NavAction::Next => GalleryCommand::Next,
            NavAction::Prev => GalleryCommand::Prev,
            NavAction::First => GalleryCommand::First,
            NavAction::Last => GalleryCommand::Last,
        };
        Some(InputAction::Navigate(command))
    }

    fn command_for_swipe(&self, swipe: Swipe) -> GalleryCommand {
        match (self.convention, swipe) {
            (SwipeConvention::Natural, Swipe::Leftward)
            | (SwipeConvention::Inverted, Swipe::Rightward) => GalleryCommand::Next,
            (SwipeConvention::Natural, Swipe::Rightward)
            | (SwipeConvention::Inverted, Swipe::Leftward) => GalleryCommand::Prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thumbnav_ui::Modifiers;

    fn swipe(adapter: &mut InputAdapter, from_x: f32, to_x: f32) -> Option<InputAction> {
        adapter.translate(&Event::TouchStarted {
            position: Point::new(from_x, 100.0),
        });
        adapter.translate(&Event::TouchEnded {
            position: Point::new(to_x, 110.0),
        })
    }

    #[test]
    fn test_arrow_and_home_end_keys() {
        let mut adapter = InputAdapter::default();

        assert_eq!(
            adapter.translate(&Event::key(Key::Right)),
            Some(InputAction::Navigate(GalleryCommand::Next))
        );
        assert_eq!(
            adapter.translate(&Event::key(Key::Up)),
            Some(InputAction::Navigate(GalleryCommand::Prev))
        );
        assert_eq!(
            adapter.translate(&Event::key(Key::Home)),
            Some(InputAction::Navigate(GalleryCommand::First))
        );
        assert_eq!(
            adapter.translate(&Event::key(Key::End)),
            Some(InputAction::Navigate(GalleryCommand::Last))
        );
        assert_eq!(adapter.translate(&Event::key(Key::Char('q'))), None);
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let mut adapter = InputAdapter::default();
        let event = Event::KeyPressed {
            key: Key::Right,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        };
        assert_eq!(adapter.translate(&event), None);
    }

    #[test]
    fn test_natural_swipe() {
        let mut adapter = InputAdapter::default();

        assert_eq!(
            swipe(&mut adapter, 300.0, 200.0),
            Some(InputAction::Navigate(GalleryCommand::Next))
        );
        assert_eq!(
            swipe(&mut adapter, 200.0, 300.0),
            Some(InputAction::Navigate(GalleryCommand::Prev))
        );
    }

    #[test]
    fn test_inverted_swipe() {
        let config = InputConfig {
            swipe_convention: SwipeConvention::Inverted,
            ..Default::default()
        };
        let mut adapter = InputAdapter::new(&config);

        assert_eq!(
            swipe(&mut adapter, 300.0, 200.0),
            Some(InputAction::Navigate(GalleryCommand::Prev))
        );
    }

    #[test]
    fn test_swipe_threshold_is_exclusive() {
        let mut adapter = InputAdapter::default();

        assert_eq!(swipe(&mut adapter, 100.0, 50.0), None);
        assert_eq!(swipe(&mut adapter, 100.0, 140.0), None);
        assert!(swipe(&mut adapter, 100.0, 49.0).is_some());
    }

    #[test]
    fn test_release_without_press_and_cancel() {
        let mut adapter = InputAdapter::default();
        let release = Event::MouseReleased {
            button: MouseButton::Left,
            position: Point::new(0.0, 0.0),
        };
        assert_eq!(adapter.translate(&release), None);

        adapter.translate(&Event::MousePressed {
            button: MouseButton::Left,
            position: Point::new(400.0, 0.0),
        });
        adapter.translate(&Event::TouchCancelled);
        assert_eq!(adapter.translate(&release), None);
    }

    #[test]
    fn test_right_button_does_not_swipe() {
        let mut adapter = InputAdapter::default();
        adapter.translate(&Event::MousePressed {
            button: MouseButton::Right,
            position: Point::new(400.0, 0.0),
        });
        let released = adapter.translate(&Event::MouseReleased {
            button: MouseButton::Right,
            position: Point::new(0.0, 0.0),
        });
        assert_eq!(released, None);
    }

    #[test]
    fn test_escape_only_when_zoom_open() {
        let mut adapter = InputAdapter::default();
        assert_eq!(adapter.translate(&Event::key(Key::Escape)), None);

        adapter.open_zoom();
        assert_eq!(
            adapter.translate(&Event::key(Key::Escape)),
            Some(InputAction::CloseZoom)
        );
        assert!(!adapter.is_zoom_open());
        assert_eq!(adapter.translate(&Event::key(Key::Escape)), None);
    }

    #[test]
    fn test_host_index_rejects_non_integers() {
        assert_eq!(host_index(0.0), Some(0));
        assert_eq!(host_index(3.0), Some(3));
        assert_eq!(host_index(1.7), None);
        assert_eq!(host_index(-1.0), None);
        assert_eq!(host_index(f64::NAN), None);
        assert_eq!(host_index(f64::INFINITY), None);
    }

    #[test]
    fn test_thumbnail_click_and_activate() {
        let mut adapter = InputAdapter::default();

        assert_eq!(adapter.thumbnail_clicked(-1), None);
        assert_eq!(
            adapter.thumbnail_clicked(2),
            Some(InputAction::Navigate(GalleryCommand::SwitchTo(2)))
        );

        // Enter without focus does nothing
        adapter.focus_thumbnail(None);
        assert_eq!(adapter.translate(&Event::key(Key::Enter)), None);

        adapter.focus_thumbnail(Some(3));
        assert_eq!(
            adapter.translate(&Event::key(Key::Space)),
            Some(InputAction::Navigate(GalleryCommand::SwitchTo(3)))
        );
    }
}
