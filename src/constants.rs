//! Global constants for the gallery navigator

/// Minimum horizontal displacement (CSS pixels) for a pointer gesture to count as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Width of the thumbnail column assumed when the host cannot measure it
pub const DEFAULT_THUMBNAIL_COLUMN_WIDTH: f32 = 75.0;

/// Gap between the thumbnail column and the main image (1rem)
pub const DEFAULT_COLUMN_GAP: f32 = 16.0;

/// Below this utilization (percent) the main image column gets the whitespace fix
pub const DEFAULT_FIX_THRESHOLD_PERCENT: u32 = 90;

/// At or above this utilization (percent) the layout counts as optimal
pub const DEFAULT_OPTIMAL_THRESHOLD_PERCENT: u32 = 95;

/// Fixed height of the main image inner container applied by the whitespace fix
pub const MAIN_INNER_HEIGHT: &str = "900px";

/// CSS class toggled on the active thumbnail and main image
pub const ACTIVE_CLASS: &str = "active";

/// DOM custom event carrying `{ selectedOptions }` or `{ variant }`
pub const VARIANT_CHANGED_EVENT: &str = "variant:changed";

/// DOM custom event dispatched after every index transition
pub const IMAGE_CHANGED_EVENT: &str = "gallery:image-changed";

/// DOM custom event asking the host to close its zoom overlay
pub const CLOSE_ZOOM_EVENT: &str = "gallery:close-zoom";

/// Quiet period after the last `resize` before the whitespace check reruns (ms)
pub const RESIZE_DEBOUNCE_MS: i32 = 500;
