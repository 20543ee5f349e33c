//! Browser binding: mounts a navigator on server-rendered gallery markup.
//!
//! Every DOM listener shares one `Mounted` through `Rc<RefCell<_>>`.
//! Outgoing DOM events are queued while the gallery is borrowed and dispatched
//! only after the borrow is released, so page scripts reacting to
//! `gallery:image-changed` or `gallery:close-zoom` may call back into the handle.
//!
//! Thumbnails and main images are held in display order (sorted by
//! `data-index`), the same index space the navigator uses.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thumbnav_ui::{Bounds, Event as InputEvent, Key, Modifiers, MouseButton, Point};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, EventTarget, HtmlElement, KeyboardEvent,
    MouseEvent, ScrollIntoViewOptions, ScrollLogicalPosition, TouchEvent,
};

use crate::config::{GalleryConfig, LayoutConfig};
use crate::constants::{
    ACTIVE_CLASS, CLOSE_ZOOM_EVENT, IMAGE_CHANGED_EVENT, RESIZE_DEBOUNCE_MS, VARIANT_CHANGED_EVENT,
};
use crate::error::GalleryError;
use crate::input::{InputAction, InputAdapter, host_index};
use crate::layout::{
    FitMode, LayoutHost, LayoutInspector, LayoutMeasurement, LayoutTarget, StyleOp, StylePlan,
    apply_plan, fit_plan, single_image_plan, single_image_styles,
};
use crate::model::{GalleryImage, HostVariantEvent, Variant};
use crate::navigator::{GalleryNavigator, ImageChanged};
use crate::state::{apply_order, display_order};
use crate::surface::GallerySurface;

const THUMBNAIL_SELECTOR: &str = ".product-gallery__thumbnail";
const MAIN_IMAGE_SELECTOR: &str = ".product-gallery__main-image";
const THUMBNAIL_STRIP_SELECTOR: &str = ".product-gallery__thumbnails";
const OPTION_SELECTOR: &str = "[data-variant-option]";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
    if let Some(level) = config.log_level.to_level_filter().to_level() {
        // Fails only if a logger is already installed
        let _ = console_log::init_with_level(level);
    }
    log::info!("thumbnav {} loaded", env!("CARGO_PKG_VERSION"));
}

fn document() -> Result<Document, GalleryError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| GalleryError::missing_host_element("document"))
}

fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn bounds_of(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds::new(
        rect.x() as f32,
        rect.y() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn apply_style(element: &HtmlElement, op: &StyleOp) -> Result<(), JsValue> {
    let style = element.style();
    match op {
        StyleOp::Set {
            property,
            value,
            important,
        } => style.set_property_with_priority(
            property,
            value,
            if *important { "important" } else { "" },
        ),
        StyleOp::Remove { property } => style.remove_property(property).map(|_| ()),
    }
}

/// Describe one thumbnail/main image pair from its markup.
fn read_image(document_index: usize, thumb: &Element, main: Option<&Element>) -> GalleryImage {
    let media_id = thumb.get_attribute("data-media-id").unwrap_or_default();
    let position = thumb
        .get_attribute("data-index")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(document_index);
    let mut image = GalleryImage::new(media_id.as_str(), position);
    image.src = main
        .and_then(|main| main.query_selector("img").ok().flatten())
        .and_then(|img| img.get_attribute("src"));
    image.initially_active = thumb.class_list().contains(ACTIVE_CLASS);
    image
}

/// Gallery surface over the thumbnail and main image elements, in display order.
struct DomSurface {
    thumbnails: Vec<Element>,
    main_images: Vec<Option<Element>>,
    strip: Option<Element>,
    /// Hide inactive main images with inline styles instead of the stylesheet
    single_image: bool,
}

impl DomSurface {
    /// Collect the pairs under `root` and the images they describe, both
    /// sorted by `data-index`.
    fn from_root(root: &Element) -> (Self, Vec<GalleryImage>) {
        let thumbnails = query_all(root, THUMBNAIL_SELECTOR);
        let mut mains = query_all(root, MAIN_IMAGE_SELECTOR).into_iter();
        let main_images: Vec<Option<Element>> = thumbnails.iter().map(|_| mains.next()).collect();
        let extra = mains.count();
        if extra > 0 {
            log::warn!("{} main images have no thumbnail and are ignored", extra);
        }

        let images: Vec<GalleryImage> = thumbnails
            .iter()
            .zip(&main_images)
            .enumerate()
            .map(|(i, (thumb, main))| read_image(i, thumb, main.as_ref()))
            .collect();

        let order = display_order(&images);
        let surface = Self {
            thumbnails: apply_order(thumbnails, &order),
            main_images: apply_order(main_images, &order),
            strip: root.query_selector(THUMBNAIL_STRIP_SELECTOR).ok().flatten(),
            single_image: false,
        };
        (surface, apply_order(images, &order))
    }

    fn main_image(&self, index: usize) -> Option<&Element> {
        self.main_images.get(index).and_then(Option::as_ref)
    }
}

impl GallerySurface for DomSurface {
    fn set_active(&mut self, index: usize, active: bool) {
        if let Some(thumb) = self.thumbnails.get(index) {
            let _ = thumb.class_list().toggle_with_force(ACTIVE_CLASS, active);
            let _ = thumb.set_attribute("aria-selected", if active { "true" } else { "false" });
            let _ = thumb.set_attribute("tabindex", if active { "0" } else { "-1" });
        }
        if let Some(main) = self.main_image(index) {
            let _ = main.class_list().toggle_with_force(ACTIVE_CLASS, active);
            let Some(main) = main.dyn_ref::<HtmlElement>() else {
                return;
            };
            if self.single_image {
                for op in single_image_styles(active) {
                    if let Err(e) = apply_style(main, &op) {
                        log::warn!("Failed to apply {:?} to main image {}: {:?}", op, index, e);
                    }
                }
            } else {
                // Visibility is left to the stylesheet
                let _ = main.style().remove_property("display");
            }
        }
    }

    fn is_active(&self, index: usize) -> bool {
        let thumb_active = self
            .thumbnails
            .get(index)
            .is_some_and(|thumb| thumb.class_list().contains(ACTIVE_CLASS));
        let main_active = self
            .main_image(index)
            .is_none_or(|main| main.class_list().contains(ACTIVE_CLASS));
        thumb_active && main_active
    }

    fn thumbnail_bounds(&self, index: usize) -> Option<Bounds> {
        self.thumbnails.get(index).map(bounds_of)
    }

    fn scroll_viewport(&self) -> Option<Bounds> {
        self.strip.as_ref().map(bounds_of)
    }

    fn scroll_into_view(&mut self, index: usize) {
        if let Some(thumb) = self.thumbnails.get(index) {
            let options = ScrollIntoViewOptions::new();
            options.set_block(ScrollLogicalPosition::Nearest);
            options.set_inline(ScrollLogicalPosition::Nearest);
            thumb.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

/// Layout host over the product page, queried fresh on every call.
struct DomLayout {
    document: Document,
}

impl DomLayout {
    fn selector(target: LayoutTarget) -> &'static str {
        match target {
            LayoutTarget::Gallery => ".product-gallery",
            LayoutTarget::Main => ".product-gallery__main",
            LayoutTarget::MainInner => ".product-gallery__main-inner",
            LayoutTarget::MainImages => MAIN_IMAGE_SELECTOR,
            LayoutTarget::Images => ".product-gallery__image",
            LayoutTarget::MediaWrapper => ".product__media-wrapper",
        }
    }

    fn elements(&self, target: LayoutTarget) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(Self::selector(target)) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn width(&self, selector: &str) -> Option<f32> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(|element| element.offset_width() as f32)
    }
}

impl LayoutHost for DomLayout {
    fn measure(&self) -> Result<LayoutMeasurement, GalleryError> {
        let media_selector = Self::selector(LayoutTarget::MediaWrapper);
        let main_selector = Self::selector(LayoutTarget::Main);
        Ok(LayoutMeasurement {
            media_width: self
                .width(media_selector)
                .ok_or_else(|| GalleryError::missing_host_element(media_selector))?,
            thumbnails_width: self.width(THUMBNAIL_STRIP_SELECTOR),
            main_width: self
                .width(main_selector)
                .ok_or_else(|| GalleryError::missing_host_element(main_selector))?,
        })
    }

    fn apply(&mut self, target: LayoutTarget, op: &StyleOp) -> bool {
        let elements = self.elements(target);
        for element in &elements {
            if let Err(e) = apply_style(element, op) {
                log::warn!("Failed to apply {:?} to {:?}: {:?}", op, target, e);
            }
        }
        !elements.is_empty()
    }
}

fn dom_layout() -> Result<DomLayout, GalleryError> {
    Ok(DomLayout {
        document: document()?,
    })
}

/// Run the whitespace check, fixing the layout when it falls below threshold.
///
/// Returns the utilization percentage after the check, if measurable.
fn fix_layout_now(config: &LayoutConfig) -> Result<Option<u32>, GalleryError> {
    let inspector = LayoutInspector::new(config.clone());
    let mut host = dom_layout()?;
    match inspector.fix_if_needed(&mut host)? {
        Some(report) => Ok(report.after_percent),
        None => inspector.check(&host),
    }
}

fn apply_dom_plan(plan: &StylePlan) -> Result<usize, JsValue> {
    let mut host = dom_layout().map_err(to_js_error)?;
    Ok(apply_plan(&mut host, plan))
}

/// DOM events produced while the gallery is borrowed.
enum Outgoing {
    ImageChanged(ImageChanged),
    CloseZoom,
}

/// State shared by one mounted gallery's listeners.
struct Mounted {
    navigator: GalleryNavigator<DomSurface>,
    adapter: InputAdapter,
    root: Element,
    options: Vec<Element>,
    config: GalleryConfig,
    pending: Rc<RefCell<Vec<Outgoing>>>,
}

impl Mounted {
    fn run(&mut self, action: InputAction) {
        match action {
            InputAction::Navigate(command) => {
                self.navigator.execute(command);
            }
            InputAction::CloseZoom => {
                self.pending.borrow_mut().push(Outgoing::CloseZoom);
            }
        }
    }

    /// Adopt a new configuration without losing the zoom overlay state.
    fn reconfigure(&mut self, config: GalleryConfig) {
        let zoom_open = self.adapter.is_zoom_open();
        self.adapter = InputAdapter::new(&config.input);
        if zoom_open {
            self.adapter.open_zoom();
        }
        log::set_max_level(config.log_level.to_level_filter());
        self.config = config;
    }

    /// Hide option swatches no available variant offers.
    fn update_option_visibility(&self) {
        let availability = self.navigator.option_availability();
        log::debug!(
            "{} option values available across {} swatches",
            availability.len(),
            self.options.len()
        );
        for option in &self.options {
            let value = option.get_attribute("data-variant-value").unwrap_or_default();
            let available = availability.is_available(&value);
            if let Some(element) = option.dyn_ref::<HtmlElement>() {
                let style = element.style();
                let _ = if available {
                    style.remove_property("display").map(|_| ())
                } else {
                    style.set_property("display", "none")
                };
            }
            let _ = if available {
                option.remove_attribute("data-unavailable")
            } else {
                option.set_attribute("data-unavailable", "true")
            };
        }
    }

    fn handle_variant_event(&mut self, detail: &JsValue) {
        let change = js_sys::JSON::stringify(detail)
            .map(String::from)
            .map_err(|_| GalleryError::invalid_payload("detail is not serializable"))
            .and_then(|json| HostVariantEvent::from_json(&json))
            .and_then(HostVariantEvent::into_change);
        match change {
            Ok(change) => {
                let outcome = self.navigator.apply_change(&change);
                log::debug!("{} -> {:?}", VARIANT_CHANGED_EVENT, outcome);
                self.update_option_visibility();
            }
            Err(e) => log::warn!("Ignoring {}: {}", VARIANT_CHANGED_EVENT, e),
        }
    }
}

type Shared = Rc<RefCell<Mounted>>;

/// Run `f` against the gallery, then dispatch any events it queued.
///
/// Returns `None` when called re-entrantly from inside another update.
fn with_gallery<R>(shared: &Shared, f: impl FnOnce(&mut Mounted) -> R) -> Option<R> {
    let (result, events, root) = {
        let Ok(mut mounted) = shared.try_borrow_mut() else {
            log::warn!("Gallery busy, dropping re-entrant call");
            return None;
        };
        let result = f(&mut mounted);
        let events: Vec<Outgoing> = mounted.pending.borrow_mut().drain(..).collect();
        (result, events, mounted.root.clone())
    };
    for event in &events {
        match event {
            Outgoing::ImageChanged(changed) => match serde_json::to_string(changed)
                .map_err(to_js_error)
                .and_then(|json| js_sys::JSON::parse(&json))
            {
                Ok(detail) => dispatch(&root, IMAGE_CHANGED_EVENT, &detail),
                Err(e) => log::warn!("Failed to encode {}: {:?}", IMAGE_CHANGED_EVENT, e),
            },
            Outgoing::CloseZoom => dispatch(&root, CLOSE_ZOOM_EVENT, &JsValue::NULL),
        }
    }
    Some(result)
}

/// Read from the gallery without mutating it; fails instead of panicking
/// while an update is in progress.
fn read_gallery<R>(shared: &Shared, f: impl FnOnce(&Mounted) -> R) -> Result<R, JsValue> {
    let mounted = shared
        .try_borrow()
        .map_err(|_| JsValue::from_str("gallery is busy"))?;
    Ok(f(&mounted))
}

fn dispatch(target: &Element, event_type: &str, detail: &JsValue) {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(detail);
    match CustomEvent::new_with_event_init_dict(event_type, &init) {
        Ok(event) => {
            let _ = target.dispatch_event(&event);
        }
        Err(e) => log::warn!("Failed to create {}: {:?}", event_type, e),
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;

fn listen(
    target: &EventTarget,
    event_type: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn modifiers_of(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        meta: event.meta_key(),
    }
}

fn first_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.changed_touches().get(0)?;
    Some(Point::new(touch.client_x() as f32, touch.client_y() as f32))
}

/// Read `window.productVariants`, if the page defines it.
fn product_variants() -> Vec<Variant> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    let value = match js_sys::Reflect::get(&window, &JsValue::from_str("productVariants")) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return Vec::new(),
    };
    let parsed = js_sys::JSON::stringify(&value)
        .map(String::from)
        .and_then(|json| serde_json::from_str::<Vec<Variant>>(&json).map_err(to_js_error));
    match parsed {
        Ok(variants) => variants,
        Err(e) => {
            log::warn!("Ignoring malformed productVariants: {:?}", e);
            Vec::new()
        }
    }
}

/// A mounted gallery. Listeners stay attached while the handle lives.
#[wasm_bindgen]
pub struct GalleryHandle {
    shared: Shared,
    _listeners: Vec<Listener>,
    _layout_timer: Closure<dyn FnMut()>,
}

/// Re-run the whitespace check once resizing has settled.
fn resize_listener(
    window: &web_sys::Window,
    shared: &Shared,
) -> Result<(Listener, Closure<dyn FnMut()>), JsValue> {
    let pending_timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let timer = {
        let shared = Rc::clone(shared);
        let pending_timer = Rc::clone(&pending_timer);
        Closure::<dyn FnMut()>::new(move || {
            pending_timer.set(None);
            let Ok(layout) = read_gallery(&shared, |m| m.config.layout.clone()) else {
                return;
            };
            if let Err(e) = fix_layout_now(&layout) {
                log::debug!("Layout check after resize skipped: {}", e);
            }
        })
    };
    let callback: js_sys::Function = timer.as_ref().unchecked_ref::<js_sys::Function>().clone();

    let target = window.clone();
    let listener = listen(window, "resize", move |_| {
        if let Some(handle) = pending_timer.take() {
            target.clear_timeout_with_handle(handle);
        }
        match target
            .set_timeout_with_callback_and_timeout_and_arguments_0(&callback, RESIZE_DEBOUNCE_MS)
        {
            Ok(handle) => pending_timer.set(Some(handle)),
            Err(e) => log::warn!("Failed to schedule layout check: {:?}", e),
        }
    })?;
    Ok((listener, timer))
}

/// Mount a navigator on the gallery under `root_selector`.
#[wasm_bindgen]
pub fn mount(root_selector: &str) -> Result<GalleryHandle, JsValue> {
    let document = document().map_err(to_js_error)?;
    let root = document
        .query_selector(root_selector)?
        .ok_or_else(|| to_js_error(GalleryError::missing_host_element(root_selector)))?;

    let window = web_sys::window()
        .ok_or_else(|| to_js_error(GalleryError::missing_host_element("window")))?;
    let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
    let (surface, images) = DomSurface::from_root(&root);
    let thumbnails = surface.thumbnails.clone();

    let mut navigator = GalleryNavigator::new(images, product_variants(), surface);
    let pending = Rc::new(RefCell::new(Vec::new()));
    {
        let pending = Rc::clone(&pending);
        navigator.subscribe(move |event| {
            pending
                .borrow_mut()
                .push(Outgoing::ImageChanged(event.clone()))
        });
    }

    match fix_layout_now(&config.layout) {
        Ok(percent) => log::debug!("Initial layout utilization: {:?}%", percent),
        Err(e) => log::debug!("Initial layout check skipped: {}", e),
    }

    let mounted = Mounted {
        navigator,
        adapter: InputAdapter::new(&config.input),
        root: root.clone(),
        options: document
            .document_element()
            .map(|html| query_all(&html, OPTION_SELECTOR))
            .unwrap_or_default(),
        config,
        pending,
    };
    mounted.update_option_visibility();
    let shared: Shared = Rc::new(RefCell::new(mounted));

    let mut listeners = Vec::new();
    // Thumbnails are in display order, so `i` is the navigator's index
    for (i, thumb) in thumbnails.iter().enumerate() {
        let gallery = Rc::clone(&shared);
        listeners.push(listen(thumb, "click", move |_| {
            with_gallery(&gallery, |m| {
                if let Some(action) = m.adapter.thumbnail_clicked(i as i64) {
                    m.run(action);
                }
            });
        })?);

        let gallery = Rc::clone(&shared);
        listeners.push(listen(thumb, "focus", move |_| {
            with_gallery(&gallery, |m| m.adapter.focus_thumbnail(Some(i)));
        })?);

        let gallery = Rc::clone(&shared);
        listeners.push(listen(thumb, "blur", move |_| {
            with_gallery(&gallery, |m| m.adapter.focus_thumbnail(None));
        })?);
    }

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "keydown", move |event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(key) = Key::from_dom_name(&keyboard.key()) else {
            return;
        };
        let input = InputEvent::KeyPressed {
            key,
            modifiers: modifiers_of(keyboard),
        };
        let handled = with_gallery(&gallery, |m| match m.adapter.translate(&input) {
            Some(action) => {
                m.run(action);
                true
            }
            None => false,
        });
        if handled == Some(true) {
            event.prevent_default();
        }
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "mousedown", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let input = InputEvent::MousePressed {
                button: MouseButton::from_dom(mouse.button()),
                position: Point::new(mouse.client_x() as f32, mouse.client_y() as f32),
            };
            with_gallery(&gallery, |m| m.adapter.translate(&input));
        }
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "mouseup", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let input = InputEvent::MouseReleased {
                button: MouseButton::from_dom(mouse.button()),
                position: Point::new(mouse.client_x() as f32, mouse.client_y() as f32),
            };
            with_gallery(&gallery, |m| {
                if let Some(action) = m.adapter.translate(&input) {
                    m.run(action);
                }
            });
        }
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "touchstart", move |event| {
        if let Some(position) = event.dyn_ref::<TouchEvent>().and_then(first_touch) {
            with_gallery(&gallery, |m| m.adapter.translate(&InputEvent::TouchStarted { position }));
        }
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "touchend", move |event| {
        if let Some(position) = event.dyn_ref::<TouchEvent>().and_then(first_touch) {
            with_gallery(&gallery, |m| {
                if let Some(action) = m.adapter.translate(&InputEvent::TouchEnded { position }) {
                    m.run(action);
                }
            });
        }
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&root, "touchcancel", move |_| {
        with_gallery(&gallery, |m| m.adapter.translate(&InputEvent::TouchCancelled));
    })?);

    let gallery = Rc::clone(&shared);
    listeners.push(listen(&document, VARIANT_CHANGED_EVENT, move |event| {
        if let Some(custom) = event.dyn_ref::<CustomEvent>() {
            let detail = custom.detail();
            with_gallery(&gallery, |m| m.handle_variant_event(&detail));
        }
    })?);

    let (resize, layout_timer) = resize_listener(&window, &shared)?;
    listeners.push(resize);

    log::info!(
        "Mounted gallery on {} with {} listeners",
        root_selector,
        listeners.len()
    );
    Ok(GalleryHandle {
        shared,
        _listeners: listeners,
        _layout_timer: layout_timer,
    })
}

#[wasm_bindgen]
impl GalleryHandle {
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> Result<usize, JsValue> {
        read_gallery(&self.shared, |m| m.navigator.current_index())
    }

    #[wasm_bindgen(js_name = imageCount)]
    pub fn image_count(&self) -> Result<usize, JsValue> {
        read_gallery(&self.shared, |m| m.navigator.image_count())
    }

    /// Switch to a display index. Negative, fractional and out-of-range
    /// values are ignored.
    #[wasm_bindgen(js_name = switchTo)]
    pub fn switch_to(&self, index: f64) {
        let Some(index) = host_index(index) else {
            log::debug!("Ignoring switchTo({})", index);
            return;
        };
        with_gallery(&self.shared, |m| m.navigator.switch_to(index));
    }

    pub fn next(&self) {
        with_gallery(&self.shared, |m| m.navigator.next());
    }

    pub fn prev(&self) {
        with_gallery(&self.shared, |m| m.navigator.prev());
    }

    #[wasm_bindgen(js_name = openZoom)]
    pub fn open_zoom(&self) {
        with_gallery(&self.shared, |m| m.adapter.open_zoom());
    }

    #[wasm_bindgen(js_name = closeZoom)]
    pub fn close_zoom(&self) {
        with_gallery(&self.shared, |m| m.adapter.close_zoom());
    }

    /// Re-apply active state after the page replaced gallery markup styles.
    #[wasm_bindgen(js_name = syncSurface)]
    pub fn sync_surface(&self) {
        with_gallery(&self.shared, |m| m.navigator.sync_surface());
    }

    /// Check the DOM against the navigator; rejects with a description on drift.
    pub fn verify(&self) -> Result<(), JsValue> {
        read_gallery(&self.shared, |m| m.navigator.verify())?.map_err(to_js_error)
    }

    /// Measure main image whitespace and apply the fix when it is needed.
    ///
    /// Returns the utilization percentage after the check, if measurable.
    #[wasm_bindgen(js_name = fixLayout)]
    pub fn fix_layout(&self) -> Result<Option<u32>, JsValue> {
        let layout = read_gallery(&self.shared, |m| m.config.layout.clone())?;
        fix_layout_now(&layout).map_err(to_js_error)
    }

    /// Make every gallery image fill its container, cropping overflow.
    ///
    /// Returns how many style changes reached a rendered element.
    #[wasm_bindgen(js_name = scaleImagesToFill)]
    pub fn scale_images_to_fill(&self) -> Result<usize, JsValue> {
        apply_dom_plan(&fit_plan(FitMode::Cover))
    }

    /// Make every gallery image fit entirely inside its container.
    #[wasm_bindgen(js_name = scaleImagesToContain)]
    pub fn scale_images_to_contain(&self) -> Result<usize, JsValue> {
        apply_dom_plan(&fit_plan(FitMode::Contain))
    }

    /// Display only the active main image and size the container to it.
    #[wasm_bindgen(js_name = showSingleImage)]
    pub fn show_single_image(&self) -> Result<usize, JsValue> {
        with_gallery(&self.shared, |m| {
            m.navigator.surface_mut().single_image = true;
            m.navigator.sync_surface();
        })
        .ok_or_else(|| JsValue::from_str("gallery is busy"))?;
        apply_dom_plan(&single_image_plan())
    }

    /// Validate, persist and adopt a JSON configuration document.
    #[wasm_bindgen(js_name = saveConfig)]
    pub fn save_config(&self, json: &str) -> Result<(), JsValue> {
        let config = GalleryConfig::from_json(json).map_err(to_js_error)?;
        config.save_to_local_storage().map_err(to_js_error)?;
        with_gallery(&self.shared, |m| m.reconfigure(config))
            .ok_or_else(|| JsValue::from_str("gallery is busy"))
    }
}
