use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Date;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, AddEventListenerOptions, Event, HtmlElement, HtmlImageElement, HtmlVideoElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList,
    TouchEvent,
};
use yew::prelude::*;

use crate::scroll::{
    background_style, mobile_darken, preload_window, reveal_progress, section_darken,
    slowed_scroll_top, BgStyle, Breakpoint, DirectionTracker, ScrollDirection, ThrottleGate,
    INDEX_CHANGE_GRACE_MS, MOBILE_BREAKPOINT_PX, MOBILE_SCROLL_SLOWDOWN, SCROLL_THROTTLE_MS,
};
use crate::sections::{site_sections, Background, DisplayMode, Section};

const DEPARTING_LAYER_TRANSITION: &str = "transform 0.75s cubic-bezier(0.22, 1, 0.36, 1)";
const DEFAULT_VIEWPORT_WIDTH: f64 = 1920.0;

fn mobile_media_query() -> Option<MediaQueryList> {
    window()?
        .match_media(&format!("(max-width: {MOBILE_BREAKPOINT_PX}px)"))
        .ok()
        .flatten()
}

fn media_matches_mobile() -> bool {
    mobile_media_query()
        .map(|media| media.matches())
        .unwrap_or(false)
}

fn viewport_width() -> f64 {
    window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH)
}

fn resolved_background_style(is_mobile: bool, mode: DisplayMode, force_center: bool) -> BgStyle {
    background_style(
        mode,
        Breakpoint::classify(viewport_width(), is_mobile),
        force_center,
    )
}

fn overlay_gradient(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Dark => {
            "linear-gradient(0deg, rgba(0,0,0,0.4) 0%, rgba(0,0,0,0.4) 100%)"
        }
        DisplayMode::Light => {
            "linear-gradient(0deg, rgba(255,255,255,0.4) 0%, rgba(255,255,255,0.4) 100%)"
        }
    }
}

// Autoplay may be rejected by the browser; the frozen first frame is accepted.
fn start_inline_playback(event: Event) {
    let Some(video) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlVideoElement>().ok())
    else {
        return;
    };

    video.set_muted(true);
    video.set_loop(true);
    let _ = video.set_attribute("playsinline", "true");

    if let Ok(promise) = video.play() {
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}

fn section_frame(container: &HtmlElement, section_index: usize) -> Option<(f64, f64)> {
    let sections = container.query_selector_all("section.snap-section").ok()?;
    let node = sections.item(section_index as u32)?;
    let section: HtmlElement = node.dyn_into().ok()?;

    let section_rect = section.get_bounding_client_rect();
    let container_rect = container.get_bounding_client_rect();
    let section_top =
        section_rect.top() - container_rect.top() + f64::from(container.scroll_top());

    Some((section_top, f64::from(section.offset_height())))
}

struct FrameLoop {
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let running = Rc::new(Cell::new(true));
        let frame_id = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        {
            let running = running.clone();
            let frame_id = frame_id.clone();
            let callback_handle = callback.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
                if !running.get() {
                    return;
                }
                on_frame();
                let next = callback_handle.borrow().as_ref().and_then(|cb| {
                    window()?
                        .request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok()
                });
                frame_id.set(next);
            }));
        }

        let first = callback.borrow().as_ref().and_then(|cb| {
            window()?
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok()
        });
        frame_id.set(first);

        Self {
            running,
            frame_id,
            callback,
        }
    }

    fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(win), Some(id)) = (window(), self.frame_id.take()) {
            let _ = win.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

#[hook]
fn use_is_mobile() -> bool {
    let is_mobile = use_state(media_matches_mobile);

    {
        let is_mobile = is_mobile.clone();
        use_effect_with((), move |_| {
            // Re-evaluate once a layout surface exists; the pre-mount default
            // may not match the real viewport.
            is_mobile.set(media_matches_mobile());

            let media = mobile_media_query();
            let listener = media.clone().map(|media| {
                let is_mobile = is_mobile.clone();
                let media_state = media.clone();
                let callback = Closure::<dyn FnMut()>::new(move || {
                    is_mobile.set(media_state.matches());
                });
                let _ = media
                    .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
                callback
            });

            move || {
                if let (Some(media), Some(callback)) = (media, listener) {
                    let _ = media.remove_event_listener_with_callback(
                        "change",
                        callback.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    *is_mobile
}

#[derive(Clone, Copy, PartialEq)]
struct ScrollSignal {
    direction: Option<ScrollDirection>,
    previous_index: usize,
}

#[hook]
fn use_scroll_direction(current_index: usize) -> ScrollSignal {
    let tracker = use_mut_ref(|| DirectionTracker::new(current_index));
    let mut tracker = tracker.borrow_mut();
    tracker.observe(current_index);

    ScrollSignal {
        direction: tracker.direction(),
        previous_index: tracker.previous_index(),
    }
}

#[hook]
fn use_preload_backgrounds(sections: Rc<Vec<Section>>, current_index: usize, is_mobile: bool) {
    use_effect_with(
        (sections, current_index, is_mobile),
        move |(sections, current_index, _is_mobile)| {
            for index in preload_window(*current_index, sections.len()) {
                let Some(section) = sections.get(index) else {
                    continue;
                };
                match section.background {
                    Some(Background::Image(url)) => {
                        if let Ok(image) = HtmlImageElement::new() {
                            image.set_src(url);
                        }
                    }
                    Some(Background::Video(url)) => {
                        let video = window()
                            .and_then(|win| win.document())
                            .and_then(|document| document.create_element("video").ok())
                            .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok());
                        if let Some(video) = video {
                            video.set_preload("auto");
                            video.set_src(url);
                        }
                    }
                    None => {}
                }
            }
            || ()
        },
    );
}

#[hook]
fn use_active_section(sections: Rc<Vec<Section>>) -> usize {
    let active_index = use_state(|| 0usize);

    {
        let active_index = active_index.clone();
        use_effect_with(sections, move |sections| {
            let element_ids: Vec<String> = sections.iter().map(Section::element_id).collect();

            let observer = window()
                .and_then(|win| win.document())
                .and_then(|document| {
                    let callback = {
                        let element_ids = element_ids.clone();
                        let active_index = active_index.clone();
                        Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                            let mut best: Option<IntersectionObserverEntry> = None;
                            for entry in entries.iter() {
                                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>()
                                else {
                                    continue;
                                };
                                let better = best
                                    .as_ref()
                                    .map(|current| {
                                        entry.intersection_ratio() > current.intersection_ratio()
                                    })
                                    .unwrap_or(true);
                                if better {
                                    best = Some(entry);
                                }
                            }

                            let Some(best) = best else {
                                return;
                            };
                            if !best.is_intersecting() {
                                return;
                            }
                            let target_id = best.target().id();
                            if let Some(index) =
                                element_ids.iter().position(|id| *id == target_id)
                            {
                                active_index.set(index);
                            }
                        })
                    };

                    let thresholds = js_sys::Array::new();
                    for value in [0.25, 0.5, 0.75] {
                        thresholds.push(&JsValue::from_f64(value));
                    }
                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&thresholds);

                    let observer = IntersectionObserver::new_with_options(
                        callback.as_ref().unchecked_ref(),
                        &options,
                    )
                    .ok()?;
                    for element_id in &element_ids {
                        if let Some(element) = document.get_element_by_id(element_id) {
                            observer.observe(&element);
                        }
                    }

                    Some((observer, callback))
                });

            move || {
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
            }
        });
    }

    *active_index
}

#[hook]
fn use_mobile_scroll_slowdown(scroll_container: NodeRef, is_mobile: bool, slowdown_factor: f64) {
    use_effect_with(
        (scroll_container, is_mobile, slowdown_factor),
        move |(scroll_container, is_mobile, slowdown_factor)| {
            let container = scroll_container.cast::<HtmlElement>();

            let teardown: Box<dyn FnOnce()> = match (container, *is_mobile) {
                (Some(container), true) => {
                    let slowdown_factor = *slowdown_factor;
                    let touching = Rc::new(Cell::new(false));
                    let touch_start_y = Rc::new(Cell::new(0.0f64));
                    let touch_start_scroll_top = Rc::new(Cell::new(0.0f64));

                    let on_touch_start = {
                        let touching = touching.clone();
                        let touch_start_y = touch_start_y.clone();
                        let touch_start_scroll_top = touch_start_scroll_top.clone();
                        let container = container.clone();
                        Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
                            if event.touches().length() != 1 {
                                return;
                            }
                            let Some(touch) = event.touches().get(0) else {
                                return;
                            };
                            touching.set(true);
                            touch_start_y.set(f64::from(touch.client_y()));
                            touch_start_scroll_top.set(f64::from(container.scroll_top()));
                        })
                    };

                    let on_touch_move = {
                        let touching = touching.clone();
                        let touch_start_y = touch_start_y.clone();
                        let touch_start_scroll_top = touch_start_scroll_top.clone();
                        let container = container.clone();
                        Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
                            // Multi-touch gestures pass through natively.
                            if !touching.get() || event.touches().length() != 1 {
                                return;
                            }
                            let Some(touch) = event.touches().get(0) else {
                                return;
                            };
                            event.prevent_default();
                            let next = slowed_scroll_top(
                                touch_start_scroll_top.get(),
                                touch_start_y.get(),
                                f64::from(touch.client_y()),
                                slowdown_factor,
                            );
                            container.set_scroll_top(next as i32);
                        })
                    };

                    let on_touch_end = {
                        let touching = touching.clone();
                        Closure::<dyn FnMut(TouchEvent)>::new(move |_event: TouchEvent| {
                            touching.set(false);
                        })
                    };

                    let options = AddEventListenerOptions::new();
                    options.set_passive(false);
                    let _ = container.add_event_listener_with_callback_and_add_event_listener_options(
                        "touchstart",
                        on_touch_start.as_ref().unchecked_ref(),
                        &options,
                    );
                    let _ = container.add_event_listener_with_callback_and_add_event_listener_options(
                        "touchmove",
                        on_touch_move.as_ref().unchecked_ref(),
                        &options,
                    );
                    let _ = container.add_event_listener_with_callback(
                        "touchend",
                        on_touch_end.as_ref().unchecked_ref(),
                    );

                    Box::new(move || {
                        let _ = container.remove_event_listener_with_callback(
                            "touchstart",
                            on_touch_start.as_ref().unchecked_ref(),
                        );
                        let _ = container.remove_event_listener_with_callback(
                            "touchmove",
                            on_touch_move.as_ref().unchecked_ref(),
                        );
                        let _ = container.remove_event_listener_with_callback(
                            "touchend",
                            on_touch_end.as_ref().unchecked_ref(),
                        );
                    })
                }
                _ => Box::new(|| ()),
            };

            move || teardown()
        },
    );
}

#[derive(Properties, PartialEq)]
struct BgDarkenProps {
    mode: DisplayMode,
    scroll_container: NodeRef,
    current_index: usize,
}

fn apply_section_darken(
    container: &HtmlElement,
    current_index: usize,
    live_amount: &Rc<RefCell<f64>>,
    amount: &UseStateHandle<f64>,
) {
    let Some((section_top, section_height)) = section_frame(container, current_index) else {
        return;
    };
    let previous = *live_amount.borrow();
    let next = section_darken(
        f64::from(container.scroll_top()),
        section_top,
        section_height,
        previous,
    );
    if (next - previous).abs() > f64::EPSILON {
        *live_amount.borrow_mut() = next;
        amount.set(next);
    }
}

#[function_component(BgDarken)]
fn bg_darken(props: &BgDarkenProps) -> Html {
    let amount = use_state(|| 1.0f64);
    let live_amount = use_mut_ref(|| 1.0f64);

    {
        let amount = amount.clone();
        let live_amount = live_amount.clone();
        use_effect_with(
            (props.scroll_container.clone(), props.current_index),
            move |(scroll_container, current_index)| {
                let current_index = *current_index;
                amount.set(1.0);
                *live_amount.borrow_mut() = 1.0;

                let listener = scroll_container.cast::<HtmlElement>().map(|container| {
                    let gate = Rc::new(RefCell::new(ThrottleGate::new(SCROLL_THROTTLE_MS)));
                    let callback = {
                        let container = container.clone();
                        let amount = amount.clone();
                        let live_amount = live_amount.clone();
                        let gate = gate.clone();
                        Closure::<dyn FnMut()>::new(move || {
                            if !gate.borrow_mut().admit(Date::now()) {
                                return;
                            }
                            apply_section_darken(&container, current_index, &live_amount, &amount);
                        })
                    };

                    let options = AddEventListenerOptions::new();
                    options.set_passive(true);
                    let _ = container.add_event_listener_with_callback_and_add_event_listener_options(
                        "scroll",
                        callback.as_ref().unchecked_ref(),
                        &options,
                    );
                    apply_section_darken(&container, current_index, &live_amount, &amount);

                    (container, callback, gate)
                });

                move || {
                    if let Some((container, callback, gate)) = listener {
                        let _ = container.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                        gate.borrow_mut().reset();
                    }
                }
            },
        );
    }

    let style = format!(
        "background-image: {}; opacity: {:.4}; transition: opacity 0.25s ease-out;",
        overlay_gradient(props.mode),
        *amount
    );

    html! {
        <div class="bg-tint" style={style} aria-hidden="true" />
    }
}

#[derive(Properties, PartialEq)]
struct MobileDarkenOverlayProps {
    is_mobile: bool,
    current_index: usize,
    scroll_container: NodeRef,
}

#[function_component(MobileDarkenOverlay)]
fn mobile_darken_overlay(props: &MobileDarkenOverlayProps) -> Html {
    let amount = use_state(|| 1.0f64);

    {
        let amount = amount.clone();
        use_effect_with(
            (
                props.is_mobile,
                props.current_index,
                props.scroll_container.clone(),
            ),
            move |(is_mobile, current_index, scroll_container)| {
                let current_index = *current_index;
                let container = scroll_container.cast::<HtmlElement>();

                let teardown: Box<dyn FnOnce()> = match (container, *is_mobile) {
                    (Some(container), true) => {
                        amount.set(1.0);

                        // Suppress the transient flicker from the index change
                        // itself before resuming normal tracking.
                        let ignore_scroll = Rc::new(Cell::new(true));
                        let grace = {
                            let ignore_scroll = ignore_scroll.clone();
                            Timeout::new(INDEX_CHANGE_GRACE_MS, move || {
                                ignore_scroll.set(false);
                            })
                        };

                        let gate = Rc::new(RefCell::new(ThrottleGate::new(SCROLL_THROTTLE_MS)));
                        let callback = {
                            let container = container.clone();
                            let amount = amount.clone();
                            let gate = gate.clone();
                            let ignore_scroll = ignore_scroll.clone();
                            Closure::<dyn FnMut()>::new(move || {
                                if ignore_scroll.get() {
                                    return;
                                }
                                if !gate.borrow_mut().admit(Date::now()) {
                                    return;
                                }
                                let next = mobile_darken(
                                    f64::from(container.scroll_top()),
                                    current_index,
                                    f64::from(container.client_height()),
                                );
                                amount.set(next);
                            })
                        };

                        let options = AddEventListenerOptions::new();
                        options.set_passive(true);
                        let _ = container
                            .add_event_listener_with_callback_and_add_event_listener_options(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                                &options,
                            );

                        Box::new(move || {
                            drop(grace);
                            let _ = container.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        })
                    }
                    _ => Box::new(|| ()),
                };

                move || teardown()
            },
        );
    }

    if !props.is_mobile {
        return Html::default();
    }

    let style = format!(
        "opacity: {:.4}; transition: opacity 0.15s ease-out;",
        1.0 - *amount
    );

    html! {
        <div class="mobile-tint" style={style} aria-hidden="true" />
    }
}

#[derive(Properties, PartialEq)]
struct BackgroundManagerProps {
    sections: Rc<Vec<Section>>,
    current_index: usize,
    scroll_container: NodeRef,
    #[prop_or(0)]
    z_index: i32,
}

struct OverlayKeyState {
    counter: u32,
    armed_for: Option<usize>,
}

fn base_background_layer(
    section: &Section,
    is_mobile: bool,
    video_ready: bool,
    on_priming_loaded: &Callback<Event>,
    on_visible_loaded: &Callback<Event>,
) -> Html {
    let Some(background) = section.background else {
        return Html::default();
    };
    let style = resolved_background_style(is_mobile, section.display_mode, false);

    match background {
        Background::Image(url) => html! {
            <div
                key={format!("base-{url}")}
                class="bg-layer"
                style={format!(
                    "background-image: url({url}); background-color: #0b0b0b; \
                     background-position: {}; background-size: {};",
                    style.position, style.size
                )}
                aria-hidden="true"
            />
        },
        Background::Video(url) => html! {
            <div
                key={format!("base-{url}")}
                class="bg-layer bg-video-frame"
                style={format!(
                    "opacity: {}; background-position: {}; background-size: {};",
                    if video_ready { "1" } else { "0" },
                    style.position,
                    style.size
                )}
                aria-hidden="true"
            >
                if video_ready {
                    <video
                        key={format!("visible-{url}")}
                        class="bg-video"
                        src={url}
                        preload="auto"
                        onloadeddata={on_visible_loaded.clone()}
                    />
                } else {
                    <video
                        class="bg-video-priming"
                        src={url}
                        preload="auto"
                        onloadeddata={on_priming_loaded.clone()}
                    />
                }
            </div>
        },
    }
}

fn departing_overlay_layer(
    section: &Section,
    is_mobile: bool,
    overlay_ref: NodeRef,
    overlay_key: u32,
    on_visible_loaded: &Callback<Event>,
) -> Html {
    let Some(background) = section.background else {
        return Html::default();
    };
    let style = resolved_background_style(is_mobile, section.display_mode, false);

    match background {
        Background::Image(url) => html! {
            <div
                ref={overlay_ref}
                key={format!("departing-{overlay_key}")}
                class="bg-overlay-layer"
                style={format!(
                    "background-image: url({url}); background-position: {}; \
                     background-size: {}; transform: translateY(0%); transition: {};",
                    style.position, style.size, DEPARTING_LAYER_TRANSITION
                )}
                aria-hidden="true"
            />
        },
        Background::Video(url) => html! {
            <video
                ref={overlay_ref}
                key={format!("departing-{overlay_key}")}
                class="bg-overlay-layer bg-video"
                src={url}
                preload="auto"
                onloadeddata={on_visible_loaded.clone()}
                style={format!(
                    "transform: translateY(0%); transition: {};",
                    DEPARTING_LAYER_TRANSITION
                )}
                aria-hidden="true"
            />
        },
    }
}

#[function_component(BackgroundManager)]
fn background_manager(props: &BackgroundManagerProps) -> Html {
    let is_mobile = use_is_mobile();
    let signal = use_scroll_direction(props.current_index);
    use_preload_backgrounds(props.sections.clone(), props.current_index, is_mobile);

    let video_ready = use_state(|| false);
    let overlay_layer = use_node_ref();

    // Fresh identity per transition into the up direction, so the departing
    // layer remounts at its covering position instead of animating from its
    // previous end state.
    let overlay_key = {
        let key_state = use_mut_ref(|| OverlayKeyState {
            counter: 0,
            armed_for: None,
        });
        let mut key_state = key_state.borrow_mut();
        match signal.direction {
            Some(ScrollDirection::Up) => {
                if key_state.armed_for != Some(signal.previous_index) {
                    key_state.counter += 1;
                    key_state.armed_for = Some(signal.previous_index);
                }
            }
            _ => key_state.armed_for = None,
        }
        key_state.counter
    };

    {
        let video_ready = video_ready.clone();
        use_effect_with(props.current_index, move |_| {
            video_ready.set(false);
            || ()
        });
    }

    {
        let overlay_layer = overlay_layer.clone();
        let scroll_container = props.scroll_container.clone();
        let is_up = matches!(signal.direction, Some(ScrollDirection::Up));
        use_effect_with((is_up, overlay_key), move |(is_up, _overlay_key)| {
            let mut frame_loop = None;
            let mut overlay_element = None;

            if *is_up {
                if let Some(element) = overlay_layer.cast::<HtmlElement>() {
                    let _ = element.style().set_property("transform", "translateY(0%)");

                    let frame_element = element.clone();
                    frame_loop = Some(FrameLoop::start(move || {
                        let Some(container) = scroll_container.cast::<HtmlElement>() else {
                            return;
                        };
                        let progress = reveal_progress(
                            f64::from(container.scroll_top()),
                            f64::from(container.client_height()),
                        );
                        let _ = frame_element.style().set_property(
                            "transform",
                            &format!("translateY({:.3}%)", progress * 100.0),
                        );
                    }));
                    overlay_element = Some(element);
                }
            }

            move || {
                if let Some(frame_loop) = frame_loop {
                    frame_loop.cancel();
                }
                if let Some(element) = overlay_element {
                    let _ = element.style().set_property("transform", "translateY(0%)");
                }
            }
        });
    }

    let current_section = props.sections.get(props.current_index);
    let departing_section = match signal.direction {
        Some(ScrollDirection::Up) => props.sections.get(signal.previous_index),
        _ => None,
    };

    let on_priming_loaded = {
        let video_ready = video_ready.clone();
        Callback::from(move |_: Event| video_ready.set(true))
    };
    let on_visible_loaded = Callback::from(start_inline_playback);

    let base_layer = current_section
        .map(|section| {
            base_background_layer(
                section,
                is_mobile,
                *video_ready,
                &on_priming_loaded,
                &on_visible_loaded,
            )
        })
        .unwrap_or_default();

    let departing_layer = departing_section
        .map(|section| {
            html! {
                <div class="bg-overlay-frame">
                    { departing_overlay_layer(
                        section,
                        is_mobile,
                        overlay_layer.clone(),
                        overlay_key,
                        &on_visible_loaded,
                    ) }
                </div>
            }
        })
        .unwrap_or_default();

    let tint_layer = current_section
        .map(|section| {
            html! {
                <div class="bg-tint-frame">
                    <BgDarken
                        mode={section.display_mode}
                        scroll_container={props.scroll_container.clone()}
                        current_index={props.current_index}
                    />
                </div>
            }
        })
        .unwrap_or_default();

    html! {
        <div class="bg-root" style={format!("z-index: {};", props.z_index)} aria-hidden="true">
            { base_layer }
            { departing_layer }
            { tint_layer }
        </div>
    }
}

fn render_section(section: &Section) -> Html {
    let class = classes!(
        "snap-section",
        section.is_horizontal.then_some("horizontal-rail")
    );

    html! {
        <section
            id={section.element_id()}
            key={section.id}
            class={class}
            data-mode={section.display_mode.as_str()}
        >
            <div class="section-copy">
                <h2>{section.title}</h2>
                <p>{section.description}</p>
                if section.id == "start-project" {
                    <a class="section-cta" href="mailto:hello@voidworks.studio">
                        {"Start a project"}
                    </a>
                }
            </div>
        </section>
    }
}

#[function_component(App)]
fn app() -> Html {
    let sections = use_memo((), |_| site_sections());
    let scroll_container = use_node_ref();
    let is_mobile = use_is_mobile();
    let current_index = use_active_section(sections.clone());

    use_mobile_scroll_slowdown(scroll_container.clone(), is_mobile, MOBILE_SCROLL_SLOWDOWN);

    html! {
        <>
            <BackgroundManager
                sections={sections.clone()}
                current_index={current_index}
                scroll_container={scroll_container.clone()}
            />
            <MobileDarkenOverlay
                is_mobile={is_mobile}
                current_index={current_index}
                scroll_container={scroll_container.clone()}
            />
            <header class="site-header">
                <span class="site-brand">{"Voidworks"}</span>
                <a class="site-nav-cta" href="#section-start-project">{"Start a project"}</a>
            </header>
            <main class="snap-main" ref={scroll_container}>
                { for sections.iter().map(render_section) }
            </main>
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
