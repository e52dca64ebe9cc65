//! skycast-wasm - WebAssembly bindings for skycast-core
//!
//! This crate exposes the weather widget to JavaScript. The city dataset is
//! embedded in the binary; the debounce timer is armed with `setTimeout`
//! by the bindings, while the weather request itself is performed by the
//! page with `fetch()` and handed back raw.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - `WeatherWidget`: input/focus/blur/submit events, a render callback and
//!   a JSON-serializable `view()`
//! - Stateless helpers: `city_count()`, `search_cities("lon", 5)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { WeatherWidget } from 'skycast-wasm';
//!
//! await init();
//! const widget = new WeatherWidget(apiKey);
//! widget.set_render_callback((view) => render(view));
//!
//! input.oninput = (e) => widget.input(e.target.value);
//! input.onfocus = () => widget.focus();
//! input.onblur = () => widget.blur();
//!
//! button.onclick = async () => {
//!   const req = widget.submit();
//!   if (!req) return;
//!   try {
//!     const res = await fetch(req.url);
//!     widget.resolve(req.generation, res.status, await res.text());
//!   } catch (err) {
//!     widget.reject(req.generation, String(err));
//!   }
//! };
//! ```
//!
//! Notes
//! -----
//! - Without an explicit key the constructor falls back to the
//!   `WEATHER_API_KEY` value present at build time, if any.
//! - Responses for superseded submissions are ignored, so `resolve` may be
//!   called in any order.

use serde::Serialize;
use serde_wasm_bindgen::to_value;
use skycast_core::prelude::*;
use skycast_core::view::SuggestionView;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing skycast WASM module...".into());

    match CityIndex::embedded() {
        Ok(index) => {
            web_sys::console::log_1(&format!("✓ Loaded {} cities", index.len()).into())
        }
        Err(e) => web_sys::console::error_1(&format!("✗ City dataset: {e}").into()),
    }
}

/* --------------------------------------------------------------------------
   Stateless helpers
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn city_count() -> Result<usize, JsValue> {
    Ok(CityIndex::embedded().map_err(js_error)?.len())
}

/// Ranked `{ id, name }` matches for `query`, at most `limit` (default 5).
#[wasm_bindgen]
pub fn search_cities(query: &str, limit: Option<usize>) -> Result<JsValue, JsValue> {
    let index = CityIndex::embedded().map_err(js_error)?;
    let items: Vec<_> = index
        .search(query)
        .into_iter()
        .take(limit.unwrap_or(5))
        .map(|m| SuggestionView {
            id: m.city.id().clone(),
            name: m.city.name().to_owned(),
        })
        .collect();

    to_value(&items).map_err(Into::into)
}

/* --------------------------------------------------------------------------
   Widget
-------------------------------------------------------------------------- */

/// A request the page has to perform, returned by `submit()`.
#[derive(Serialize)]
struct PendingFetch {
    generation: u64,
    city: String,
    url: String,
}

struct Inner {
    widget: Widget<'static>,
    timer: Option<ScheduledTimer>,
    // a replaced timer's callback may still be on the stack
    retired: Option<ScheduledTimer>,
    on_render: Option<js_sys::Function>,
}

impl Inner {
    fn replace_timer(&mut self, timer: Option<ScheduledTimer>) {
        if let Some(old) = std::mem::replace(&mut self.timer, timer) {
            old.cancel();
            self.retired = Some(old);
        }
    }
}

/// A live `setTimeout`. Cleared when dropped.
struct ScheduledTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl ScheduledTimer {
    fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

impl Drop for ScheduledTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[wasm_bindgen]
pub struct WeatherWidget {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl WeatherWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(api_key: Option<String>) -> Result<WeatherWidget, JsValue> {
        let index = CityIndex::embedded().map_err(js_error)?;
        let key = api_key
            .or_else(|| option_env!("WEATHER_API_KEY").map(str::to_owned))
            .unwrap_or_default();
        let config = WeatherConfig::new(&key).map_err(js_error)?;

        Ok(WeatherWidget {
            inner: Rc::new(RefCell::new(Inner {
                widget: Widget::new(index, config, SuggestSettings::default()),
                timer: None,
                retired: None,
                on_render: None,
            })),
        })
    }

    /// `callback(view)` runs after every state change, including debounce
    /// commits that happen between calls.
    pub fn set_render_callback(&self, callback: js_sys::Function) {
        self.inner.borrow_mut().on_render = Some(callback);
    }

    pub fn input(&self, value: String) {
        dispatch(&self.inner, Event::Input(value), now());
    }

    pub fn focus(&self) {
        dispatch(&self.inner, Event::Focus, now());
    }

    pub fn blur(&self) {
        dispatch(&self.inner, Event::Blur, now());
    }

    /// Starts a lookup for the current input. Returns
    /// `{ generation, city, url }`, or `null` when there is nothing to send.
    pub fn submit(&self) -> Result<JsValue, JsValue> {
        match dispatch(&self.inner, Event::Submit, now()) {
            Some(request) => to_value(&PendingFetch {
                generation: request.generation.get(),
                city: request.city,
                url: request.url.into(),
            })
            .map_err(Into::into),
            None => Ok(JsValue::NULL),
        }
    }

    /// Hands back the raw HTTP response for a submission.
    pub fn resolve(&self, generation: f64, status: u16, body: &str) {
        let event = Event::FetchResolved {
            generation: Generation::from(generation as u64),
            result: parse_response(status, body),
        };
        dispatch(&self.inner, event, now());
    }

    /// Reports a transport failure (the `fetch()` promise rejected).
    pub fn reject(&self, generation: f64, message: String) {
        let event = Event::FetchResolved {
            generation: Generation::from(generation as u64),
            result: Err(ProviderError::Network(message)),
        };
        dispatch(&self.inner, event, now());
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.borrow().widget.view()).map_err(Into::into)
    }

    /// Cancels the pending debounce timer. Call before removing the widget.
    pub fn teardown(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.widget.teardown();
        inner.replace_timer(None);
    }
}

/// Runs one event through the widget, performs its timer effect and
/// renders. Returns the fetch the page has to perform, if any.
fn dispatch(cell: &Rc<RefCell<Inner>>, event: Event, now: Duration) -> Option<FetchRequest> {
    let (request, render) = {
        let mut inner = cell.borrow_mut();
        let request = match inner.widget.update(event, now) {
            Some(Effect::ScheduleDebounce(deadline)) => {
                let timer = schedule(Rc::downgrade(cell), deadline, now);
                inner.replace_timer(timer);
                None
            }
            Some(Effect::Fetch(request)) => Some(request),
            None => None,
        };
        (request, render_job(&inner))
    };

    // the borrow is released; the callback may call back into the widget
    if let Some((callback, view)) = render {
        if let Err(e) = callback.call1(&JsValue::NULL, &view) {
            web_sys::console::error_2(&"render callback failed:".into(), &e);
        }
    }
    request
}

fn render_job(inner: &Inner) -> Option<(js_sys::Function, JsValue)> {
    let callback = inner.on_render.clone()?;
    match to_value(&inner.widget.view()) {
        Ok(view) => Some((callback, view)),
        Err(e) => {
            web_sys::console::error_1(&format!("view serialization failed: {e}").into());
            None
        }
    }
}

fn schedule(
    widget: Weak<RefCell<Inner>>,
    deadline: Deadline,
    armed_at: Duration,
) -> Option<ScheduledTimer> {
    let window = web_sys::window()?;
    let token = deadline.token;
    let callback = Closure::<dyn FnMut()>::new(move || {
        let Some(cell) = widget.upgrade() else {
            return;
        };
        // setTimeout and Date.now() may disagree by a millisecond
        let at = now().max(deadline.at);
        dispatch(&cell, Event::DebounceElapsed(token), at);
    });

    let delay = deadline.remaining(armed_at).as_millis().min(i32::MAX as u128) as i32;
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay,
    ) {
        Ok(handle) => Some(ScheduledTimer {
            handle,
            _callback: callback,
        }),
        Err(e) => {
            web_sys::console::error_2(&"setTimeout failed:".into(), &e);
            None
        }
    }
}

fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
