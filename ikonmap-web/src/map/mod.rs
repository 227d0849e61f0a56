//! Bridge to the externally hosted map.
//!
//! The map itself is rendered by a third-party SDK. Components only talk to it
//! through [`MapService`], so native builds and tests run against [`NullMap`].

#[cfg(target_arch = "wasm32")]
mod felt;

use ikonmap_core::{MapConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use yew::Callback;

#[cfg(target_arch = "wasm32")]
pub use felt::FeltBridge;

/// DOM id of the element the map SDK embeds into.
pub const CONTAINER_ID: &str = "ikon-map";

/// Iframe URL used when the SDK fails to embed.
#[must_use]
pub fn embed_url(map_id: &str) -> String {
    format!("https://felt.com/embed/map/{map_id}?cooperativeGestures=false")
}

/// A click on a resort marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureClick {
    pub resort_id: String,
}

/// Keeps an event handler registered; dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to release.
    #[must_use]
    pub fn inert() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Forwards events to the handler installed last, so one map subscription
/// can serve callbacks that are rebuilt on every render.
pub struct Relay<T: 'static> {
    target: Rc<RefCell<Callback<T>>>,
}

impl<T: 'static> Relay<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            target: Rc::new(RefCell::new(Callback::noop())),
        }
    }

    pub fn replace(&self, handler: Callback<T>) {
        *self.target.borrow_mut() = handler;
    }

    /// Stable callback to hand to [`MapService`] subscriptions.
    #[must_use]
    pub fn callback(&self) -> Callback<T> {
        let target = Rc::clone(&self.target);
        Callback::from(move |value: T| {
            // The handler may swap itself out while running.
            let handler = target.borrow().clone();
            handler.emit(value);
        })
    }
}

impl<T: 'static> Default for Relay<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub trait MapService {
    /// Embed the map into the element with id `container_id`; `on_ready`
    /// receives the outcome once the SDK settles.
    fn embed(&self, container_id: &str, on_ready: Callback<Result<(), String>>);

    fn set_viewport(&self, viewport: &Viewport);

    /// Highlight a resort marker, or clear the highlight with `None`.
    fn select_feature(&self, resort_id: Option<&str>);

    /// Show only the markers whose resort id is in `visible_ids`.
    fn apply_filter(&self, visible_ids: &[String]);

    fn subscribe_viewport(&self, handler: Callback<Viewport>) -> Subscription;

    fn subscribe_click(&self, handler: Callback<FeatureClick>) -> Subscription;
}

/// Shared handle to a map service, compared by identity in component props.
#[derive(Clone)]
pub struct MapHandle(Rc<dyn MapService>);

impl MapHandle {
    pub fn new(service: impl MapService + 'static) -> Self {
        Self(Rc::new(service))
    }
}

impl Deref for MapHandle {
    type Target = dyn MapService;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for MapHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Pick the map service for this build: the SDK bridge in the browser when a
/// map id is configured, otherwise [`NullMap`].
#[must_use]
pub fn connect(config: &MapConfig) -> MapHandle {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(map_id) = config.map_id.as_deref() {
            return MapHandle::new(FeltBridge::new(map_id));
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = config;
    MapHandle::new(NullMap::default())
}

/// Commands a [`NullMap`] received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    Embed(String),
    SetViewport(Viewport),
    Select(Option<String>),
    Filter(Vec<String>),
}

type Handlers<T> = Rc<RefCell<Vec<(u32, Callback<T>)>>>;

/// In-process map used off the browser: records commands and lets callers
/// replay viewport changes and marker clicks.
#[derive(Default)]
pub struct NullMap {
    commands: RefCell<Vec<MapCommand>>,
    viewport_handlers: Handlers<Viewport>,
    click_handlers: Handlers<FeatureClick>,
    next_id: Cell<u32>,
}

impl NullMap {
    #[must_use]
    pub fn commands(&self) -> Vec<MapCommand> {
        self.commands.borrow().clone()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.viewport_handlers.borrow().len() + self.click_handlers.borrow().len()
    }

    pub fn emit_viewport(&self, viewport: Viewport) {
        for handler in snapshot(&self.viewport_handlers) {
            handler.emit(viewport);
        }
    }

    pub fn emit_click(&self, click: &FeatureClick) {
        for handler in snapshot(&self.click_handlers) {
            handler.emit(click.clone());
        }
    }

    fn register<T: 'static>(&self, handlers: &Handlers<T>, handler: Callback<T>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        handlers.borrow_mut().push((id, handler));
        let handlers = Rc::clone(handlers);
        Subscription::new(move || handlers.borrow_mut().retain(|(h, _)| *h != id))
    }
}

// Handlers may unsubscribe while being notified.
fn snapshot<T>(handlers: &Handlers<T>) -> Vec<Callback<T>> {
    handlers.borrow().iter().map(|(_, h)| h.clone()).collect()
}

impl MapService for NullMap {
    fn embed(&self, container_id: &str, on_ready: Callback<Result<(), String>>) {
        self.commands
            .borrow_mut()
            .push(MapCommand::Embed(container_id.to_string()));
        on_ready.emit(Ok(()));
    }

    fn set_viewport(&self, viewport: &Viewport) {
        self.commands
            .borrow_mut()
            .push(MapCommand::SetViewport(*viewport));
    }

    fn select_feature(&self, resort_id: Option<&str>) {
        self.commands
            .borrow_mut()
            .push(MapCommand::Select(resort_id.map(str::to_string)));
    }

    fn apply_filter(&self, visible_ids: &[String]) {
        self.commands
            .borrow_mut()
            .push(MapCommand::Filter(visible_ids.to_vec()));
    }

    fn subscribe_viewport(&self, handler: Callback<Viewport>) -> Subscription {
        self.register(&self.viewport_handlers, handler)
    }

    fn subscribe_click(&self, handler: Callback<FeatureClick>) -> Subscription {
        self.register(&self.click_handlers, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_map_records_commands_in_order() {
        let map = NullMap::default();
        let ready = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ready);
        map.embed(CONTAINER_ID, Callback::from(move |res: Result<(), String>| flag.set(res.is_ok())));
        map.set_viewport(&Viewport::focused_on(40.6, -111.6, 10.0));
        map.select_feature(Some("alta"));
        map.apply_filter(&["alta".to_string()]);
        map.select_feature(None);

        assert!(ready.get());
        assert_eq!(
            map.commands(),
            vec![
                MapCommand::Embed(CONTAINER_ID.into()),
                MapCommand::SetViewport(Viewport::focused_on(40.6, -111.6, 10.0)),
                MapCommand::Select(Some("alta".into())),
                MapCommand::Filter(vec!["alta".into()]),
                MapCommand::Select(None),
            ]
        );
    }

    #[test]
    fn dropping_a_subscription_unsubscribes() {
        let map = NullMap::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = map.subscribe_viewport(Callback::from(move |vp: Viewport| {
            sink.borrow_mut().push(vp.zoom);
        }));
        let clicks = map.subscribe_click(Callback::from(|_: FeatureClick| {}));
        assert_eq!(map.subscriber_count(), 2);

        map.emit_viewport(Viewport::focused_on(0.0, 0.0, 3.0));
        drop(sub);
        map.emit_viewport(Viewport::focused_on(0.0, 0.0, 4.0));

        assert_eq!(*seen.borrow(), vec![3.0]);
        assert_eq!(map.subscriber_count(), 1);
        drop(clicks);
        assert_eq!(map.subscriber_count(), 0);
    }

    #[test]
    fn click_handlers_receive_the_resort_id() {
        let map = NullMap::default();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let _sub = map.subscribe_click(Callback::from(move |click: FeatureClick| {
            *sink.borrow_mut() = Some(click);
        }));
        let click = FeatureClick {
            resort_id: "taos".into(),
        };
        map.emit_click(&click);
        assert_eq!(seen.borrow().as_ref(), Some(&click));
    }

    #[test]
    fn relay_keeps_one_subscription_across_handler_swaps() {
        let map = NullMap::default();
        let relay = Relay::<Viewport>::new();
        let _sub = map.subscribe_viewport(relay.callback());

        let first = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&first);
        relay.replace(Callback::from(move |vp: Viewport| sink.borrow_mut().push(vp.zoom)));
        map.emit_viewport(Viewport::focused_on(0.0, 0.0, 3.0));

        let second = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&second);
        relay.replace(Callback::from(move |vp: Viewport| sink.borrow_mut().push(vp.zoom)));
        map.emit_viewport(Viewport::focused_on(0.0, 0.0, 4.0));

        assert_eq!(*first.borrow(), vec![3.0]);
        assert_eq!(*second.borrow(), vec![4.0]);
        assert_eq!(map.subscriber_count(), 1);
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = connect(&MapConfig::default());
        let b = a.clone();
        let c = connect(&MapConfig::default());
        assert!(a == b);
        assert!(a != c);
    }

    #[test]
    fn iframe_fallback_url() {
        assert_eq!(
            embed_url("abc"),
            "https://felt.com/embed/map/abc?cooperativeGestures=false"
        );
    }
}
