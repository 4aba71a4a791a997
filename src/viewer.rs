//! Panoramic viewer collaborator
//!
//! The widget itself lives in the front-end. This module describes what it is
//! constructed with, and a [`ViewerSlot`] that keeps at most one instance
//! alive, tearing the old one down before a new one is built.
//!
//! [`PanoramaViewer`], [`ViewerSlot`], [`ViewerEvent`] and [`Component`] are
//! the binding contract for the front-end's viewer glue. The server only
//! ships [`ViewerOptions`]; the glue implements [`PanoramaViewer`] over the
//! real widget and drives it through a [`ViewerSlot`].

use crate::constants::ui::{VIEWER_COMPONENTS_DELAY_MS, VIEWER_CONTAINER, VIEWER_LAYOUT_DELAY_MS};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which built-in components the viewer enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOptions {
    pub cover: bool,
    pub sequence: bool,
    pub direction: bool,
    pub zoom: bool,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            cover: false,
            sequence: true,
            direction: true,
            zoom: true,
        }
    }
}

/// Delays the front-end waits for before building the viewer and wiring its
/// navigation components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerTiming {
    pub layout_delay_ms: u64,
    pub components_delay_ms: u64,
}

impl Default for ViewerTiming {
    fn default() -> Self {
        Self {
            layout_delay_ms: VIEWER_LAYOUT_DELAY_MS,
            components_delay_ms: VIEWER_COMPONENTS_DELAY_MS,
        }
    }
}

/// Viewer construction options, serialized the way the widget expects them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerOptions {
    pub access_token: String,
    pub container: String,
    pub image_id: String,
    pub component: ComponentOptions,
    pub timing: ViewerTiming,
}

/// Per-deployment viewer settings; combined with an image id to build
/// [`ViewerOptions`]
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    pub access_token: String,
    pub container: String,
    pub timing: ViewerTiming,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            container: VIEWER_CONTAINER.to_string(),
            timing: ViewerTiming::default(),
        }
    }
}

impl ViewerSettings {
    /// Options for opening `image_id`
    pub fn options_for(&self, image_id: &str) -> ViewerOptions {
        ViewerOptions {
            access_token: self.access_token.clone(),
            container: self.container.clone(),
            image_id: image_id.to_string(),
            component: ComponentOptions::default(),
            timing: self.timing,
        }
    }
}

/// Navigation components that must stay active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Sequence,
    Direction,
    Zoom,
}

impl Component {
    pub const NAVIGATION: [Component; 3] = [Component::Sequence, Component::Direction, Component::Zoom];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Sequence => "sequence",
            Component::Direction => "direction",
            Component::Zoom => "zoom",
        }
    }
}

/// Events a viewer instance reports
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    Load,
    Error(String),
}

/// A live panoramic viewer instance
pub trait PanoramaViewer {
    /// Whether a component is present and active
    fn is_active(&self, component: Component) -> bool;

    /// Activate a component
    fn activate(&mut self, component: Component);

    /// Tear the instance down
    fn remove(&mut self);
}

/// Holds at most one viewer
#[derive(Debug)]
pub struct ViewerSlot<V: PanoramaViewer> {
    current: Option<V>,
}

impl<V: PanoramaViewer> Default for ViewerSlot<V> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<V: PanoramaViewer> ViewerSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down any existing viewer, then build a new one from `options`
    pub fn mount(&mut self, options: &ViewerOptions, build: impl FnOnce(&ViewerOptions) -> V) -> &mut V {
        self.clear();
        debug!("Creating viewer for image {}", options.image_id);
        self.current.insert(build(options))
    }

    /// Tear down the current viewer, if any
    pub fn clear(&mut self) {
        if let Some(mut viewer) = self.current.take() {
            debug!("Removing existing viewer");
            viewer.remove();
        }
    }

    pub fn get(&self) -> Option<&V> {
        self.current.as_ref()
    }

    /// React to a viewer event: on load, make sure navigation is active
    ///
    /// Returns the error message for `ViewerEvent::Error`.
    pub fn handle(&mut self, event: ViewerEvent) -> Option<String> {
        match event {
            ViewerEvent::Load => {
                self.ensure_navigation();
                None
            }
            ViewerEvent::Error(message) => {
                warn!("Viewer error: {}", message);
                Some(format!("Failed to load 360° viewer. Error: {}", message))
            }
        }
    }

    /// Re-activate any navigation component that went inactive
    pub fn ensure_navigation(&mut self) -> usize {
        let Some(viewer) = self.current.as_mut() else {
            return 0;
        };
        let mut activated = 0;
        for component in Component::NAVIGATION {
            if !viewer.is_active(component) {
                debug!("Re-activating {} component", component.name());
                viewer.activate(component);
                activated += 1;
            }
        }
        activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeViewer {
        image_id: String,
        active: Vec<Component>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl PanoramaViewer for FakeViewer {
        fn is_active(&self, component: Component) -> bool {
            self.active.contains(&component)
        }

        fn activate(&mut self, component: Component) {
            self.active.push(component);
        }

        fn remove(&mut self) {
            self.log.borrow_mut().push(format!("remove {}", self.image_id));
        }
    }

    fn builder(log: Rc<RefCell<Vec<String>>>) -> impl FnOnce(&ViewerOptions) -> FakeViewer {
        move |options| {
            log.borrow_mut().push(format!("build {}", options.image_id));
            FakeViewer {
                image_id: options.image_id.clone(),
                active: vec![Component::Zoom],
                log,
            }
        }
    }

    #[test]
    fn test_options_serialize_like_widget_config() {
        let settings = ViewerSettings {
            access_token: "MLY|1".to_string(),
            ..ViewerSettings::default()
        };
        let json = serde_json::to_value(settings.options_for("42")).unwrap();

        assert_eq!(json["accessToken"], "MLY|1");
        assert_eq!(json["container"], "mapillary");
        assert_eq!(json["imageId"], "42");
        assert_eq!(
            json["component"],
            serde_json::json!({ "cover": false, "sequence": true, "direction": true, "zoom": true })
        );
        assert_eq!(json["timing"]["layoutDelayMs"], 100);
        assert_eq!(json["timing"]["componentsDelayMs"], 200);
    }

    #[test]
    fn test_mount_tears_down_previous_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let settings = ViewerSettings::default();
        let mut slot = ViewerSlot::new();

        slot.mount(&settings.options_for("a"), builder(log.clone()));
        slot.mount(&settings.options_for("b"), builder(log.clone()));
        slot.clear();

        assert_eq!(*log.borrow(), vec!["build a", "remove a", "build b", "remove b"]);
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_load_activates_navigation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = ViewerSlot::new();
        slot.mount(&ViewerSettings::default().options_for("a"), builder(log));

        assert!(slot.handle(ViewerEvent::Load).is_none());
        let viewer = slot.get().unwrap();
        for component in Component::NAVIGATION {
            assert!(viewer.is_active(component));
        }
        assert_eq!(slot.ensure_navigation(), 0);
    }

    #[test]
    fn test_error_event_message() {
        let mut slot: ViewerSlot<FakeViewer> = ViewerSlot::new();
        let message = slot.handle(ViewerEvent::Error("WebGL unavailable".to_string()));
        assert_eq!(
            message.as_deref(),
            Some("Failed to load 360° viewer. Error: WebGL unavailable")
        );
    }
}
