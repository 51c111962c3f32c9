use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use core_types::{ContainerId, Size};

use crate::error::UnknownStrategy;

/// How a truncation instance learns that its container was resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizeStrategy {
    /// Only explicit `apply_ellipsis()` calls re-apply.
    Manual,
    /// Re-apply on every window resize.
    Window,
    /// Re-apply when the container's own box changes size.
    #[default]
    ElementObserver,
}

impl ResizeStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeStrategy::Manual => "manual",
            ResizeStrategy::Window => "window",
            ResizeStrategy::ElementObserver => "resize-observer",
        }
    }

    /// Parse `name`, falling back to [`ResizeStrategy::ElementObserver`] with
    /// a warning for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownStrategy| {
            log::warn!(
                target: "truncate.resize",
                "{err}; using `{}` instead",
                ResizeStrategy::ElementObserver.as_str()
            );
            ResizeStrategy::ElementObserver
        })
    }
}

impl FromStr for ResizeStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "manual" => Ok(ResizeStrategy::Manual),
            "window" => Ok(ResizeStrategy::Window),
            "" | "resize-observer" | "element-resize-detector" | "element-resize-detector-object" => {
                Ok(ResizeStrategy::ElementObserver)
            }
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ResizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug)]
struct ElementListener {
    /// Size at registration or at the last accepted observation.
    baseline: Size,
}

/// Element resize detector shared between truncation instances.
///
/// Listeners are keyed by container, so instances sharing one detector only
/// ever see their own container's signals. Detectors fire once right after a
/// listener is attached, reporting the size the element already has; such
/// observations match the registration baseline and are discarded.
#[derive(Debug, Default)]
pub struct ResizeDetector {
    listeners: HashMap<ContainerId, ElementListener>,
}

pub type SharedResizeDetector = Rc<RefCell<ResizeDetector>>;

impl ResizeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedResizeDetector {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Start listening to `container`, whose current size is `current`.
    pub fn listen_to(&mut self, container: ContainerId, current: Size) {
        log::trace!(target: "truncate.resize", "listen to {container:?} at {current:?}");
        self.listeners
            .insert(container, ElementListener { baseline: current });
    }

    pub fn remove_all_listeners(&mut self, container: ContainerId) {
        if self.listeners.remove(&container).is_some() {
            log::trace!(target: "truncate.resize", "stopped listening to {container:?}");
        }
    }

    pub fn is_listening(&self, container: ContainerId) -> bool {
        self.listeners.contains_key(&container)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Feed an observed size of `container`. Returns `true` when this is a
    /// real resize the owning instance should react to.
    pub fn observe(&mut self, container: ContainerId, size: Size) -> bool {
        let Some(listener) = self.listeners.get_mut(&container) else {
            return false;
        };
        if listener.baseline == size {
            log::trace!(target: "truncate.resize", "ignored unchanged size for {container:?}");
            return false;
        }
        listener.baseline = size;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ContainerId = ContainerId::from_raw(1);
    const B: ContainerId = ContainerId::from_raw(2);

    #[test]
    fn strategy_names() {
        assert_eq!("manual".parse(), Ok(ResizeStrategy::Manual));
        assert_eq!("window".parse(), Ok(ResizeStrategy::Window));
        assert_eq!("".parse(), Ok(ResizeStrategy::ElementObserver));
        assert_eq!(
            "element-resize-detector".parse(),
            Ok(ResizeStrategy::ElementObserver)
        );
        assert_eq!(
            "resize-observer".parse::<ResizeStrategy>(),
            Ok(ResizeStrategy::ElementObserver)
        );
        assert_eq!(
            "bogus".parse::<ResizeStrategy>(),
            Err(UnknownStrategy("bogus".to_string()))
        );
    }

    #[test]
    fn unknown_strategy_falls_back() {
        assert_eq!(
            ResizeStrategy::from_name_or_default("bogus"),
            ResizeStrategy::ElementObserver
        );
        assert_eq!(ResizeStrategy::from_name_or_default("window"), ResizeStrategy::Window);
    }

    #[test]
    fn first_firing_after_attach_is_suppressed() {
        let mut d = ResizeDetector::new();
        let size = Size::new(100.0, 50.0);
        d.listen_to(A, size);
        assert!(!d.observe(A, size));
        assert!(d.observe(A, Size::new(80.0, 50.0)));
        assert!(!d.observe(A, Size::new(80.0, 50.0)));
    }

    #[test]
    fn listeners_are_keyed_by_container() {
        let mut d = ResizeDetector::new();
        d.listen_to(A, Size::new(10.0, 10.0));
        d.listen_to(B, Size::new(10.0, 10.0));
        d.remove_all_listeners(A);
        assert!(!d.is_listening(A));
        assert!(!d.observe(A, Size::new(20.0, 10.0)));
        assert!(d.observe(B, Size::new(20.0, 10.0)));
        assert_eq!(d.listener_count(), 1);
    }
}
