/// Opaque identity of a rendered container.
///
/// Resize listeners are keyed by this id, so several truncation instances can
/// share one detector without seeing each other's signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ContainerId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

/// Handle returned by a host when an event listener is attached.
/// Passing it back to the host detaches exactly that listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Width/height pair in CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Inline `overflow` style of a container. `None` on the host side means unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Scroll,
    Auto,
}

impl Overflow {
    pub fn as_str(self) -> &'static str {
        match self {
            Overflow::Visible => "visible",
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
            Overflow::Auto => "auto",
        }
    }
}

/// Events a host can route to a container listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
}

/// A pointer click routed to a container listener.
///
/// `target_classes` are the classes of the innermost element under the
/// pointer, `enclosing_classes` those of its ancestors; a listener may call [`ClickEvent::prevent_default`] to stop the
/// host's default action (e.g. following a link).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickEvent {
    pub x: f32,
    pub y: f32,
    pub target_tag: Option<String>,
    pub target_classes: Vec<String>,
    pub enclosing_classes: Vec<String>,
    pub default_prevented: bool,
}

impl ClickEvent {
    pub fn has_class(&self, class: &str) -> bool {
        self.target_classes.iter().any(|c| c == class)
    }

    /// Whether the target or one of its ancestors carries `class`.
    pub fn within_class(&self, class: &str) -> bool {
        self.has_class(class) || self.enclosing_classes.iter().any(|c| c == class)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_id_round_trip() {
        let id = ContainerId::from_raw(7);
        assert_eq!(id.as_raw(), 7);
        assert_eq!(ContainerId::from(7u64), id);
    }

    #[test]
    fn container_ids_hash_by_value() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ContainerId::from_raw(1));
        set.insert(ContainerId::from_raw(2));
        set.insert(ContainerId::from_raw(1));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn within_class_looks_at_ancestors() {
        let ev = ClickEvent {
            target_classes: vec!["inner".to_string()],
            enclosing_classes: vec!["more".to_string()],
            ..ClickEvent::default()
        };
        assert!(ev.has_class("inner"));
        assert!(!ev.has_class("more"));
        assert!(ev.within_class("more"));
        assert!(!ev.within_class("other"));
    }

    #[test]
    fn overflow_names_match_css_keywords() {
        assert_eq!(Overflow::Hidden.as_str(), "hidden");
        assert_eq!(Overflow::Visible.as_str(), "visible");
    }
}
