use core_types::{ClickEvent, ContainerId, EventKind, ListenerId, Overflow, Size};
use markup::Fragment;

use crate::{InlineLayoutOptions, LineBox, TextMeasurer, TextStyle, hit_test, layout_fragment};

/// A rendered container whose content can be replaced and measured.
///
/// This is the only view of the host the truncation engine has: it renders
/// candidate trees, compares the visible box against the content extent, and
/// attaches event listeners through it.
pub trait Surface {
    fn id(&self) -> ContainerId;

    /// Replace the container's inner content.
    fn render(&mut self, content: &Fragment);

    /// Size of the visible box.
    fn client_size(&self) -> Size;

    /// Extent of the rendered content; never smaller than the client box.
    fn scroll_size(&mut self) -> Size;

    /// Inline `overflow` style; `None` when unset.
    fn overflow(&self) -> Option<Overflow>;

    fn set_overflow(&mut self, overflow: Option<Overflow>);

    fn listen(&mut self, kind: EventKind) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);
}

/// [`Surface`] backed by the inline layout engine.
///
/// Layout runs lazily on the first measurement after a render or resize.
pub struct LayoutSurface<M: TextMeasurer> {
    id: ContainerId,
    measurer: M,
    style: TextStyle,
    options: InlineLayoutOptions,
    client: Size,
    content: Fragment,
    lines: Option<Vec<LineBox>>,
    overflow: Option<Overflow>,
    listeners: Vec<(ListenerId, EventKind)>,
    next_listener: u64,
    render_count: usize,
}

impl<M: TextMeasurer> LayoutSurface<M> {
    pub fn new(id: ContainerId, client: Size, measurer: M) -> Self {
        Self {
            id,
            measurer,
            style: TextStyle::initial(),
            options: InlineLayoutOptions::html_defaults(),
            client,
            content: Fragment::default(),
            lines: None,
            overflow: None,
            listeners: Vec::new(),
            next_listener: 1,
            render_count: 0,
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self.lines = None;
        self
    }

    pub fn with_options(mut self, options: InlineLayoutOptions) -> Self {
        self.options = options;
        self.lines = None;
        self
    }

    pub fn with_overflow(mut self, overflow: Option<Overflow>) -> Self {
        self.overflow = overflow;
        self
    }

    /// Change the visible box. The host is responsible for reporting the
    /// resize to whoever watches this container.
    pub fn resize(&mut self, client: Size) {
        self.client = client;
        self.lines = None;
    }

    /// Content most recently rendered.
    pub fn content(&self) -> &Fragment {
        &self.content
    }

    /// Number of `render` calls so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn lines(&mut self) -> &[LineBox] {
        let Self {
            lines,
            measurer,
            content,
            style,
            options,
            client,
            ..
        } = self;
        lines.get_or_insert_with(|| {
            let lines = layout_fragment(measurer, content, style, *options, client.width);
            log::trace!(
                target: "layout.surface",
                "laid out {} lines at width {}",
                lines.len(),
                client.width
            );
            lines
        })
    }

    /// Extent of the laid-out content, including padding.
    pub fn content_size(&mut self) -> Size {
        let padding = self.options.padding.max(0.0);
        let lines = self.lines();
        if lines.is_empty() {
            return Size::default();
        }
        let width = lines
            .iter()
            .map(|l| l.rect.x + l.rect.width)
            .fold(0.0, f32::max);
        let height = lines.last().map_or(0.0, |l| l.rect.y + l.rect.height);
        Size::new(width + padding, height + padding)
    }

    /// Simulate a pointer click at `(x, y)` in container coordinates.
    ///
    /// Returns the event a click listener would receive, or `None` when no
    /// click listener is attached.
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<ClickEvent> {
        if self.listener_count(EventKind::Click) == 0 {
            return None;
        }
        let hit = hit_test(self.lines(), (x, y));
        let ctx = hit.map(|h| h.ctx).unwrap_or_default();
        Some(ClickEvent {
            x,
            y,
            target_tag: ctx.tag,
            target_classes: ctx.classes,
            enclosing_classes: ctx.enclosing_classes,
            default_prevented: false,
        })
    }
}

impl<M: TextMeasurer> Surface for LayoutSurface<M> {
    fn id(&self) -> ContainerId {
        self.id
    }

    fn render(&mut self, content: &Fragment) {
        self.content = content.clone();
        self.lines = None;
        self.render_count += 1;
    }

    fn client_size(&self) -> Size {
        self.client
    }

    fn scroll_size(&mut self) -> Size {
        let content = self.content_size();
        Size::new(
            content.width.max(self.client.width),
            content.height.max(self.client.height),
        )
    }

    fn overflow(&self) -> Option<Overflow> {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Option<Overflow>) {
        self.overflow = overflow;
    }

    fn listen(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
    }
}
