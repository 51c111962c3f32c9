use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use core_types::{ClickEvent, EventKind, ListenerId, Size};
use layout::Surface;
use markup::Fragment;
use tools::Substring;

use crate::content::Content;
use crate::events::{Emitter, Subscription};
use crate::options::EllipsisOptions;
use crate::overflow::is_overflowing;
use crate::resize::{ResizeDetector, ResizeStrategy, SharedResizeDetector};
use crate::search::find_max_fitting_length;
use crate::state::{MORE_CLASS, TruncationState};
use crate::truncator::truncated_copy;

/// Something that may require truncation to be applied again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trigger {
    /// The host observed the container at this size.
    ElementResized(Size),
    WindowResized,
    /// The content source may have changed (inputs changed, view checked).
    ContentChanged,
    /// Explicit request to apply.
    Manual,
}

/// Triggers posted while an instance is busy or borrowed elsewhere.
///
/// Hosts and observers hold a clone and post into it at any time; the owning
/// [`Ellipsis`] drains it after each pass and coalesces everything it finds
/// into at most one follow-up pass.
#[derive(Clone, Debug, Default)]
pub struct TriggerQueue(Rc<RefCell<VecDeque<Trigger>>>);

impl TriggerQueue {
    pub fn post(&self, trigger: Trigger) {
        self.0.borrow_mut().push_back(trigger);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn take_all(&self) -> Vec<Trigger> {
        self.0.borrow_mut().drain(..).collect()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created, not mounted yet.
    Idle,
    /// Mounted and listening for triggers.
    Watching,
    /// A pass is in progress.
    Applying,
    /// Torn down; every trigger is ignored.
    Destroyed,
}

/// Outcome of one truncation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Chars of text kept, or `None` when the content is shown in full.
    pub truncated_at: Option<usize>,
    /// Whether the full content overflowed the container.
    pub overflowing: bool,
    /// Number of renders the pass performed.
    pub renders: usize,
}

/// Keeps the content of one container truncated to fit.
///
/// Lifecycle: [`Ellipsis::mount`] renders the content and starts watching,
/// triggers re-apply while watching, and [`Ellipsis::destroy`] detaches every
/// listener for good.
pub struct Ellipsis<S: Surface> {
    surface: S,
    content: Content,
    canonical: Fragment,
    snapshot: String,
    options: EllipsisOptions,
    substring_override: Option<Substring>,
    strategy: ResizeStrategy,
    state: TruncationState,
    phase: Phase,
    detector: SharedResizeDetector,
    window_armed: bool,
    click_listener: Option<ListenerId>,
    truncated_at: Option<usize>,
    queue: TriggerQueue,
    change: Emitter<Option<usize>>,
    more_click: Emitter<ClickEvent>,
}

impl<S: Surface> Ellipsis<S> {
    pub fn new(surface: S, content: impl Into<Content>, options: EllipsisOptions) -> Self {
        let content = content.into();
        let canonical = content.to_fragment();
        let state = TruncationState::new(surface.id(), &canonical);
        let strategy = options.resize_strategy();
        let mut ellipsis = Self {
            surface,
            content,
            snapshot: canonical.to_markup(),
            canonical,
            options,
            substring_override: None,
            strategy,
            state,
            phase: Phase::Idle,
            detector: ResizeDetector::shared(),
            window_armed: false,
            click_listener: None,
            truncated_at: None,
            queue: TriggerQueue::default(),
            change: Emitter::new(),
            more_click: Emitter::new(),
        };
        ellipsis.rebuild_state();
        ellipsis
    }

    /// Use a detector shared with other instances instead of a private one.
    pub fn with_detector(mut self, detector: SharedResizeDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct host access, e.g. to resize the container. Rendering through
    /// this handle bypasses truncation until the next pass.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &EllipsisOptions {
        &self.options
    }

    pub fn strategy(&self) -> ResizeStrategy {
        self.strategy
    }

    pub fn state(&self) -> &TruncationState {
        &self.state
    }

    /// Content tree as it was before truncation.
    pub fn canonical(&self) -> &Fragment {
        &self.canonical
    }

    /// Result of the last pass.
    pub fn truncated_at(&self) -> Option<usize> {
        self.truncated_at
    }

    pub fn queue(&self) -> TriggerQueue {
        self.queue.clone()
    }

    /// Observe the result of every pass: `None` when the content is shown in
    /// full, otherwise the number of chars kept.
    pub fn on_change(&mut self, observer: impl FnMut(&Option<usize>) + 'static) -> Subscription {
        self.change.subscribe(observer)
    }

    pub fn off_change(&mut self, subscription: Subscription) -> bool {
        self.change.unsubscribe(subscription)
    }

    /// Observe clicks on the indicator. While anyone observes, text
    /// indicators render as a link; this takes effect on the next pass.
    pub fn on_more_click(&mut self, observer: impl FnMut(&ClickEvent) + 'static) -> Subscription {
        self.more_click.subscribe(observer)
    }

    pub fn off_more_click(&mut self, subscription: Subscription) -> bool {
        self.more_click.unsubscribe(subscription)
    }

    /// Render the full content and start watching for triggers. Applies
    /// immediately unless the resize strategy is manual.
    pub fn mount(&mut self) -> Option<PassReport> {
        if self.phase != Phase::Idle {
            log::warn!(target: "truncate.coordinator", "mount in phase {:?} ignored", self.phase);
            return None;
        }
        self.adopt(self.content.to_fragment());
        self.surface.render(&self.canonical);
        self.phase = Phase::Watching;
        self.register_resize();
        log::debug!(
            target: "truncate.coordinator",
            "mounted {:?} with {} strategy",
            self.state.container,
            self.strategy
        );

        if self.strategy == ResizeStrategy::Manual {
            None
        } else {
            Some(self.run_passes())
        }
    }

    /// Run one full pass now. Safe to call repeatedly; a no-op outside the
    /// watching phase.
    pub fn apply_ellipsis(&mut self) -> PassReport {
        match self.phase {
            Phase::Watching => self.run_passes(),
            Phase::Applying => {
                self.queue.post(Trigger::Manual);
                PassReport::default()
            }
            Phase::Idle | Phase::Destroyed => {
                log::debug!(
                    target: "truncate.coordinator",
                    "apply in phase {:?} ignored",
                    self.phase
                );
                PassReport::default()
            }
        }
    }

    /// React to a trigger. Returns the report when a pass ran.
    pub fn handle(&mut self, trigger: Trigger) -> Option<PassReport> {
        match self.phase {
            Phase::Watching => {}
            Phase::Applying => {
                self.queue.post(trigger);
                return None;
            }
            Phase::Idle | Phase::Destroyed => return None,
        }
        if self.wants_pass(trigger) {
            Some(self.run_passes())
        } else {
            None
        }
    }

    /// Drain triggers posted to the [`TriggerQueue`]; at most one pass runs.
    pub fn process_queued(&mut self) -> Option<PassReport> {
        if self.phase != Phase::Watching {
            return None;
        }
        self.follow_up()
    }

    /// Replace the content source. Re-applies when the new content differs
    /// from the current one.
    pub fn set_content(&mut self, content: impl Into<Content>) -> Option<PassReport> {
        self.content = content.into();
        match self.phase {
            Phase::Watching => self.handle(Trigger::ContentChanged),
            Phase::Idle => {
                self.adopt(self.content.to_fragment());
                None
            }
            Phase::Applying | Phase::Destroyed => None,
        }
    }

    /// The host finished a change-detection cycle: projected content is
    /// evaluated again and re-applied if it drifted.
    pub fn checked(&mut self) -> Option<PassReport> {
        if self.content.is_template() {
            self.handle(Trigger::ContentChanged)
        } else {
            None
        }
    }

    /// Replace the configuration. Re-registers resize detection if the
    /// strategy changed and re-applies while watching.
    pub fn set_options(&mut self, options: EllipsisOptions) -> Option<PassReport> {
        if options == self.options || self.phase == Phase::Destroyed {
            return None;
        }
        let watching = self.phase == Phase::Watching;
        if watching {
            self.deregister_resize();
        }
        self.strategy = options.resize_strategy();
        self.options = options;
        self.rebuild_state();
        if watching {
            self.register_resize();
            Some(self.run_passes())
        } else {
            None
        }
    }

    /// Use a custom substring strategy for cut text nodes.
    pub fn set_substring(&mut self, substring: Substring) -> Option<PassReport> {
        self.substring_override = Some(substring);
        self.rebuild_state();
        if self.phase == Phase::Watching {
            Some(self.run_passes())
        } else {
            None
        }
    }

    /// Route a click on the container. Emits a more-click when the target is
    /// inside the interactive indicator; its default action is then prevented.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> bool {
        if self.phase != Phase::Watching
            || self.click_listener.is_none()
            || !event.within_class(MORE_CLASS)
        {
            return false;
        }
        event.prevent_default();
        self.more_click.emit(event);
        true
    }

    /// Detach every listener; later triggers are ignored.
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        if self.phase != Phase::Idle {
            self.deregister_resize();
        }
        self.detach_click();
        self.queue.clear();
        self.phase = Phase::Destroyed;
        log::debug!(target: "truncate.coordinator", "destroyed {:?}", self.state.container);
    }

    fn wants_pass(&mut self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::ElementResized(size) => {
                self.strategy == ResizeStrategy::ElementObserver
                    && self
                        .detector
                        .borrow_mut()
                        .observe(self.state.container, size)
            }
            Trigger::WindowResized => self.strategy == ResizeStrategy::Window && self.window_armed,
            Trigger::ContentChanged => self.refresh_content(),
            Trigger::Manual => true,
        }
    }

    // Re-evaluate the content source; true if its snapshot changed.
    fn refresh_content(&mut self) -> bool {
        let fresh = self.content.to_fragment();
        let snapshot = fresh.to_markup();
        if snapshot == self.snapshot {
            return false;
        }
        log::debug!(target: "truncate.coordinator", "content of {:?} changed", self.state.container);
        self.canonical = fresh;
        self.snapshot = snapshot;
        self.rebuild_state();
        true
    }

    fn adopt(&mut self, canonical: Fragment) {
        self.snapshot = canonical.to_markup();
        self.canonical = canonical;
        self.rebuild_state();
    }

    fn rebuild_state(&mut self) {
        let substring = self
            .substring_override
            .clone()
            .unwrap_or_else(|| self.options.substring());
        self.state = TruncationState::new(self.surface.id(), &self.canonical)
            .with_word_boundaries(self.options.word_boundaries())
            .with_indicator(self.options.indicator())
            .with_substring(substring);
    }

    fn run_passes(&mut self) -> PassReport {
        let report = self.run_pass();
        self.follow_up().unwrap_or(report)
    }

    // Coalesce everything queued so far into at most one pass. Triggers
    // posted during that pass stay queued.
    fn follow_up(&mut self) -> Option<PassReport> {
        let queued = self.queue.take_all();
        if queued.is_empty() {
            return None;
        }
        let mut wanted = false;
        for trigger in queued {
            wanted |= self.wants_pass(trigger);
        }
        if !wanted {
            return None;
        }
        log::debug!(target: "truncate.coordinator", "running coalesced follow-up pass");
        Some(self.run_pass())
    }

    fn run_pass(&mut self) -> PassReport {
        self.phase = Phase::Applying;
        self.deregister_resize();
        self.detach_click();

        let interactive = self.more_click.has_observers();
        let indicator = self.options.indicator();
        self.state.indicator = if interactive {
            indicator.interactive()
        } else {
            indicator
        };

        let report = search_and_render(
            &mut self.surface,
            &self.canonical,
            &self.state,
            self.options.enabled,
        );
        self.truncated_at = report.truncated_at;

        self.register_resize();
        if interactive && report.truncated_at.is_some() {
            self.click_listener = Some(self.surface.listen(EventKind::Click));
        }
        self.phase = Phase::Watching;

        log::debug!(
            target: "truncate.coordinator",
            "pass on {:?}: truncated_at={:?} overflowing={} renders={}",
            self.state.container,
            report.truncated_at,
            report.overflowing,
            report.renders
        );
        if self.change.has_observers() {
            self.change.emit(&report.truncated_at);
        }
        report
    }

    fn register_resize(&mut self) {
        match self.strategy {
            ResizeStrategy::Manual => {}
            ResizeStrategy::Window => self.window_armed = true,
            ResizeStrategy::ElementObserver => {
                let size = self.surface.client_size();
                self.detector
                    .borrow_mut()
                    .listen_to(self.state.container, size);
            }
        }
    }

    fn deregister_resize(&mut self) {
        match self.strategy {
            ResizeStrategy::Manual => {}
            ResizeStrategy::Window => self.window_armed = false,
            ResizeStrategy::ElementObserver => self
                .detector
                .borrow_mut()
                .remove_all_listeners(self.state.container),
        }
    }

    fn detach_click(&mut self) {
        if let Some(id) = self.click_listener.take() {
            self.surface.unlisten(id);
        }
    }
}

impl<S: Surface> Drop for Ellipsis<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

// Search the longest fitting prefix and render the result.
fn search_and_render<S: Surface>(
    surface: &mut S,
    canonical: &Fragment,
    state: &TruncationState,
    enabled: bool,
) -> PassReport {
    let mut renders = 1;
    surface.render(canonical);
    if !is_overflowing(surface) {
        return PassReport {
            truncated_at: None,
            overflowing: false,
            renders,
        };
    }

    // The full text is known to overflow.
    let max = state.original_text_len.saturating_sub(1);
    let best = find_max_fitting_length(max, |n| {
        let (candidate, _) = truncated_copy(canonical, state, n);
        surface.render(&candidate);
        renders += 1;
        !is_overflowing(surface)
    });
    if best.is_none() {
        log::debug!(
            target: "truncate.search",
            "no length fits {:?}; cutting to zero",
            state.container
        );
    }

    if !enabled {
        surface.render(canonical);
        return PassReport {
            truncated_at: None,
            overflowing: true,
            renders: renders + 1,
        };
    }

    let (tree, cut) = truncated_copy(canonical, state, best.unwrap_or(0));
    surface.render(&tree);
    PassReport {
        truncated_at: cut.map(|c| c.retained),
        overflowing: true,
        renders: renders + 1,
    }
}
