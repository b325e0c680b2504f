//! The reactivity driver (C8, spec §4.8): decides when to rerun the
//! render root, then owns reconciliation, command application, and error
//! recovery (spec §7 — "the driver ... owns recovery").

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures_util::future::FutureExt;
use futures_util::stream::StreamExt;

use vapor_core::{
    apply_commands, full_replace, reconcile, CommandApplier, DiagnosticEvent, Diagnostics,
    EngineError, EventValue, HandleTable, HandlerBinding, Tree,
};

use crate::active::DriverHandle;
use crate::mode::ReactivityMode;

/// One entry in the FIFO event queue (spec §5 "events are dispatched in
/// FIFO order"). The driver only ever needs to know *that* an event
/// happened — the handler itself already ran by the time it's queued;
/// what's queued is the *decision* to run another pass, so repeated
/// entries coalesce into the single additional pass spec §4.8 describes.
struct QueuedCycle;

/// Drives render passes for one render root. Generic over the host's
/// [`CommandApplier`] so the same driver logic serves any adapter
/// (`vapor-host`'s `RecordingApplier`, a DOM applier, a native one).
pub struct Driver<A: CommandApplier> {
    mode: ReactivityMode,
    render_root: RefCell<Rc<dyn Fn()>>,
    applier: RefCell<A>,
    handles: RefCell<HandleTable<A::Handle>>,
    retained: RefCell<Tree>,
    /// The frame arena a render pass's transient allocations come out of
    /// (spec.md:36's per-tick pipeline step "... host applier mutates
    /// surface → frame arena reset"). Reset at the end of every pass, not
    /// just a successful one — whatever a render root or the lifecycle
    /// stack allocated out of it before an abort is just as stale.
    frame_arena: &'static vapor_arena::Arena,
    /// Marked by a host-apply failure (spec §7 kind 5): the *next* pass
    /// must fall back to a full replace rather than trust the diff.
    inconsistent: Cell<bool>,
    running: Cell<bool>,
    queue_tx: UnboundedSender<QueuedCycle>,
    queue_rx: RefCell<UnboundedReceiver<QueuedCycle>>,
    diagnostics: Rc<dyn Diagnostics>,
}

impl<A: CommandApplier> Driver<A> {
    pub fn new(
        mode: ReactivityMode,
        applier: A,
        render_root: impl Fn() + 'static,
        diagnostics: Rc<dyn Diagnostics>,
        frame_arena: &'static vapor_arena::Arena,
    ) -> Rc<Self> {
        let (queue_tx, queue_rx) = mpsc::unbounded();
        Rc::new(Self {
            mode,
            render_root: RefCell::new(Rc::new(render_root)),
            applier: RefCell::new(applier),
            handles: RefCell::new(HandleTable::default()),
            retained: RefCell::new(Tree::new()),
            frame_arena,
            inconsistent: Cell::new(false),
            running: Cell::new(false),
            queue_tx,
            queue_rx: RefCell::new(queue_rx),
            diagnostics,
        })
    }

    pub fn mode(&self) -> ReactivityMode {
        self.mode
    }

    /// Force the *next* pass to discard the retained tree and emit a full
    /// replace rather than trust the diff, regardless of what reconciling
    /// would otherwise produce. Shares the same recovery flag a host-apply
    /// failure sets (spec §7 kind 5); a route change (spec §4.9: "the
    /// retained tree is discarded and the next pass is a full add") is
    /// just another trigger for it.
    pub fn force_full_replace(&self) {
        self.inconsistent.set(true);
    }

    /// Force a render pass now (the `cycle()` of spec §6). Re-entrant
    /// calls — a signal written from inside the render root, or from an
    /// event handler invoked mid-pass — queue instead of nesting, and the
    /// queue drains to exactly one more pass once the current one
    /// commits (spec §4.8, §5 cancellation).
    pub fn cycle(&self) {
        if self.running.get() {
            let _ = self.queue_tx.unbounded_send(QueuedCycle);
            return;
        }
        self.run_pass();
        // Any number of re-entrant `cycle()` calls queued while that pass
        // was in flight collapse into exactly one more pass here, not one
        // pass per queued entry (spec §4.8/§5, §8 scenario 6).
        while self.drain_queue() {
            self.run_pass();
        }
    }

    /// Drain every currently-queued cycle request. Returns whether there
    /// was at least one, so the caller runs a single coalesced pass for
    /// however many were queued.
    fn drain_queue(&self) -> bool {
        let mut any = false;
        while self.try_take_queued() {
            any = true;
        }
        any
    }

    /// Run `handler` against `value`, swallowing a panic as spec §7 kind
    /// 6 ("handler exception ... no render pass is forced"), then — in
    /// [`ReactivityMode::Atomic`] only — rerun exactly once.
    pub fn dispatch_event(&self, handler: &HandlerBinding, value: &EventValue) {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.dispatch(value)));
        if outcome.is_err() {
            self.diagnostics.report(DiagnosticEvent {
                kind: "handler_exception",
                node: None,
                message: "event handler panicked during dispatch".to_string(),
            });
            return;
        }
        if self.mode == ReactivityMode::Atomic {
            self.cycle();
        }
    }

    /// One displayable frame tick. Only [`ReactivityMode::Immediate`]
    /// reruns here; the other modes ignore it.
    pub fn tick(&self) {
        if self.mode == ReactivityMode::Immediate {
            self.cycle();
        }
    }

    fn try_take_queued(&self) -> bool {
        self.queue_rx.borrow_mut().next().now_or_never().flatten().is_some()
    }

    fn run_pass(&self) {
        self.running.set(true);
        let span = tracing::info_span!("render_pass");
        let _enter = span.enter();

        vapor_core::begin_pass();
        // A builder call that hits a recoverable error (alloc exhausted,
        // lifecycle imbalance) surfaces it as `Result<_, EngineError>`; most
        // render roots `.unwrap()`/`.expect()` it rather than thread a
        // `Result` back out through `Fn()`. That turns the error into a
        // panic here, which we must catch: spec §7 requires the pass to
        // abort cleanly with the retained tree untouched, not take the
        // process down, and `begin_pass`'s thread-local would otherwise
        // stay poisoned for every pass after this one.
        let render_outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            (self.render_root.borrow_mut())()
        }));
        if render_outcome.is_err() {
            vapor_core::discard_pass();
            self.running.set(false);
            self.frame_arena.reset();
            let message = panic_message(render_outcome.unwrap_err());
            tracing::warn!(message = %message, "render pass aborted mid-construction");
            self.diagnostics.report(DiagnosticEvent {
                kind: "allocation_exhausted",
                node: None,
                message,
            });
            return;
        }
        let pass_result = vapor_core::end_pass();
        self.running.set(false);

        let (new_tree, collisions) = match pass_result {
            Ok(pair) => pair,
            Err(err) => {
                self.frame_arena.reset();
                let err = EngineError::from(err);
                tracing::warn!(error = %err, "render pass discarded");
                self.diagnostics.report(DiagnosticEvent::from_error(&err, None));
                return;
            }
        };

        for id in collisions {
            self.diagnostics.report(DiagnosticEvent {
                kind: "identity_collision_unresolved",
                node: Some(id),
                message: "sibling collision disambiguated positionally".to_string(),
            });
        }

        let commands = {
            let retained = self.retained.borrow();
            let diffed = if self.inconsistent.get() {
                Ok(full_replace(&new_tree, &retained))
            } else {
                reconcile(&new_tree, &retained)
            };
            match diffed {
                Ok(commands) => commands,
                Err(err) => {
                    self.diagnostics.report(DiagnosticEvent::from_error(&err, None));
                    full_replace(&new_tree, &retained)
                }
            }
        };

        let apply_result = {
            let mut applier = self.applier.borrow_mut();
            let mut handles = self.handles.borrow_mut();
            let span = tracing::info_span!("reconcile");
            let _enter = span.enter();
            apply_commands(&mut *applier, &commands, &mut handles)
        };

        self.inconsistent.set(apply_result.is_err());
        if let Err(err) = apply_result {
            self.diagnostics.report(DiagnosticEvent::from_error(&err, None));
        }
        *self.retained.borrow_mut() = new_tree;
        self.frame_arena.reset();
    }
}

/// Best-effort message extraction from a caught panic payload, for the
/// diagnostic report spec §8 scenario 4 expects.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "render pass panicked during tree construction".to_string()
    }
}

impl<A: CommandApplier> DriverHandle for Driver<A> {
    fn notify(&self) {
        if self.mode == ReactivityMode::Retained {
            self.cycle();
        }
    }
}
