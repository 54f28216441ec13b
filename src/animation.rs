/*
 * Animation Module
 *
 * This module drives an animation: a dedicated thread ticks at a target
 * frame rate, runs the update hook against the body set, and hands an
 * immutable snapshot of the bodies to the render hook on a separate
 * presenter thread.
 *
 * State machine:
 * - Stopped -> Running   start()
 * - Running -> Paused    pause()
 * - Paused  -> Running   resume()
 * - any     -> Stopped   stop()
 *
 * Pause/resume/stop are coordinated with one mutex and one condition
 * variable. The drive loop holds the lock only while checking state or
 * waiting, never while the hooks run. A hook that panics ends the loop and
 * leaves the animation Stopped, ready to be started again.
 *
 * Rendering is fire-and-forget through a channel holding one frame, so a
 * render may lag the physics by a frame. A render hook that blocks for
 * good will eventually block the drive loop as well; no timeout is imposed
 * on either hook.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::body::{Body, BodySnapshot};
use crate::clock::FrameClock;
use crate::error::{MoverError, MoverResult};

pub const DEFAULT_TARGET_FPS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Running,
    Paused,
}

// Something that can be started, stopped, paused and resumed
pub trait Animated {
    fn start(&self) -> MoverResult<()>;
    fn stop(&self);
    fn pause(&self);
    fn resume(&self);
    fn state(&self) -> AnimationState;
}

// Per-tick hook that mutates the body set (forces, integration, edges)
pub trait Updater: Send + 'static {
    fn update(&mut self, bodies: &mut [Body]);
}

// Per-tick hook that presents a frame
pub trait Renderer: Send + 'static {
    fn render(&mut self, frame: &Frame);
}

impl<F> Updater for F
where
    F: FnMut(&mut [Body]) + Send + 'static,
{
    fn update(&mut self, bodies: &mut [Body]) {
        self(bodies)
    }
}

impl<F> Renderer for F
where
    F: FnMut(&Frame) + Send + 'static,
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

// Leaves the bodies untouched every tick
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUpdate;

impl Updater for NoUpdate {
    fn update(&mut self, _bodies: &mut [Body]) {}
}

// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl Renderer for NoRender {
    fn render(&mut self, _frame: &Frame) {}
}

// Immutable snapshot handed to the renderer
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub fps: f32,
    pub bodies: Arc<[BodySnapshot]>,
}

// Sleep between ticks for a target rate (whole milliseconds, truncated)
pub fn frame_interval_for(target_fps: u32) -> MoverResult<Duration> {
    if target_fps == 0 {
        return Err(MoverError::InvalidTargetFps(target_fps));
    }
    Ok(Duration::from_millis(1000 / u64::from(target_fps)))
}

struct Control {
    state: AnimationState,
    target_fps: u32,
    frame_interval: Duration,
    // Bumped on every start so a loop from an earlier run can never resume
    generation: u64,
}

struct Shared<U, R> {
    control: Mutex<Control>,
    signal: Condvar,
    bodies: Mutex<Vec<Body>>,
    updater: Mutex<U>,
    renderer: Mutex<R>,
    clock: Mutex<FrameClock>,
    frames: AtomicU64,
}

struct Workers {
    drive: JoinHandle<()>,
    presenter: JoinHandle<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct AnimationController<U: Updater = NoUpdate, R: Renderer = NoRender> {
    shared: Arc<Shared<U, R>>,
    workers: Mutex<Option<Workers>>,
}

impl<U: Updater, R: Renderer> AnimationController<U, R> {
    pub fn new(target_fps: u32, bodies: Vec<Body>, updater: U, renderer: R) -> MoverResult<Self> {
        let frame_interval = frame_interval_for(target_fps)?;

        Ok(Self {
            shared: Arc::new(Shared {
                control: Mutex::new(Control {
                    state: AnimationState::Stopped,
                    target_fps,
                    frame_interval,
                    generation: 0,
                }),
                signal: Condvar::new(),
                bodies: Mutex::new(bodies),
                updater: Mutex::new(updater),
                renderer: Mutex::new(renderer),
                clock: Mutex::new(FrameClock::new()),
                frames: AtomicU64::new(0),
            }),
            workers: Mutex::new(None),
        })
    }

    // Change the pacing; takes effect from the next sleep
    pub fn set_target_fps(&self, target_fps: u32) -> MoverResult<()> {
        let frame_interval = frame_interval_for(target_fps)?;
        let mut control = lock(&self.shared.control);
        control.target_fps = target_fps;
        control.frame_interval = frame_interval;
        debug!(target_fps, interval_ms = frame_interval.as_millis() as u64, "target fps changed");
        Ok(())
    }

    pub fn target_fps(&self) -> u32 {
        lock(&self.shared.control).target_fps
    }

    pub fn frame_interval(&self) -> Duration {
        lock(&self.shared.control).frame_interval
    }

    // Most recent once-per-second estimate; zero until the first window closes
    pub fn fps(&self) -> f32 {
        lock(&self.shared.clock).fps()
    }

    // Frames dispatched to the renderer since construction
    pub fn frames_rendered(&self) -> u64 {
        self.shared.frames.load(Ordering::Relaxed)
    }

    pub fn bodies(&self) -> Vec<BodySnapshot> {
        lock(&self.shared.bodies).iter().map(Body::snapshot).collect()
    }

    // Locked access to the body set between ticks. Must not be called from
    // inside the update hook.
    pub fn with_bodies<T>(&self, f: impl FnOnce(&mut Vec<Body>) -> T) -> T {
        f(&mut lock(&self.shared.bodies))
    }

    fn spawn_workers(&self, generation: u64) -> MoverResult<Workers> {
        let (sender, receiver) = mpsc::sync_channel(1);

        let shared = Arc::clone(&self.shared);
        let presenter = thread::Builder::new()
            .name("movers-presenter".into())
            .spawn(move || present(shared, receiver))?;

        let shared = Arc::clone(&self.shared);
        let drive = thread::Builder::new()
            .name("movers-drive".into())
            .spawn(move || drive(shared, generation, sender));

        match drive {
            Ok(drive) => Ok(Workers { drive, presenter }),
            Err(err) => {
                // The sender died with the closure, so the presenter exits on its own
                join_worker(presenter, "presenter");
                Err(err.into())
            }
        }
    }
}

impl<U: Updater, R: Renderer> Animated for AnimationController<U, R> {
    fn start(&self) -> MoverResult<()> {
        let mut workers = lock(&self.workers);

        let generation = {
            let mut control = lock(&self.shared.control);
            if control.state != AnimationState::Stopped {
                trace!(state = ?control.state, "start ignored");
                return Ok(());
            }
            control.generation += 1;
            control.state = AnimationState::Running;
            control.generation
        };

        // A previous run stopped from one of its own hooks is still around here.
        // Restarting from inside that hook cannot join the thread we are on.
        if let Some(previous) = workers.take() {
            if previous.is_current() {
                debug!("restarted from a hook, detaching previous workers");
            } else {
                previous.join();
            }
        }

        lock(&self.shared.clock).restart_at(Instant::now());

        match self.spawn_workers(generation) {
            Ok(spawned) => {
                *workers = Some(spawned);
                info!(target_fps = self.target_fps(), "animation started");
                Ok(())
            }
            Err(err) => {
                lock(&self.shared.control).state = AnimationState::Stopped;
                warn!(%err, "animation failed to start");
                Err(err)
            }
        }
    }

    fn stop(&self) {
        {
            let mut control = lock(&self.shared.control);
            if control.state == AnimationState::Stopped {
                trace!("stop ignored");
            } else {
                control.state = AnimationState::Stopped;
                // A paused loop only notices the stop when woken
                self.shared.signal.notify_all();
                info!("animation stopped");
            }
        }

        let mut workers = lock(&self.workers);
        // Joining from a hook would wait on ourselves; start() reaps it later
        if workers.as_ref().is_some_and(Workers::is_current) {
            return;
        }
        let finished = workers.take();
        drop(workers);
        if let Some(finished) = finished {
            finished.join();
        }
    }

    fn pause(&self) {
        let mut control = lock(&self.shared.control);
        if control.state != AnimationState::Running {
            trace!(state = ?control.state, "pause ignored");
            return;
        }
        control.state = AnimationState::Paused;
        info!("animation paused");
    }

    fn resume(&self) {
        let mut control = lock(&self.shared.control);
        if control.state != AnimationState::Paused {
            trace!(state = ?control.state, "resume ignored");
            return;
        }
        control.state = AnimationState::Running;
        // Paused time must not count against the next rate estimate
        lock(&self.shared.clock).restart_at(Instant::now());
        self.shared.signal.notify_all();
        info!("animation resumed");
    }

    fn state(&self) -> AnimationState {
        lock(&self.shared.control).state
    }
}

impl<U: Updater, R: Renderer> Drop for AnimationController<U, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Workers {
    fn is_current(&self) -> bool {
        let current = thread::current().id();
        self.drive.thread().id() == current || self.presenter.thread().id() == current
    }

    fn join(self) {
        join_worker(self.drive, "drive");
        join_worker(self.presenter, "presenter");
    }
}

fn join_worker(handle: JoinHandle<()>, name: &str) {
    if handle.join().is_err() {
        warn!(worker = name, "animation thread panicked");
    }
}

// Marks the animation stopped when its drive loop ends for any reason other
// than stop(), including a panicking hook unwinding the thread
struct LoopExit<'a, U, R> {
    shared: &'a Shared<U, R>,
    generation: u64,
}

impl<U, R> Drop for LoopExit<'_, U, R> {
    fn drop(&mut self) {
        let mut control = lock(&self.shared.control);
        if control.generation != self.generation || control.state == AnimationState::Stopped {
            return;
        }
        control.state = AnimationState::Stopped;
        self.shared.signal.notify_all();
        if thread::panicking() {
            warn!(generation = self.generation, "animation hook panicked, animation stopped");
        } else {
            warn!(generation = self.generation, "drive loop ended, animation stopped");
        }
    }
}

fn drive<U: Updater, R: Renderer>(shared: Arc<Shared<U, R>>, generation: u64, frames: SyncSender<Frame>) {
    debug!(generation, "drive loop started");
    let _exit = LoopExit {
        shared: &shared,
        generation,
    };

    loop {
        let Ok(control) = shared.control.lock() else {
            warn!("animation control lock poisoned, stopping");
            break;
        };

        let waited = if control.state == AnimationState::Paused {
            shared
                .signal
                .wait_while(control, |c| c.generation == generation && c.state == AnimationState::Paused)
        } else {
            // Pacing sleep; the lock is released while waiting
            let interval = control.frame_interval;
            shared
                .signal
                .wait_timeout_while(control, interval, |c| {
                    c.generation == generation && c.state == AnimationState::Running
                })
                .map(|(guard, _)| guard)
                .map_err(|poisoned| PoisonError::new(poisoned.into_inner().0))
        };

        let Ok(control) = waited else {
            warn!("animation wait interrupted, stopping");
            break;
        };

        if control.generation != generation || control.state == AnimationState::Stopped {
            break;
        }
        if control.state == AnimationState::Paused {
            continue;
        }
        drop(control);

        if tick(&shared, &frames).is_err() {
            warn!("presenter went away, stopping");
            break;
        }
    }

    debug!(generation, "drive loop exited");
}

fn tick<U: Updater, R: Renderer>(
    shared: &Shared<U, R>,
    frames: &SyncSender<Frame>,
) -> Result<(), mpsc::SendError<Frame>> {
    let bodies: Arc<[BodySnapshot]> = {
        let mut bodies = lock(&shared.bodies);
        lock(&shared.updater).update(&mut bodies);
        bodies.iter().map(Body::snapshot).collect()
    };

    let fps = {
        let mut clock = lock(&shared.clock);
        if let Some(fps) = clock.tick() {
            debug!(fps, "fps window closed");
        }
        clock.fps()
    };

    let index = shared.frames.fetch_add(1, Ordering::Relaxed);
    frames.send(Frame { index, fps, bodies })
}

fn present<U: Updater, R: Renderer>(shared: Arc<Shared<U, R>>, frames: Receiver<Frame>) {
    for frame in frames {
        lock(&shared.renderer).render(&frame);
    }
    trace!("presenter exited");
}
