// src/renderer/actor.rs
//! RenderActor - Dedicated thread applying commands to a `RenderState`.
//!
//! Producers push [`Command`]s into a shared [`CommandQueue`]; the render
//! thread pops them in FIFO order and applies them one at a time.
//!
//! Threading model:
//! - Owns: `RenderState` (matrices, viewport, colors, buffer handle)
//! - Any number of producers, exactly one consumer
//! - The queue is unbounded; submitting never blocks
//! - `drain()` waits until the queue is empty *and* no command is in flight
//! - `Terminate` discards whatever is still queued and ends the thread

use super::{Command, Flow, RenderState};
use anyhow::{Context, Result};
use log::*;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// Name given to the render thread unless configured otherwise.
pub const DEFAULT_THREAD_NAME: &str = "derplot-render";

#[derive(Debug, Default)]
struct QueueState {
    commands: VecDeque<Command>,
    in_flight: bool,
    terminated: bool,
    exited: bool,
}

impl QueueState {
    fn is_idle(&self) -> bool {
        self.terminated || (self.commands.is_empty() && !self.in_flight)
    }
}

/// FIFO command queue shared by the producers and the render thread.
#[derive(Debug, Default)]
pub struct CommandQueue {
    state: Mutex<QueueState>,
    has_work: Condvar,
    idle: Condvar,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `command`. Returns `false`, dropping the command, once the
    /// queue has been terminated.
    pub fn push(&self, command: Command) -> bool {
        let mut state = self.lock();
        if state.terminated {
            trace!("CommandQueue: dropping {} after termination", command.name());
            return false;
        }
        state.commands.push_back(command);
        self.has_work.notify_one();
        true
    }

    /// Blocks until a command is available and marks it in flight. Returns
    /// `None` once the queue is terminated.
    fn pop(&self) -> Option<Command> {
        let mut state = self.lock();
        loop {
            if state.terminated {
                return None;
            }
            if let Some(command) = state.commands.pop_front() {
                state.in_flight = true;
                return Some(command);
            }
            state = self.has_work.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Marks the in-flight command as done and wakes drain waiters if the
    /// queue ran dry.
    fn complete(&self, flow: Flow) {
        let mut state = self.lock();
        state.in_flight = false;
        if flow == Flow::Terminate {
            let discarded = state.commands.len();
            state.commands.clear();
            state.terminated = true;
            if discarded > 0 {
                debug!("CommandQueue: discarded {} queued commands at termination", discarded);
            }
        }
        if state.is_idle() {
            self.idle.notify_all();
        }
    }

    /// Terminates the queue without a `Terminate` command, discarding
    /// everything queued, and records that the render thread is gone.
    fn close(&self) {
        let mut state = self.lock();
        state.commands.clear();
        state.in_flight = false;
        state.terminated = true;
        state.exited = true;
        self.idle.notify_all();
        self.has_work.notify_all();
    }

    /// Blocks until no command is queued or in flight (or the queue is
    /// terminated).
    pub fn wait_idle(&self) {
        let mut state = self.lock();
        while !state.is_idle() {
            state = self.idle.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Blocks until the render thread has exited and dropped its state.
    fn wait_exited(&self) {
        let mut state = self.lock();
        while !state.exited {
            state = self.idle.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.lock().terminated
    }

    /// Number of commands waiting to be applied, excluding the in-flight one.
    pub fn pending(&self) -> usize {
        self.lock().commands.len()
    }
}

/// Closes the queue when the render thread exits, including by unwinding, so
/// nobody blocks forever on a dead thread. Dropped after the actor, so the
/// render state is gone by the time waiters wake.
struct CloseOnExit(Arc<CommandQueue>);

impl Drop for CloseOnExit {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// RenderActor state (runs on dedicated thread)
struct RenderActor {
    state: RenderState,
    queue: Arc<CommandQueue>,
}

impl RenderActor {
    fn new(state: RenderState, queue: Arc<CommandQueue>) -> Self {
        Self { state, queue }
    }

    /// Run the render loop: pop, apply, report completion
    fn run(mut self) {
        info!("RenderActor: Thread started");
        self.state.bind_to_current_thread();

        while let Some(command) = self.queue.pop() {
            trace!("RenderActor: Applying {}", command.name());
            let flow = self.state.apply(command);
            self.queue.complete(flow);
            if flow == Flow::Terminate {
                info!("RenderActor: Terminate received, exiting");
                break;
            }
        }

        info!("RenderActor: Thread stopped");
    }
}

/// Handle to a running render thread.
///
/// Dropping the dispatcher shuts the thread down.
#[derive(Debug)]
pub struct Dispatcher {
    queue: Arc<CommandQueue>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    /// Spawns a render thread named `thread_name` that owns `state`.
    pub fn spawn(state: RenderState, thread_name: &str) -> Result<Self> {
        let queue = Arc::new(CommandQueue::new());
        let actor = RenderActor::new(state, Arc::clone(&queue));
        let close = CloseOnExit(Arc::clone(&queue));

        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || {
                let _close = close;
                actor.run();
            })
            .context("Failed to spawn render thread")?;

        info!("Dispatcher: Render thread '{}' spawned", thread_name);

        Ok(Self {
            queue,
            thread: Mutex::new(Some(handle)),
        })
    }

    /// Queues `command` without blocking. Ignored once shut down.
    pub fn submit(&self, command: Command) {
        self.queue.push(command);
    }

    /// Blocks until every command submitted so far has been applied.
    ///
    /// This is a snapshot: commands submitted concurrently by other producers
    /// may or may not be covered.
    pub fn drain(&self) {
        self.queue.wait_idle();
    }

    /// Queues a `Terminate` marker and blocks until the render thread has
    /// exited. Commands queued behind the marker are discarded; the command
    /// being applied at the time finishes first.
    pub fn shutdown(&self) {
        self.queue.push(Command::Terminate);

        let handle = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match handle {
            Some(handle) => {
                if handle.join().is_err() {
                    error!("Dispatcher: Render thread panicked");
                }
            }
            // Another caller is already joining; wait for the thread to exit.
            None => self.queue.wait_exited(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.queue.is_terminated()
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::color::Color;
    use crate::renderer::{PixelPos, PointSize};
    use std::sync::mpsc;
    use std::time::Duration;
    use test_log::test;

    fn spawn(width: u32, height: u32) -> (Dispatcher, crate::buffer::SharedBuffer) {
        let buffer = PixelBuffer::new(width, height).into_shared();
        let state = RenderState::new(Arc::clone(&buffer));
        (Dispatcher::spawn(state, "test-render").unwrap(), buffer)
    }

    #[test]
    fn drain_on_empty_queue_returns_immediately() {
        let (dispatcher, _) = spawn(2, 2);
        dispatcher.drain();
        dispatcher.drain();
        assert!(dispatcher.is_running());
    }

    #[test]
    fn drain_waits_for_in_flight_command() {
        let (dispatcher, buffer) = spawn(64, 64);
        for i in 0..200 {
            dispatcher.submit(Command::SetFrontColor(Color(i)));
            dispatcher.submit(Command::DrawRawLine {
                from: PixelPos::new(0, 0),
                to: PixelPos::new(63, 63),
            });
        }
        dispatcher.drain();
        assert_eq!(dispatcher.queue().pending(), 0);
        assert_eq!(buffer.lock().unwrap().get(63, 63), Some(Color(199)));
    }

    #[test]
    fn submit_after_shutdown_is_ignored() {
        let (dispatcher, buffer) = spawn(2, 2);
        dispatcher.shutdown();
        assert!(!dispatcher.is_running());

        dispatcher.submit(Command::PlotRawPoint {
            at: PixelPos::new(0, 0),
            size: PointSize::Normal,
        });
        dispatcher.drain();
        dispatcher.shutdown();
        assert_eq!(buffer.lock().unwrap().get(0, 0), Some(Color(0)));
    }

    #[test]
    fn report_reflects_commands_before_it() {
        let (dispatcher, _) = spawn(2, 2);
        let (tx, rx) = mpsc::channel();
        dispatcher.submit(Command::SetClearColor(Color::RED));
        dispatcher.submit(Command::Report(tx));
        let report = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(report.clear_color, Color::RED);
    }

    #[test]
    fn commands_behind_terminate_are_discarded() {
        let queue = CommandQueue::new();
        queue.push(Command::Clear);
        queue.push(Command::Terminate);
        queue.push(Command::Clear);

        assert!(matches!(queue.pop(), Some(Command::Clear)));
        queue.complete(Flow::Continue);
        assert!(matches!(queue.pop(), Some(Command::Terminate)));
        queue.complete(Flow::Terminate);

        assert!(queue.is_terminated());
        assert_eq!(queue.pending(), 0);
        assert!(queue.pop().is_none());
        assert!(!queue.push(Command::Clear));
        queue.wait_idle();
    }

    #[test]
    fn concurrent_shutdown_calls_wait_for_thread_exit() {
        let (dispatcher, buffer) = spawn(8, 8);
        let dispatcher = Arc::new(dispatcher);
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let dispatcher = Arc::clone(&dispatcher);
                let buffer = Arc::downgrade(&buffer);
                thread::spawn(move || {
                    dispatcher.shutdown();
                    // Only the test's own handle is left once the state is dropped.
                    assert_eq!(buffer.strong_count(), 1);
                })
            })
            .collect();
        for waiter in waiters {
            waiter.join().unwrap();
        }
        assert!(!dispatcher.is_running());
    }
}
