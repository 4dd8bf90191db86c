//=========================================================================
// Runtime
//
// Composition root and coordinator for the dispatch service.
//
// Architecture:
// ```text
//     RuntimeBuilder ──build()──> Runtime ──run()──> [FrameHost loop]
//         │                         │
//         ├─ with_tps()             ├─ service()    (shared handle clones)
//         └─ with_channel_capacity()└─ controller() (cross-thread control)
// ```
//
// The runtime constructs exactly one UpdaterService for the session and
// hands out clones; run() blocks on the calling thread driving the host
// loop, and tears the service down once on exit.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::UpdaterService;
use crate::host::frame_host::FrameHost;
use crate::host::{HostCommand, HostController};

//=== RuntimeBuilder ======================================================

/// Builder for configuring and constructing a [`Runtime`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (frames per second of the host loop)
/// - **Channel capacity**: 32 commands
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use framepulse::RuntimeBuilder;
///
/// let runtime = RuntimeBuilder::new().build();
/// let controller = runtime.controller();
/// runtime.run(); // blocks until controller.shutdown() or controller drop
/// # drop(controller);
/// ```
///
/// Advanced configuration:
/// ```no_run
/// # use framepulse::RuntimeBuilder;
/// let runtime = RuntimeBuilder::new()
///     .with_tps(120.0)             // high refresh rate
///     .with_channel_capacity(64)   // extra command buffering
///     .build();
/// ```
pub struct RuntimeBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 32,
        }
    }

    /// Sets the target frames per second for the host loop.
    ///
    /// Each frame runs the three phases once, so this is also the fixed
    /// phase's step rate.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the controller → host command channel.
    ///
    /// Commands are rare (pause, resume, shutdown), so the default is
    /// generous; a full channel briefly blocks the sending controller
    /// until the host drains it.
    ///
    /// Default: 32
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the runtime instance.
    ///
    /// Constructs the session's single [`UpdaterService`] and the control
    /// channel. Call [`Runtime::init`] to register listeners before
    /// running, or grab handles via [`Runtime::service`].
    pub fn build(self) -> Runtime {
        info!(
            "Building runtime (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        let (command_tx, command_rx): (Sender<HostCommand>, Receiver<HostCommand>) =
            bounded(self.channel_capacity);

        Runtime {
            service: UpdaterService::new(),
            command_tx,
            command_rx,
            tps: self.tps,
        }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Runtime =============================================================

/// Session runtime for the frame lifecycle dispatch service.
///
/// Owns the single shared [`UpdaterService`] and the host loop that
/// drives it. Create via [`RuntimeBuilder`].
///
/// # Lifecycle
///
/// 1. `build()` constructs the service and control channel
/// 2. `init()` / `service()` register listeners through handle clones
/// 3. `controller()` hands out cross-thread control handles
/// 4. `run()` blocks, forwarding frames at the configured TPS
/// 5. On shutdown (command or every controller dropped) the service is
///    cleared exactly once and `run()` returns
///
/// # Examples
///
/// ```no_run
/// use framepulse::prelude::*;
///
/// let runtime = RuntimeBuilder::new().with_tps(120.0).build();
/// let controller = runtime.controller();
///
/// // e.g. wire a UI thread: pause/resume/shutdown from anywhere.
/// std::thread::spawn(move || {
///     controller.pause().ok();
///     controller.resume().ok();
///     controller.shutdown().ok();
/// });
///
/// runtime
///     .init(|service| {
///         service.subscribe(callback(|| { /* physics step */ }), UpdatePhase::Fixed);
///         service.subscribe(callback(|| { /* frame logic */ }), UpdatePhase::Update);
///         service.subscribe(callback(|| { /* cleanup pass */ }), UpdatePhase::Late);
///     })
///     .run();
/// ```
pub struct Runtime {
    service: UpdaterService,
    command_tx: Sender<HostCommand>,
    command_rx: Receiver<HostCommand>,
    tps: f64,
}

impl Runtime {
    //--- Initialization ---------------------------------------------------

    /// Registers listeners before the run loop starts.
    ///
    /// Hands the session's shared service to the closure; subscribe the
    /// session-long listeners here. Listeners that come and go later keep
    /// their own handle clones from [`Runtime::service`] instead.
    pub fn init<F>(self, init_fn: F) -> Self
    where
        F: FnOnce(&UpdaterService),
    {
        info!("Initializing listeners");

        init_fn(&self.service);

        info!(
            "Listener initialization complete ({} registered)",
            self.service.total_callbacks()
        );
        self
    }

    //--- Handles ----------------------------------------------------------

    /// Returns a clone of the session's shared service handle.
    ///
    /// All clones refer to the same registry. Handles are not `Send`;
    /// they stay on the thread that runs the loop.
    pub fn service(&self) -> UpdaterService {
        self.service.clone()
    }

    /// Returns a cross-thread controller for the host loop.
    ///
    /// Obtain controllers before calling [`Runtime::run`]. The loop shuts
    /// down when a controller sends shutdown, or when every controller
    /// (including clones) has been dropped; hold one for as long as the
    /// host should keep running.
    pub fn controller(&self) -> HostController {
        HostController::new(self.command_tx.clone())
    }

    //--- Execution --------------------------------------------------------

    /// Starts the host loop and blocks until shutdown.
    ///
    /// # Lifecycle
    ///
    /// 1. Drops the runtime's own command sender, so controller drops are
    ///    observable as channel disconnect
    /// 2. Ticks the host loop at the configured TPS: drain commands, then
    ///    fixed → update → late
    /// 3. On exit, clears the service's subscriptions exactly once
    ///
    /// Runs on the calling thread; every callback is invoked here.
    pub fn run(self) {
        info!("Starting host runtime (TPS: {})", self.tps);

        let Runtime {
            service,
            command_tx,
            command_rx,
            tps,
        } = self;

        // From here on, only controllers hold senders.
        drop(command_tx);

        let host = FrameHost::new(service, command_rx, tps);
        host.run();

        info!("Runtime shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
