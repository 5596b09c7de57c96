use crate::scheduler::Scheduler;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};
use vitals_buzzer::{Buzzer, ToneOutput};
use vitals_config::{load as load_config, VitalsConfig};
use vitals_control::Command;
use vitals_core::{Message, Panel, Result, SignalKind, VitalsState};
use vitals_renderer::{Frame, TraceScale, Viewport};
use vitals_waveform::SignalController;
use vitals_widgets::on_off;

type ToneBox = Box<dyn ToneOutput + Send>;

/// Whether the event loop should keep going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One live signal: its controller plus how the renderer should scale it.
#[derive(Debug)]
struct Channel {
    controller: SignalController,
    trace:      TraceScale,
}

/// Owns every piece of mutable dashboard state and applies messages to it.
///
/// All mutation happens on the caller's thread, one message at a time.
pub struct Monitor {
    config:      VitalsConfig,
    config_path: PathBuf,
    channels:    BTreeMap<SignalKind, Channel>,
    scheduler:   Scheduler,
    state:       VitalsState,
    buzzer:      Buzzer<ToneBox>,
    panels:      Vec<Box<dyn Panel>>,
    viewport:    Viewport,
    sink:        Box<dyn Write + Send>,
}

impl Monitor {
    /// Build controllers and timers for every enabled signal, starting at `now`.
    pub fn new(config: VitalsConfig, config_path: PathBuf, now: Instant) -> Result<Self> {
        let output = vitals_buzzer::from_config(&config.buzzer);
        Self::with_output(config, config_path, output, now)
    }

    /// Same as [`Monitor::new`] with an explicit tone backend.
    pub fn with_output(
        config: VitalsConfig,
        config_path: PathBuf,
        output: ToneBox,
        now: Instant,
    ) -> Result<Self> {
        let channels = build_channels(&config)?;
        let buzzer = Buzzer::new(output, &config.buzzer);

        let mut monitor = Self {
            viewport:  Viewport::from_config(&config.render),
            panels:    vitals_widgets::dashboard(channels.keys().copied()),
            scheduler: Scheduler::new(),
            state:     VitalsState::default(),
            sink:      Box::new(std::io::stdout()),
            config,
            config_path,
            channels,
            buzzer,
        };
        monitor.arm(now);
        Ok(monitor)
    }

    /// Send frames somewhere other than stdout.
    #[must_use]
    pub fn with_frame_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> &VitalsState {
        &self.state
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn buzzer(&self) -> &Buzzer<ToneBox> {
        &self.buzzer
    }

    pub fn controller(&self, kind: SignalKind) -> Option<&SignalController> {
        self.channels.get(&kind).map(|c| &c.controller)
    }

    /// Reset timers and publish the freshly seeded stats.
    fn arm(&mut self, now: Instant) {
        self.scheduler.clear();
        self.state.readings.clear();
        for (kind, channel) in &self.channels {
            self.scheduler.add(*kind, channel.controller.interval(), now);
            self.state.record(*kind, channel.controller.stats());
        }
    }

    // ── Update ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, message: Message, now: Instant) -> Flow {
        match message {
            Message::Tick(kind) => self.tick(kind),
            Message::StatusChanged(status) => {
                info!("Status: {status}");
                self.state.status = status;
                self.buzzer.on_status(status, now);
            }
            Message::ToggleFlipped(toggle) => {
                let on = self.state.flip(toggle);
                info!("{toggle}: {}", on_off(on));
            }
            Message::ConfigReloaded => self.reload(now),
            Message::Shutdown => {
                info!("Shutdown requested");
                self.buzzer.silence();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn tick(&mut self, kind: SignalKind) {
        let Some(channel) = self.channels.get_mut(&kind) else {
            debug!("tick for inactive signal {kind}");
            return;
        };

        let stats = channel.controller.tick();
        self.state.record(kind, stats);
        trace!(signal = %kind, ?stats, "tick");

        if self.config.global.frames {
            let frame = Frame::capture(&channel.controller, self.viewport, channel.trace);
            let written = frame
                .to_json_line()
                .and_then(|line| Ok(writeln!(self.sink, "{line}")?));
            if let Err(e) = written {
                error!("Frame output failed, disabling frames: {e}");
                self.config.global.frames = false;
            }
        }
    }

    fn reload(&mut self, now: Instant) {
        let config = match load_config(&self.config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };
        let channels = match build_channels(&config) {
            Ok(ch) => ch,
            Err(e) => {
                warn!("Rejected reloaded config, keeping previous: {e}");
                return;
            }
        };

        // An unchanged [buzzer] section keeps any tone that is still sounding.
        if config.buzzer != self.config.buzzer {
            self.buzzer.silence();
            self.buzzer = Buzzer::new(vitals_buzzer::from_config(&config.buzzer), &config.buzzer);
        }

        self.viewport = Viewport::from_config(&config.render);
        self.panels = vitals_widgets::dashboard(channels.keys().copied());
        self.channels = channels;
        self.config = config;
        self.arm(now);
        info!("Config reloaded");
    }

    /// Log every panel's display line.
    pub fn log_summary(&self) {
        for panel in &self.panels {
            info!(panel = panel.id(), "{}", panel.render(&self.state));
        }
    }

    fn summary_period(&self) -> Option<Duration> {
        match self.config.global.summary_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Drive the dashboard until `quit`, a `Shutdown` message or Ctrl-C.
    ///
    /// Waits on whichever comes first: the next signal tick, the buzzer's
    /// pending stop, an operator command, a config change or the summary timer.
    pub async fn run(
        &mut self,
        mut commands: mpsc::Receiver<Command>,
        mut reloads: mpsc::Receiver<()>,
    ) -> Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut ctrl_c_live = true;
        let mut commands_open = true;
        let mut reloads_open = true;
        let mut period = self.summary_period();
        let mut summary = summary_timer(period);

        info!("Monitoring {} signal(s)", self.channels.len());
        self.log_summary();

        loop {
            let tick_at = self.scheduler.next_deadline();
            let stop_at = self.buzzer.pending_stop();

            let flow = tokio::select! {
                _ = sleep_until(tick_at) => {
                    let now = Instant::now();
                    for kind in self.scheduler.poll(now) {
                        self.update(Message::Tick(kind), now);
                    }
                    Flow::Continue
                }
                _ = sleep_until(stop_at) => {
                    self.buzzer.poll(Instant::now());
                    Flow::Continue
                }
                cmd = commands.recv(), if commands_open => match cmd {
                    Some(Command::Unknown(raw)) => {
                        warn!("Unknown command: {raw:?}");
                        Flow::Continue
                    }
                    Some(cmd) => match cmd.into_message() {
                        Some(msg) => self.update(msg, Instant::now()),
                        None => Flow::Continue,
                    },
                    None => {
                        commands_open = false;
                        Flow::Continue
                    }
                },
                changed = reloads.recv(), if reloads_open => match changed {
                    Some(()) => self.update(Message::ConfigReloaded, Instant::now()),
                    None => {
                        reloads_open = false;
                        Flow::Continue
                    }
                },
                _ = summary.tick(), if period.is_some() => {
                    self.log_summary();
                    Flow::Continue
                }
                res = &mut ctrl_c, if ctrl_c_live => match res {
                    Ok(()) => self.update(Message::Shutdown, Instant::now()),
                    Err(e) => {
                        error!("Cannot listen for Ctrl-C: {e}");
                        ctrl_c_live = false;
                        Flow::Continue
                    }
                },
            };

            if flow == Flow::Exit {
                break;
            }

            if self.summary_period() != period {
                period = self.summary_period();
                summary = summary_timer(period);
            }
        }

        self.sink.flush()?;
        Ok(())
    }
}

fn build_channels(config: &VitalsConfig) -> Result<BTreeMap<SignalKind, Channel>> {
    config
        .enabled_signals()
        .map(|kind| {
            let controller = SignalController::new(config.waveform(kind))?;
            let trace = TraceScale::for_signal(config, kind);
            Ok((kind, Channel { controller, trace }))
        })
        .collect()
}

fn summary_timer(period: Option<Duration>) -> tokio::time::Interval {
    let period = period.unwrap_or(Duration::from_secs(3600));
    let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    timer
}

/// Sleep until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
