//! 中央协调器

use rover_hal::{
    Actuator, Clock, Display, DistanceSensor, Indicator, LightSensor, LineSensor, LinkEvent,
    LinkTransport, RemoteDecoder, pattern,
};
use rover_protocol::{Event, Mode, REMOTE_NONE};
use smallvec::SmallVec;
use tracing::{debug, error, info, trace, warn};

use crate::config::RoverConfig;
use crate::debounce::RemoteDebouncer;
use crate::decision::{self, HeadlightToggle, LineCorrection, LineFollower};
use crate::effect::{Activity, DisplayCommand, Effect};
use crate::error::ControlError;
use crate::handlers::{self, HandlerInput};
use crate::metrics::MetricsAggregator;
use crate::mode::{ModeMachine, Transition};
use crate::snapshot::SensorSnapshot;
use crate::timer::{TimerBank, TimerId};

/// 注入的外设
pub(crate) struct Peripherals {
    pub actuator: Box<dyn Actuator>,
    pub distance: Box<dyn DistanceSensor>,
    pub light: Box<dyn LightSensor>,
    pub line: Box<dyn LineSensor>,
    pub remote: Box<dyn RemoteDecoder>,
    pub display: Box<dyn Display>,
    pub indicator: Box<dyn Indicator>,
    pub link: Box<dyn LinkTransport>,
}

/// 单次 tick 的结果摘要
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// tick 序号（从 1 开始）
    pub tick: u64,
    pub now_ms: u64,
    /// tick 结束时的模式
    pub mode: Mode,
    /// 本 tick 内发生的迁移，按发生顺序
    pub transitions: SmallVec<[(Mode, Mode); 2]>,
}

/// 小车协调器
///
/// 持有全部跨 tick 状态：模式、快照、定时器、去抖器、大灯与指示灯状态。
/// 通过 [`RoverBuilder`](crate::RoverBuilder) 构造。
pub struct Rover {
    config: RoverConfig,
    clock: Box<dyn Clock>,
    io: Peripherals,
    modes: ModeMachine,
    timers: TimerBank,
    snapshot: SensorSnapshot,
    debouncer: RemoteDebouncer,
    line_follower: LineFollower,
    metrics: MetricsAggregator,
    headlights_on: bool,
    indicator_on: bool,
    link_connected: bool,
    /// 上一个手动 tick 的去抖指令，用于判断按键是否新按下
    manual_last_command: u32,
    ticks: u64,
}

impl Rover {
    pub(crate) fn new(config: RoverConfig, clock: Box<dyn Clock>, io: Peripherals) -> Self {
        let now = clock.now_ms();
        Self {
            timers: TimerBank::new(&config.timing, now),
            debouncer: RemoteDebouncer::new(config.timing.remote_decay_ms),
            metrics: MetricsAggregator::new(config.drive.max_speed_cm_s, now),
            config,
            clock,
            io,
            modes: ModeMachine::new(),
            snapshot: SensorSnapshot::default(),
            line_follower: LineFollower::new(),
            headlights_on: false,
            indicator_on: false,
            link_connected: false,
            manual_last_command: REMOTE_NONE,
            ticks: 0,
        }
    }

    /// 启动阶段（阻塞，只执行一次）
    ///
    /// 显示启动画面并等待，清屏后滚动字幕，最后进入等待链路模式。
    pub fn boot(&mut self) -> Result<(), ControlError> {
        let mode = self.modes.current();
        if mode != Mode::Starting {
            return Err(ControlError::AlreadyBooted(mode));
        }

        info!("Booting rover");
        self.io.display.display_pattern(&pattern::LOGO);
        self.clock.delay_ms(self.config.timing.boot_logo_ms);
        self.io.display.clear();
        self.io
            .display
            .scroll_text(&self.config.boot.banner, self.config.boot.scroll_speed);

        if let Some(transition) = self.modes.request(Mode::WaitingLink)? {
            self.enter(transition);
        }
        info!("Boot complete");
        Ok(())
    }

    /// 执行一次调度循环
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now_ms();
        self.ticks += 1;
        let mut transitions = SmallVec::new();

        // 1. 链路通知
        self.drain_link_events();

        // 2. 传感器快照
        if self.timers.poll(TimerId::SensorRefresh, now) {
            self.refresh_sensors(&mut transitions);
        }

        // 3. 累计里程
        if self.timers.poll(TimerId::CumulativeMetrics, now) {
            let speed = self.io.actuator.current_speed();
            self.metrics.update_cumulative(speed, now);
        }

        // 4. 瞬时指标
        let speed = self.io.actuator.current_speed();
        self.metrics.update(
            self.modes.current(),
            &self.snapshot,
            self.debouncer.active(),
            speed,
            now,
        );

        // 5. 遥测
        if self.timers.poll(TimerId::Telemetry, now) {
            let packet = self.metrics.telemetry_packet();
            trace!("Telemetry: {}", packet);
            self.send(&packet);
        }

        // 6. 模式处理
        self.dispatch(now, &mut transitions);

        trace!(
            "Tick {} @{}ms mode={} transitions={:?}",
            self.ticks,
            now,
            self.modes.current(),
            transitions
        );

        TickReport {
            tick: self.ticks,
            now_ms: now,
            mode: self.modes.current(),
            transitions,
        }
    }

    fn drain_link_events(&mut self) {
        while let Some(event) = self.io.link.poll_event() {
            match event {
                LinkEvent::Connected => {
                    if !self.link_connected {
                        info!("Link connected");
                    }
                    self.link_connected = true;
                }
                LinkEvent::Disconnected => {
                    if self.link_connected {
                        info!("Link disconnected");
                    }
                    self.link_connected = false;
                }
            }
        }
    }

    fn refresh_sensors(&mut self, transitions: &mut SmallVec<[(Mode, Mode); 2]>) {
        self.snapshot.distance_cm = self.io.distance.read_distance();
        self.snapshot.light_level = self.io.light.read_light_level();
        self.snapshot.line = self.io.line.read_line();
        debug!(
            "Snapshot: distance={:.2}cm light={} line={:?}",
            self.snapshot.distance_cm, self.snapshot.light_level, self.snapshot.line
        );

        let mode = self.modes.current();
        if let Some(target) = decision::arbitrate_obstacle(
            mode,
            &self.snapshot,
            self.config.thresholds.obstacle_cm,
        ) {
            if target == Mode::Auto {
                debug!("Obstacle cleared");
                self.apply(Effect::Display(DisplayCommand::Clear));
            }
            transitions.extend(self.change_mode(target));
        }

        match decision::evaluate_headlights(
            self.snapshot.light_level,
            self.headlights_on,
            self.config.thresholds.light_level,
        ) {
            Some(HeadlightToggle::On) => {
                debug!("Headlights on (light={})", self.snapshot.light_level);
                self.headlights_on = true;
                self.apply(Effect::Display(DisplayCommand::Pattern(pattern::FULL)));
                self.apply(Effect::Notify(Event::HeadlightsOn));
            }
            Some(HeadlightToggle::Off) => {
                debug!("Headlights off (light={})", self.snapshot.light_level);
                self.headlights_on = false;
                self.apply(Effect::Display(DisplayCommand::Clear));
                self.apply(Effect::Notify(Event::HeadlightsOff));
            }
            None => {}
        }
    }

    fn dispatch(&mut self, now: u64, transitions: &mut SmallVec<[(Mode, Mode); 2]>) {
        let mode = self.modes.current();

        let raw_command = if mode == Mode::Starting {
            REMOTE_NONE
        } else {
            self.io.remote.read_command()
        };
        if raw_command != REMOTE_NONE {
            trace!("Remote raw code 0x{:X}", raw_command);
        }

        let active_command = if mode == Mode::Manual {
            self.debouncer.poll(raw_command, now)
        } else {
            self.debouncer.active()
        };

        let line = if mode == Mode::Auto {
            // 巡线读数每个自动 tick 重新采样
            self.snapshot.line = self.io.line.read_line();
            self.line_follower.decide(self.snapshot.line)
        } else {
            LineCorrection::Stop
        };

        let input = HandlerInput {
            raw_command,
            active_command,
            previous_command: self.manual_last_command,
            link_connected: self.link_connected,
            line,
            keymap: &self.config.remote,
            drive: &self.config.drive,
        };
        let outcome = handlers::handler_for(mode)(&input);

        if mode == Mode::Manual {
            self.manual_last_command = active_command;
        }

        for effect in &outcome.effects {
            self.apply(*effect);
        }

        match outcome.activity {
            Activity::Moving => {
                if self.timers.poll(TimerId::IndicatorBlink, now) {
                    self.apply(Effect::Indicator(!self.indicator_on));
                }
            }
            Activity::AwaitingLink => {
                if self.timers.poll(TimerId::LinkPrompt, now) {
                    self.io.display.show_status(&self.config.boot.link_prompt);
                }
            }
            Activity::Idle => {}
        }

        if let Some(next) = outcome.next {
            transitions.extend(self.change_mode(next));
        }
    }

    /// 请求迁移并执行入口动作，返回实际发生的迁移
    fn change_mode(&mut self, target: Mode) -> Option<(Mode, Mode)> {
        match self.modes.request(target) {
            Ok(Some(transition)) => {
                let edge = (transition.from, transition.to);
                self.enter(transition);
                Some(edge)
            }
            Ok(None) => None,
            Err(e) => {
                error!("Rejected mode change: {}", e);
                None
            }
        }
    }

    /// 重置目标模式独占的状态，然后执行入口动作
    fn enter(&mut self, transition: Transition) {
        match transition.to {
            Mode::Manual => {
                self.debouncer.reset();
                self.manual_last_command = REMOTE_NONE;
            }
            Mode::Auto => self.line_follower.reset(),
            Mode::Starting | Mode::WaitingLink | Mode::ObstacleDetected => {}
        }
        for effect in transition.entry {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Drive(cmd) => cmd.apply(self.io.actuator.as_mut()),
            Effect::Display(DisplayCommand::Pattern(p)) => self.io.display.display_pattern(&p),
            Effect::Display(DisplayCommand::Clear) => self.io.display.clear(),
            Effect::Indicator(on) => {
                self.indicator_on = on;
                self.io.indicator.set(on);
            }
            Effect::Notify(event) => {
                debug!("Event: {}", event);
                self.send(&event.encode());
            }
        }
    }

    /// 发出即忘，失败只记录
    fn send(&mut self, line: &str) {
        if let Err(e) = self.io.link.send(line) {
            warn!("Dropped link message {:?}: {}", line, e);
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    pub fn link_connected(&self) -> bool {
        self.link_connected
    }

    pub fn headlights_on(&self) -> bool {
        self.headlights_on
    }

    pub fn indicator_on(&self) -> bool {
        self.indicator_on
    }

    pub fn metrics(&self) -> &MetricsAggregator {
        &self.metrics
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn debouncer(&self) -> &RemoteDebouncer {
        &self.debouncer
    }

    pub fn line_follower(&self) -> &LineFollower {
        &self.line_follower
    }

    /// 已发生的模式迁移总数
    pub fn transition_count(&self) -> u64 {
        self.modes.transitions()
    }
}
