// Copyright 2026 the Genie Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface effect bookkeeping.
//!
//! The [`EffectRegistry`] keeps at most one [`LampEffect`] per surface.
//! Starting a transition on a surface that is already animating tears the
//! old effect down first, so the host always hears one completion per
//! transition and never two effects fight over the same surface.

use hashbrown::HashMap;

use crate::config::EffectConfig;
use crate::effect::{EndReason, LampEffect};
use crate::geometry::SurfaceSnapshot;
use crate::host::Host;
use crate::output::SurfaceId;
use crate::phase::EffectVariant;
use crate::time::{HostTime, Timebase};
use crate::timing::{FrameTick, TickContext};
use crate::trace::Tracer;

/// Aggregate result of one [`EffectRegistry::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// At least one effect asked for a redraw.
    pub redraw_requested: bool,
    /// Effects still running after the tick.
    pub running: usize,
    /// Effects that terminated during the tick.
    pub finished: usize,
}

/// Active effects keyed by surface.
#[derive(Debug)]
pub struct EffectRegistry {
    effects: HashMap<SurfaceId, LampEffect>,
    config: EffectConfig,
    timebase: Timebase,
}

impl EffectRegistry {
    /// Creates an empty registry. `config` applies to effects started later.
    #[must_use]
    pub fn new(config: EffectConfig, timebase: Timebase) -> Self {
        Self {
            effects: HashMap::new(),
            config: config.clamped(),
            timebase,
        }
    }

    /// Settings used for new effects.
    #[must_use]
    pub const fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Replaces the settings for new effects. Running effects keep theirs.
    pub fn set_config(&mut self, config: EffectConfig) {
        self.config = config.clamped();
    }

    /// Host timebase.
    #[must_use]
    pub const fn timebase(&self) -> Timebase {
        self.timebase
    }

    /// Starts a transition on `surface`.
    ///
    /// Any effect already on the surface ends with [`EndReason::Replaced`].
    /// The host's own animation is always suppressed. While the overview is
    /// visible no effect is created and the transition completes
    /// immediately. Returns whether an effect is now running.
    pub fn begin(
        &mut self,
        surface: SurfaceId,
        variant: EffectVariant,
        snapshot: &SurfaceSnapshot<'_>,
        now: HostTime,
        ctx: &TickContext,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if let Some(mut old) = self.effects.remove(&surface) {
            old.terminate(EndReason::Replaced, host, tracer);
        }
        host.suppress_default_animation(surface, variant);
        if ctx.overview_visible {
            host.transition_completed(surface, variant);
            return false;
        }

        let mut effect = LampEffect::new(surface, variant, &self.config, self.timebase);
        effect.attach(snapshot, now, tracer);
        self.effects.insert(surface, effect);
        true
    }

    /// Advances every effect and drops the ones that terminated.
    pub fn tick(
        &mut self,
        tick: &FrameTick,
        ctx: &TickContext,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> TickReport {
        let mut report = TickReport::default();
        self.effects.retain(|_, effect| {
            let outcome = effect.tick(tick, ctx, host, tracer);
            report.redraw_requested |= outcome.redraw_requested;
            if effect.is_terminated() {
                report.finished += 1;
                false
            } else {
                report.running += 1;
                true
            }
        });
        report
    }

    /// Cancels the effect on `surface`, if any.
    pub fn cancel(
        &mut self,
        surface: SurfaceId,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.end(surface, EndReason::Cancelled, host, tracer)
    }

    /// Ends the effect on a surface that went away, if any.
    pub fn remove_surface(
        &mut self,
        surface: SurfaceId,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.end(surface, EndReason::SurfaceRemoved, host, tracer)
    }

    /// Cancels every effect, e.g. when the extension is disabled.
    pub fn clear(&mut self, host: &mut dyn Host, tracer: &mut Tracer<'_>) {
        for (_, mut effect) in self.effects.drain() {
            effect.cancel(host, tracer);
        }
    }

    /// The effect on `surface`.
    #[must_use]
    pub fn get(&self, surface: SurfaceId) -> Option<&LampEffect> {
        self.effects.get(&surface)
    }

    /// Mutable access for mesh evaluation.
    #[must_use]
    pub fn get_mut(&mut self, surface: SurfaceId) -> Option<&mut LampEffect> {
        self.effects.get_mut(&surface)
    }

    /// All active effects, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &LampEffect> {
        self.effects.values()
    }

    /// Number of active effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether no effect is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn end(
        &mut self,
        surface: SurfaceId,
        reason: EndReason,
        host: &mut dyn Host,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.effects
            .remove(&surface)
            .is_some_and(|mut effect| effect.terminate(reason, host, tracer))
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new(EffectConfig::DEFAULT, Timebase::NANOS)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::host::testing::RecordingHost;
    use crate::output::{Monitor, MonitorId};

    const MS: u64 = 1_000_000;

    fn monitors() -> [Monitor; 1] {
        [Monitor::new(MonitorId(0), Rect::new(0.0, 0.0, 1920.0, 1080.0))]
    }

    fn snapshot(monitors: &[Monitor]) -> SurfaceSnapshot<'_> {
        SurfaceSnapshot::new(Rect::new(100.0, 100.0, 500.0, 400.0), 0, monitors, None)
    }

    fn begin(
        reg: &mut EffectRegistry,
        host: &mut RecordingHost,
        surface: u64,
        variant: EffectVariant,
        ctx: &TickContext,
    ) -> bool {
        let monitors = monitors();
        reg.begin(
            SurfaceId(surface),
            variant,
            &snapshot(&monitors),
            HostTime(0),
            ctx,
            host,
            &mut Tracer::none(),
        )
    }

    fn tick(
        reg: &mut EffectRegistry,
        host: &mut RecordingHost,
        ms: u64,
        ctx: &TickContext,
    ) -> TickReport {
        let tick = FrameTick::new(HostTime(ms * MS), ms);
        reg.tick(&tick, ctx, host, &mut Tracer::none())
    }

    #[test]
    fn begin_suppresses_host_animation() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        assert!(begin(&mut reg, &mut host, 1, EffectVariant::Minimize, &TickContext::IDLE));
        assert_eq!(host.suppressed, [(SurfaceId(1), EffectVariant::Minimize)]);
        assert!(host.completed.is_empty());
        assert_eq!(reg.len(), 1);
        assert!(reg.get(SurfaceId(1)).is_some_and(LampEffect::is_running));
    }

    #[test]
    fn new_transition_replaces_old_one() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        begin(&mut reg, &mut host, 1, EffectVariant::Minimize, &TickContext::IDLE);
        begin(&mut reg, &mut host, 1, EffectVariant::Unminimize, &TickContext::IDLE);
        assert_eq!(reg.len(), 1, "at most one effect per surface");
        assert_eq!(host.completed, [(SurfaceId(1), EffectVariant::Minimize)]);
        assert_eq!(
            reg.get(SurfaceId(1)).map(LampEffect::variant),
            Some(EffectVariant::Unminimize)
        );
    }

    #[test]
    fn overview_completes_immediately() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        let ctx = TickContext {
            overview_visible: true,
        };
        assert!(!begin(&mut reg, &mut host, 4, EffectVariant::Unminimize, &ctx));
        assert!(reg.is_empty());
        assert_eq!(host.completed, [(SurfaceId(4), EffectVariant::Unminimize)]);
    }

    #[test]
    fn tick_drops_finished_effects() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        begin(&mut reg, &mut host, 1, EffectVariant::Minimize, &TickContext::IDLE);
        begin(&mut reg, &mut host, 2, EffectVariant::Unminimize, &TickContext::IDLE);

        let mid = tick(&mut reg, &mut host, 100, &TickContext::IDLE);
        let want = TickReport {
            redraw_requested: true,
            running: 2,
            finished: 0,
        };
        assert_eq!(mid, want);

        let end = tick(&mut reg, &mut host, 400, &TickContext::IDLE);
        assert_eq!(end.finished, 2);
        assert_eq!(end.running, 0);
        assert!(reg.is_empty());
        assert_eq!(host.completed.len(), 2);
    }

    #[test]
    fn overview_during_tick_cancels_everything() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        for s in 0..3 {
            begin(&mut reg, &mut host, s, EffectVariant::Minimize, &TickContext::IDLE);
        }
        let ctx = TickContext {
            overview_visible: true,
        };
        let report = tick(&mut reg, &mut host, 1, &ctx);
        assert_eq!(report.finished, 3);
        assert!(!report.redraw_requested);
        assert!(reg.is_empty());
    }

    #[test]
    fn removal_and_clear_notify_once() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        for s in 0..3 {
            begin(&mut reg, &mut host, s, EffectVariant::Minimize, &TickContext::IDLE);
        }
        assert!(reg.remove_surface(SurfaceId(0), &mut host, &mut Tracer::none()));
        assert!(!reg.remove_surface(SurfaceId(0), &mut host, &mut Tracer::none()));
        assert!(reg.cancel(SurfaceId(1), &mut host, &mut Tracer::none()));
        reg.clear(&mut host, &mut Tracer::none());
        assert!(reg.is_empty());
        assert_eq!(host.completed.len(), 3);
    }

    #[test]
    fn config_changes_apply_to_new_effects() {
        let mut reg = EffectRegistry::default();
        let mut host = RecordingHost::default();
        begin(&mut reg, &mut host, 1, EffectVariant::Minimize, &TickContext::IDLE);
        reg.set_config(EffectConfig {
            x_tiles: 200,
            ..EffectConfig::DEFAULT
        });
        assert_eq!(reg.config().x_tiles, 50);
        begin(&mut reg, &mut host, 2, EffectVariant::Minimize, &TickContext::IDLE);
        assert_eq!(reg.get(SurfaceId(1)).map(|e| e.grid().x_tiles()), Some(20));
        assert_eq!(reg.get(SurfaceId(2)).map(|e| e.grid().x_tiles()), Some(50));
    }
}
