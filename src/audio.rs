//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu button
    Click,
    /// Successful touchdown - rising chime
    Landing,
    /// Any failed landing - soft bonk
    Crash,
    /// Last level cleared
    Fanfare,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    enabled: bool,
    /// Running engine hum, if the ship is thrusting
    thrust: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            enabled,
            thrust: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Enable/disable sound; muting also silences the engine
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop_thrust();
        }
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ThrustChanged { thrusting: true } => self.start_thrust(),
            GameEvent::ThrustChanged { thrusting: false } => self.stop_thrust(),
            GameEvent::Landed(report) => {
                self.stop_thrust();
                if report.outcome.is_success() {
                    self.play(SoundEffect::Landing);
                } else {
                    self.play(SoundEffect::Crash);
                }
            }
            GameEvent::GameComplete => self.play(SoundEffect::Fanfare),
            _ => {}
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if !self.enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        match effect {
            SoundEffect::Click => self.play_click(ctx),
            SoundEffect::Landing => self.play_landing(ctx),
            SoundEffect::Crash => self.play_crash(ctx),
            SoundEffect::Fanfare => self.play_fanfare(ctx),
        }
    }

    /// Start the engine hum, if not already running
    pub fn start_thrust(&mut self) {
        if !self.enabled || self.thrust.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.08, t + 0.1).ok();
        osc.start().ok();
        self.thrust = Some((osc, gain));
    }

    /// Fade the engine hum out
    pub fn stop_thrust(&mut self) {
        let Some((osc, gain)) = self.thrust.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.1).ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Simple decaying tone starting `delay` seconds from now
    fn tone(
        &self,
        ctx: &AudioContext,
        freq: f32,
        delay: f64,
        duration: f64,
        vol: f32,
        osc_type: OscillatorType,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + delay;
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    fn play_click(&self, ctx: &AudioContext) {
        self.tone(ctx, 600.0, 0.0, 0.05, 0.1, OscillatorType::Sine);
    }

    /// C major arpeggio with a sparkle on top
    fn play_landing(&self, ctx: &AudioContext) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            self.tone(ctx, *freq, i as f64 * 0.15, 0.15, 0.2, OscillatorType::Sine);
        }
        for i in 0..5 {
            let freq = 1500.0 + js_sys::Math::random() as f32 * 1000.0;
            self.tone(ctx, freq, 0.6 + i as f64 * 0.05, 0.1, 0.05, OscillatorType::Sine);
        }
    }

    /// Low thud then a soft boing
    fn play_crash(&self, ctx: &AudioContext) {
        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
            let t = ctx.current_time();
            gain.gain().set_value_at_time(0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
        self.tone(ctx, 200.0, 0.1, 0.2, 0.1, OscillatorType::Triangle);
    }

    fn play_fanfare(&self, ctx: &AudioContext) {
        let melody = [
            (392.0, 0.15),
            (440.0, 0.15),
            (494.0, 0.15),
            (523.0, 0.3),
            (659.0, 0.15),
            (784.0, 0.4),
        ];
        let mut at = 0.0;
        for (freq, dur) in melody {
            self.tone(ctx, freq, at, dur, 0.2, OscillatorType::Sine);
            at += dur;
        }
    }
}
