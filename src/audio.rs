//! Audio cues
//!
//! The core only ever asks for four things; how they sound is up to the
//! implementation. On the web they are procedurally generated with Web Audio.

/// Fire-and-forget sound cues owned by the game driver
pub trait AudioCues {
    /// Shot fired
    fn play_fire_sound(&mut self);
    /// Background loop while a session is running
    fn play_ambient_loop(&mut self);
    fn stop_ambient_loop(&mut self);
    fn set_muted(&mut self, muted: bool);
}

/// No output; logs cues at debug level (native builds, tests)
#[derive(Debug, Default)]
pub struct SilentAudio {
    muted: bool,
}

impl AudioCues for SilentAudio {
    fn play_fire_sound(&mut self) {
        if !self.muted {
            log::debug!("♪ fire");
        }
    }

    fn play_ambient_loop(&mut self) {
        if !self.muted {
            log::debug!("♪ ambient loop on");
        }
    }

    fn stop_ambient_loop(&mut self) {
        log::debug!("♪ ambient loop off");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::AudioCues;

    /// Ambient drone level relative to master volume
    const AMBIENT_LEVEL: f32 = 0.08;

    /// Web Audio implementation
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
        ambient: Option<(OscillatorNode, GainNode)>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                muted: false,
                ambient: None,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
            self.apply_ambient_level();
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Context with autoplay suspension lifted
        fn live_ctx(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
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

        fn apply_ambient_level(&self) {
            if let Some((_, gain)) = &self.ambient {
                gain.gain().set_value(self.effective_volume() * AMBIENT_LEVEL);
            }
        }
    }

    impl AudioCues for WebAudio {
        /// Short square blip
        fn play_fire_sound(&mut self) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = self.live_ctx() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, 800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Low sine drone until stopped
        fn play_ambient_loop(&mut self) {
            if self.ambient.is_some() {
                return;
            }
            let Some(ctx) = self.live_ctx() else { return };
            let Some((osc, gain)) = Self::create_osc(ctx, 55.0, OscillatorType::Sine) else {
                return;
            };
            if osc.start().is_err() {
                return;
            }
            self.ambient = Some((osc, gain));
            self.apply_ambient_level();
        }

        fn stop_ambient_loop(&mut self) {
            if let Some((osc, gain)) = self.ambient.take() {
                osc.stop().ok();
                let _ = gain.disconnect();
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.apply_ambient_level();
        }
    }

    impl Drop for WebAudio {
        fn drop(&mut self) {
            self.stop_ambient_loop();
            if let Some(ctx) = &self.ctx {
                let _ = ctx.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_accepts_all_cues() {
        let mut audio = SilentAudio::default();
        audio.set_muted(true);
        audio.play_fire_sound();
        audio.play_ambient_loop();
        audio.stop_ambient_loop();
        assert!(audio.muted);
    }
}
