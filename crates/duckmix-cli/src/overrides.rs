//! Command-line overrides layered on top of a [`MixConfig`].
//!
//! Precedence is defaults < `--config` file < flags. Every flag here is
//! optional; an absent flag leaves the loaded value untouched.

use clap::Args;
use duckmix_spec::MixConfig;

/// Per-field overrides for `duckmix mix`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct MixOverrides {
    /// Target sample rate in Hz (below 24000, also lower --music-lpf and --de-ess)
    ///
    /// Accepts 8000 to 192000. Filter cutoffs must sit below Nyquist, so rates
    /// under 24 kHz reject the default 12 kHz music lowpass, and rates under
    /// 15 kHz also reject the default 7.5 kHz de-ess.
    #[arg(long, help_heading = "Master")]
    pub sample_rate: Option<u32>,

    /// Peak level of the normalized mix in dBFS
    #[arg(long, allow_negative_numbers = true, help_heading = "Master")]
    pub peak_dbfs: Option<f64>,

    /// Add TPDF dither before quantization
    #[arg(long = "dither", overrides_with = "no_dither", help_heading = "Master")]
    pub dither_on: bool,

    /// Skip dither
    #[arg(long, overrides_with = "dither_on", help_heading = "Master")]
    pub no_dither: bool,

    /// Seed for the dither noise generator
    #[arg(long, help_heading = "Master")]
    pub dither_seed: Option<u32>,

    /// Voice highpass cutoff in Hz
    #[arg(long, help_heading = "Voice")]
    pub voice_hpf: Option<f64>,

    /// Voice de-ess center in Hz
    #[arg(long, help_heading = "Voice")]
    pub de_ess: Option<f64>,

    /// Enable the voice noise gate
    #[arg(long, overrides_with = "no_gate", help_heading = "Voice")]
    pub gate: bool,

    /// Disable the voice noise gate
    #[arg(long, overrides_with = "gate", help_heading = "Voice")]
    pub no_gate: bool,

    /// Gate threshold in dB
    #[arg(long, allow_negative_numbers = true, help_heading = "Voice")]
    pub gate_threshold_db: Option<f64>,

    /// Gate expansion ratio
    #[arg(long, help_heading = "Voice")]
    pub gate_ratio: Option<f64>,

    /// Deepest gate attenuation in dB
    #[arg(long, allow_negative_numbers = true, help_heading = "Voice")]
    pub gate_floor_db: Option<f64>,

    /// Gate envelope window in milliseconds
    #[arg(long, help_heading = "Voice")]
    pub gate_window_ms: Option<f64>,

    /// Static music gain (linear)
    #[arg(long, help_heading = "Music")]
    pub music_gain: Option<f64>,

    /// Music highpass cutoff in Hz
    #[arg(long, help_heading = "Music")]
    pub music_hpf: Option<f64>,

    /// Music lowpass cutoff in Hz
    #[arg(long, help_heading = "Music")]
    pub music_lpf: Option<f64>,

    /// Presence EQ center in Hz
    #[arg(long, help_heading = "Music")]
    pub eq_center: Option<f64>,

    /// Presence EQ gain in dB
    #[arg(long, allow_negative_numbers = true, help_heading = "Music")]
    pub eq_gain_db: Option<f64>,

    /// Presence EQ Q
    #[arg(long, help_heading = "Music")]
    pub eq_q: Option<f64>,

    /// Music fade-in in seconds
    #[arg(long, help_heading = "Music")]
    pub fade_in: Option<f64>,

    /// Music fade-out in seconds
    #[arg(long, help_heading = "Music")]
    pub fade_out: Option<f64>,

    /// Sidechain threshold in dB
    #[arg(long, allow_negative_numbers = true, help_heading = "Ducking")]
    pub duck_threshold_db: Option<f64>,

    /// Sidechain compression ratio
    #[arg(long, help_heading = "Ducking")]
    pub duck_ratio: Option<f64>,

    /// Sidechain attack window in milliseconds
    #[arg(long, help_heading = "Ducking")]
    pub attack_ms: Option<f64>,

    /// Sidechain release window in milliseconds
    #[arg(long, help_heading = "Ducking")]
    pub release_ms: Option<f64>,

    /// Enable the extra mid-band dip
    #[arg(long, overrides_with = "no_multiband", help_heading = "Ducking")]
    pub multiband: bool,

    /// Disable the extra mid-band dip
    #[arg(long, overrides_with = "multiband", help_heading = "Ducking")]
    pub no_multiband: bool,

    /// Mid-band center in Hz
    #[arg(long, help_heading = "Ducking")]
    pub mid_center: Option<f64>,

    /// Mid-band Q
    #[arg(long, help_heading = "Ducking")]
    pub mid_q: Option<f64>,

    /// Deepest mid-band dip in dB
    #[arg(long, help_heading = "Ducking")]
    pub mid_max_dip_db: Option<f64>,
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn set<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl MixOverrides {
    /// `--dither` / `--no-dither`, if either was given.
    pub fn dither(&self) -> Option<bool> {
        toggle(self.dither_on, self.no_dither)
    }

    /// `--gate` / `--no-gate`, if either was given.
    pub fn gate(&self) -> Option<bool> {
        toggle(self.gate, self.no_gate)
    }

    /// `--multiband` / `--no-multiband`, if either was given.
    pub fn multiband(&self) -> Option<bool> {
        toggle(self.multiband, self.no_multiband)
    }

    /// Writes every given flag into `config`.
    pub fn apply(&self, config: &mut MixConfig) {
        let master = &mut config.master;
        set(&mut master.sample_rate, self.sample_rate);
        set(&mut master.peak_dbfs, self.peak_dbfs);
        set(&mut master.dither, self.dither());
        set(&mut master.dither_seed, self.dither_seed);

        let voice = &mut config.voice;
        set(&mut voice.highpass.frequency, self.voice_hpf);
        set(&mut voice.de_ess.frequency, self.de_ess);
        set(&mut voice.gate.enable, self.gate());
        set(&mut voice.gate.threshold_db, self.gate_threshold_db);
        set(&mut voice.gate.ratio, self.gate_ratio);
        set(&mut voice.gate.floor_db, self.gate_floor_db);
        set(&mut voice.gate.window_ms, self.gate_window_ms);

        let music = &mut config.music;
        set(&mut music.gain, self.music_gain);
        set(&mut music.highpass.frequency, self.music_hpf);
        set(&mut music.lowpass.frequency, self.music_lpf);
        set(&mut music.eq.frequency, self.eq_center);
        set(&mut music.eq.gain_db, self.eq_gain_db);
        set(&mut music.eq.q, self.eq_q);
        set(&mut music.fade_in_s, self.fade_in);
        set(&mut music.fade_out_s, self.fade_out);

        let duck = &mut config.duck;
        set(&mut duck.threshold_db, self.duck_threshold_db);
        set(&mut duck.ratio, self.duck_ratio);
        set(&mut duck.attack_ms, self.attack_ms);
        set(&mut duck.release_ms, self.release_ms);

        let multiband = &mut config.multiband;
        set(&mut multiband.enable, self.multiband());
        set(&mut multiband.center_hz, self.mid_center);
        set(&mut multiband.q, self.mid_q);
        set(&mut multiband.max_dip_db, self.mid_max_dip_db);
    }
}
