use rodio::Source;
use std::f32::consts::TAU;
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const PEAK_GAIN: f32 = 0.3;
const FLOOR_GAIN: f32 = 0.00001;
const ATTACK_SECS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

impl Waveform {
    /// One period sampled at `phase` in `[0, 1)`.
    fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// A single enveloped tone starting `offset` into its cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency: f32,
    pub duration: Duration,
    pub waveform: Waveform,
    pub offset: Duration,
}

impl ToneSpec {
    pub fn new(frequency: f32, duration_ms: u64, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration: Duration::from_millis(duration_ms),
            waveform,
            offset: Duration::ZERO,
        }
    }

    pub fn after_ms(mut self, offset_ms: u64) -> Self {
        self.offset = Duration::from_millis(offset_ms);
        self
    }

    fn end(&self) -> Duration {
        self.offset + self.duration
    }

    /// Linear attack to the peak, then exponential decay to the floor at the
    /// end of the tone.
    fn envelope(&self, local: f32) -> f32 {
        let duration = self.duration.as_secs_f32();
        if local < ATTACK_SECS {
            return PEAK_GAIN * local / ATTACK_SECS;
        }
        let decay_span = (duration - ATTACK_SECS).max(f32::EPSILON);
        let progress = ((local - ATTACK_SECS) / decay_span).min(1.0);
        PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(progress)
    }

    fn sample_at(&self, t: f32) -> f32 {
        let local = t - self.offset.as_secs_f32();
        if local < 0.0 || local >= self.duration.as_secs_f32() {
            return 0.0;
        }
        let phase = (self.frequency * local).fract();
        self.waveform.sample(phase) * self.envelope(local)
    }
}

/// Mono source mixing a cue's tones; ends after the last tone.
pub struct CueSource {
    tones: Vec<ToneSpec>,
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl CueSource {
    pub fn new(tones: Vec<ToneSpec>) -> Self {
        let end = tones.iter().map(ToneSpec::end).max().unwrap_or(Duration::ZERO);
        let total_samples = (end.as_secs_f64() * f64::from(SAMPLE_RATE)).round() as usize;

        Self {
            tones,
            sample_rate: SAMPLE_RATE,
            num_sample: 0,
            total_samples,
        }
    }
}

impl Iterator for CueSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }

        let t = self.num_sample as f32 / self.sample_rate as f32;
        self.num_sample += 1;

        let mixed: f32 = self.tones.iter().map(|tone| tone.sample_at(t)).sum();
        Some(mixed.clamp(-1.0, 1.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_samples.saturating_sub(self.num_sample);
        (remaining, Some(remaining))
    }
}

impl Source for CueSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.num_sample))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f64(
            self.total_samples as f64 / f64::from(self.sample_rate),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_length_covers_last_tone() {
        let source = CueSource::new(vec![
            ToneSpec::new(1200.0, 200, Waveform::Sine),
            ToneSpec::new(1000.0, 300, Waveform::Sine).after_ms(50),
        ]);
        // 350 ms at 44.1 kHz
        assert_eq!(source.count(), 15435);
    }

    #[test]
    fn test_envelope_starts_silent_and_stays_bounded() {
        let samples: Vec<f32> = CueSource::new(vec![ToneSpec::new(880.0, 200, Waveform::Square)]).collect();
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= PEAK_GAIN + f32::EPSILON));
        // Tail has decayed close to the floor.
        assert!(samples.last().unwrap().abs() < 0.001);
    }

    #[test]
    fn test_delayed_tone_is_silent_before_offset() {
        let samples: Vec<f32> =
            CueSource::new(vec![ToneSpec::new(659.0, 100, Waveform::Sine).after_ms(120)]).collect();
        let offset_samples = (0.12 * SAMPLE_RATE as f32) as usize;
        assert!(samples[..offset_samples - 1].iter().all(|s| *s == 0.0));
        assert!(samples[offset_samples + 100..].iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_empty_cue_yields_nothing() {
        assert_eq!(CueSource::new(Vec::new()).count(), 0);
    }
}
