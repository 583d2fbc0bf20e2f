//! The `animation` shorthand: building it and reading it back.

use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Iterations {
    Count(f32),
    Infinite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillMode {
    None,
    Forwards,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timing {
    Linear,
    Ease,
}

/// One entry of an `animation` list.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSpec {
    pub name: String,
    pub duration: Duration,
    /// `None` renders nothing and behaves like `ease`.
    pub timing: Option<Timing>,
    /// `None` renders nothing and behaves like a single run.
    pub iterations: Option<Iterations>,
    pub delay: Duration,
    pub fill: FillMode,
}

impl AnimationSpec {
    pub fn new(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            duration,
            timing: None,
            iterations: None,
            delay: Duration::ZERO,
            fill: FillMode::None,
        }
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Progress through the current iteration at `elapsed` since the
    /// animation was applied, or `None` while it has no effect.
    pub fn progress(&self, elapsed: Duration) -> Option<f32> {
        let t = elapsed.checked_sub(self.delay)?.as_secs_f32();
        let dur = self.duration.as_secs_f32();
        if dur <= 0.0 {
            return (self.fill == FillMode::Forwards).then_some(1.0);
        }

        let raw = match self.iterations.unwrap_or(Iterations::Count(1.0)) {
            Iterations::Infinite => (t % dur) / dur,
            Iterations::Count(n) => {
                let n = n.max(0.0);
                if t < dur * n {
                    (t % dur) / dur
                } else if self.fill == FillMode::Forwards {
                    if n.fract() == 0.0 { 1.0 } else { n.fract() }
                } else {
                    return None;
                }
            }
        };

        Some(match self.timing.unwrap_or(Timing::Ease) {
            Timing::Linear => raw,
            // Close enough to cubic-bezier(0.25, 0.1, 0.25, 1) for a 0.5s return.
            Timing::Ease => raw * raw * (3.0 - 2.0 * raw),
        })
    }
}

impl fmt::Display for AnimationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s", self.name, self.duration.as_secs_f32())?;
        match self.timing {
            Some(Timing::Linear) => write!(f, " linear")?,
            Some(Timing::Ease) => write!(f, " ease")?,
            None => {}
        }
        match self.iterations {
            Some(Iterations::Infinite) => write!(f, " infinite")?,
            Some(Iterations::Count(n)) => write!(f, " {n}")?,
            None => {}
        }
        if !self.delay.is_zero() {
            write!(f, " {}s", self.delay.as_secs_f32())?;
        }
        if self.fill == FillMode::Forwards {
            write!(f, " forwards")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationList(pub Vec<AnimationSpec>);

impl fmt::Display for AnimationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

/// Read an `animation` shorthand back into its entries.
///
/// Only the parts the engine emits are understood: `<n>s`/`<n>ms` times
/// (duration first, then delay), `linear`/`ease`, `infinite` or a number,
/// `forwards`/`none` fill, and a name. `""` and `"none"` give an empty list.
pub fn parse_animation_list(value: &str) -> AnimationList {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return AnimationList::default();
    }

    let mut out = Vec::new();
    for part in value.split(',') {
        let mut spec = AnimationSpec::new("", Duration::ZERO);
        let mut seen_duration = false;

        for token in part.split_whitespace() {
            if let Some(d) = parse_time(token) {
                if seen_duration {
                    spec.delay = d;
                } else {
                    spec.duration = d;
                    seen_duration = true;
                }
            } else if token.eq_ignore_ascii_case("linear") {
                spec.timing = Some(Timing::Linear);
            } else if token.eq_ignore_ascii_case("ease") {
                spec.timing = Some(Timing::Ease);
            } else if token.eq_ignore_ascii_case("infinite") {
                spec.iterations = Some(Iterations::Infinite);
            } else if token.eq_ignore_ascii_case("forwards") {
                spec.fill = FillMode::Forwards;
            } else if token.eq_ignore_ascii_case("none") {
                spec.fill = FillMode::None;
            } else if let Ok(n) = token.parse::<f32>() {
                spec.iterations = Some(Iterations::Count(n));
            } else {
                spec.name = token.to_string();
            }
        }

        if spec.name.is_empty() {
            log::trace!("ignoring animation entry without a name: {part:?}");
            continue;
        }
        out.push(spec);
    }
    AnimationList(out)
}

fn parse_time(token: &str) -> Option<Duration> {
    let (num, divisor) = if let Some(ms) = token.strip_suffix("ms") {
        (ms, 1000.0)
    } else {
        (token.strip_suffix('s')?, 1.0)
    };
    let v = num.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then(|| Duration::from_secs_f64(v / divisor))
}
