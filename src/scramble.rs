//! Hover effect that resolves random glyphs into the real text.
//!
//! The state machine is timer-agnostic: the caller owns the interval and
//! calls [`Scramble::tick`] on every beat.

use fastrand::Rng;

use crate::config::{SCRAMBLE_GLYPHS, SCRAMBLE_TICKS_PER_CHAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleState {
    Idle,
    /// `ticks` beats have already been rendered.
    Scrambling { ticks: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still revealing; keep the timer running.
    Running,
    /// Text fully revealed on this beat; stop the timer.
    Finished,
    /// Nothing to do, the effect is not running.
    Idle,
}

pub struct Scramble {
    text: String,
    chars: Vec<char>,
    glyphs: Vec<char>,
    display: String,
    state: ScrambleState,
    rng: Rng,
}

impl Scramble {
    pub fn new(text: impl Into<String>, seed: u64) -> Self {
        let text = text.into();
        Self {
            chars: text.chars().collect(),
            glyphs: SCRAMBLE_GLYPHS.chars().collect(),
            display: text.clone(),
            text,
            state: ScrambleState::Idle,
            rng: Rng::with_seed(seed),
        }
    }

    /// Number of beats from hover to a fully revealed text of `len` characters.
    pub fn ticks_to_reveal(len: usize) -> usize {
        len * SCRAMBLE_TICKS_PER_CHAR + 1
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// What the element should show right now.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn state(&self) -> ScrambleState {
        self.state
    }

    /// Restart the reveal from nothing.
    pub fn hover_enter(&mut self) {
        self.state = ScrambleState::Scrambling { ticks: 0 };
    }

    /// Abort and show the real text.
    pub fn hover_leave(&mut self) {
        self.state = ScrambleState::Idle;
        self.display.clone_from(&self.text);
    }

    pub fn tick(&mut self) -> Tick {
        let ScrambleState::Scrambling { ticks } = self.state else {
            return Tick::Idle;
        };

        let mut display = String::with_capacity(self.text.len());
        for (index, &c) in self.chars.iter().enumerate() {
            if index * SCRAMBLE_TICKS_PER_CHAR < ticks {
                display.push(c);
            } else {
                display.push(self.glyphs[self.rng.usize(..self.glyphs.len())]);
            }
        }
        self.display = display;

        if ticks >= self.chars.len() * SCRAMBLE_TICKS_PER_CHAR {
            self.state = ScrambleState::Idle;
            self.display.clone_from(&self.text);
            return Tick::Finished;
        }
        self.state = ScrambleState::Scrambling { ticks: ticks + 1 };
        Tick::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(scramble: &mut Scramble) -> usize {
        let mut beats = 0;
        loop {
            beats += 1;
            match scramble.tick() {
                Tick::Running => continue,
                Tick::Finished => return beats,
                Tick::Idle => panic!("went idle without finishing"),
            }
        }
    }

    #[test]
    fn idle_until_hovered() {
        let mut scramble = Scramble::new("SYSTEM_ACTIVE", 1);
        assert_eq!(scramble.tick(), Tick::Idle);
        assert_eq!(scramble.display(), "SYSTEM_ACTIVE");
    }

    #[test]
    fn enter_then_leave_before_a_tick_keeps_the_text() {
        let mut scramble = Scramble::new("Path and roles so far", 2);
        scramble.hover_enter();
        scramble.hover_leave();
        assert_eq!(scramble.display(), "Path and roles so far");
        assert_eq!(scramble.tick(), Tick::Idle);
        assert_eq!(scramble.display(), "Path and roles so far");
    }

    #[test]
    fn leave_mid_reveal_restores_text() {
        let mut scramble = Scramble::new("Education & Training", 3);
        scramble.hover_enter();
        for _ in 0..10 {
            scramble.tick();
        }
        scramble.hover_leave();
        assert_eq!(scramble.display(), "Education & Training");
        assert_eq!(scramble.state(), ScrambleState::Idle);
    }

    #[test]
    fn reveal_length_is_independent_of_draws() {
        for text in ["", "A", "Sharath", "System Snapshots"] {
            let expected = Scramble::ticks_to_reveal(text.chars().count());
            for seed in 0..8 {
                let mut scramble = Scramble::new(text, seed);
                scramble.hover_enter();
                assert_eq!(run_to_end(&mut scramble), expected, "text {text:?}");
                assert_eq!(scramble.display(), text);
                assert_eq!(scramble.state(), ScrambleState::Idle);
            }
        }
    }

    #[test]
    fn revealed_prefix_grows_every_third_beat() {
        let text = "KULKARNI";
        let mut scramble = Scramble::new(text, 11);
        scramble.hover_enter();
        for beat in 0..(text.len() * 3) {
            assert_eq!(scramble.tick(), Tick::Running);
            let revealed = beat.div_ceil(3);
            let shown: Vec<char> = scramble.display().chars().collect();
            assert_eq!(shown.len(), text.len());
            assert_eq!(&scramble.display()[..revealed], &text[..revealed]);
            for c in &shown[revealed..] {
                assert!(SCRAMBLE_GLYPHS.contains(*c));
            }
        }
        assert_eq!(scramble.tick(), Tick::Finished);
    }

    #[test]
    fn reentering_restarts_from_scratch() {
        let mut scramble = Scramble::new("OPS", 5);
        scramble.hover_enter();
        for _ in 0..6 {
            scramble.tick();
        }
        scramble.hover_leave();
        scramble.hover_enter();
        assert_eq!(scramble.state(), ScrambleState::Scrambling { ticks: 0 });
        assert_eq!(run_to_end(&mut scramble), Scramble::ticks_to_reveal(3));
    }

    #[test]
    fn multibyte_text_is_scrambled_per_character() {
        let text = "Master’s degree";
        let mut scramble = Scramble::new(text, 4);
        scramble.hover_enter();
        scramble.tick();
        assert_eq!(scramble.display().chars().count(), text.chars().count());
        assert_eq!(run_to_end(&mut scramble) + 1, Scramble::ticks_to_reveal(15));
        assert_eq!(scramble.display(), text);
    }
}
