use std::io::{self, Write};

/// Short audio cues played by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Cue {
    Start,
    Click,
    End,
    Reset,
}

impl Cue {
    /// Pitch and length of the retro square-wave beep for this cue.
    pub fn tone(&self) -> (u32, u32) {
        match self {
            Cue::Start => (660, 60),
            Cue::Click => (880, 35),
            Cue::End => (220, 120),
            Cue::Reset => (520, 60),
        }
    }
}

pub trait Beeper {
    fn beep(&mut self, cue: Cue);
}

impl<B: Beeper + ?Sized> Beeper for Box<B> {
    fn beep(&mut self, cue: Cue) {
        (**self).beep(cue)
    }
}

/// Rings the terminal bell. Terminals cannot vary pitch, so every cue sounds alike.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Beeper for TerminalBell {
    fn beep(&mut self, _cue: Cue) {
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl Beeper for Silent {
    fn beep(&mut self, _cue: Cue) {}
}

/// Keeps played cues for inspection.
#[derive(Debug, Default)]
pub struct RecordingBeeper {
    pub played: Vec<Cue>,
}

impl Beeper for RecordingBeeper {
    fn beep(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
