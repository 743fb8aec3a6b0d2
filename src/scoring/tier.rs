use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank classification. Variants are declared lowest first so the derived
/// ordering gives `S > A > B > C > D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    D,
    C,
    B,
    A,
    S,
}

impl Tier {
    /// Highest tier first.
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    pub fn from_score(total_score: u32) -> Self {
        if total_score >= 90 {
            Tier::S
        } else if total_score >= 75 {
            Tier::A
        } else if total_score >= 60 {
            Tier::B
        } else if total_score >= 40 {
            Tier::C
        } else {
            Tier::D
        }
    }

    pub fn min_score(self) -> u32 {
        match self {
            Tier::S => 90,
            Tier::A => 75,
            Tier::B => 60,
            Tier::C => 40,
            Tier::D => 0,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "Legend",
            Tier::A => "Elite",
            Tier::B => "Advanced",
            Tier::C => "Rising",
            Tier::D => "Newbie",
        }
    }

    /// Hex color token for presentation layers.
    pub fn color(self) -> &'static str {
        match self {
            Tier::S => "#facc15",
            Tier::A => "#b983ff",
            Tier::B => "#00e5ff",
            Tier::C => "#39ff14",
            Tier::D => "#9ca3af",
        }
    }

    pub fn ansi(self) -> &'static str {
        match self {
            Tier::S => "\x1b[1;93m",
            Tier::A => "\x1b[1;95m",
            Tier::B => "\x1b[1;96m",
            Tier::C => "\x1b[92m",
            Tier::D => "\x1b[90m",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}
