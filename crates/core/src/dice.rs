//! Dice expression rolling and the injectable dice service.
//!
//! All randomness in the engine flows through [`DiceService`] so an entire
//! encounter can be replayed byte-for-byte by swapping in a deterministic
//! implementation. Expressions use `NdS` notation with an optional trailing
//! modifier (`"3d6+2"`, `"d20"`, `"2d8-1"`). A bare integer expression such
//! as `"20"` is a guaranteed roll of that value, which callers use to pin a
//! result (fixed hit points, scripted encounters).

use std::cell::Cell;
use std::fmt;

use rand::Rng;

/// Error raised for malformed dice expressions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("invalid dice expression: {0:?} (use dn or ndn format like 'd6', '3d6', or '3d6-2')")]
    InvalidExpression(String),
}

/// Structured result of rolling a dice expression.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiceRoll {
    pub num_dice: u32,
    pub num_sides: i32,
    /// Sum of the raw dice, before any modifier.
    pub total: i32,
    pub modifier: i32,
    pub total_with_modifier: i32,
    pub rolls: Vec<i32>,
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.num_dice, self.num_sides)?;
        match self.modifier {
            m if m > 0 => write!(f, "+{m}"),
            m if m < 0 => write!(f, "{m}"),
            _ => Ok(()),
        }
    }
}

/// Parsed form of a dice expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Notation {
    /// `"3d6+2"`: roll `num_dice` dice with `num_sides` sides.
    Dice {
        num_dice: u32,
        num_sides: i32,
        modifier: i32,
    },
    /// `"20"`: a guaranteed roll of the given value.
    Literal(i32),
}

fn parse_notation(notation: &str) -> Result<Notation, DiceError> {
    let cleaned: String = notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    if let Ok(value) = cleaned.parse::<i32>() {
        return Ok(Notation::Literal(value));
    }

    let invalid = || DiceError::InvalidExpression(notation.to_string());
    let (dice_part, rest) = cleaned.split_once('d').ok_or_else(invalid)?;
    let num_dice: u32 = if dice_part.is_empty() {
        1
    } else {
        dice_part.parse().map_err(|_| invalid())?
    };

    let (sides_part, modifier) = if let Some(idx) = rest.find(['+', '-']) {
        let (sides, modifier) = rest.split_at(idx);
        (sides, modifier.parse::<i32>().map_err(|_| invalid())?)
    } else {
        (rest, 0)
    };
    let num_sides: i32 = sides_part.parse().map_err(|_| invalid())?;
    if num_dice == 0 || num_sides <= 0 {
        return Err(invalid());
    }

    Ok(Notation::Dice {
        num_dice,
        num_sides,
        modifier,
    })
}

/// Source of all random rolls used by the combat engine and entities.
///
/// Implementations must be internally synchronized for `&self` rolling; the
/// engine is single-threaded, so a `Cell`-based cursor suffices.
pub trait DiceService {
    /// Roll `notation` with an extra modifier added on top of any modifier
    /// embedded in the expression itself.
    fn roll_with_modifier(&self, notation: &str, modifier: i32) -> Result<DiceRoll, DiceError>;

    /// Roll `notation` as written.
    fn roll(&self, notation: &str) -> Result<DiceRoll, DiceError> {
        self.roll_with_modifier(notation, 0)
    }
}

/// Production dice service backed by the process RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct BxDiceService;

impl BxDiceService {
    pub fn new() -> Self {
        Self
    }
}

impl DiceService for BxDiceService {
    fn roll_with_modifier(&self, notation: &str, modifier: i32) -> Result<DiceRoll, DiceError> {
        match parse_notation(notation)? {
            Notation::Literal(value) => Ok(DiceRoll {
                num_dice: 1,
                num_sides: value,
                total: value,
                modifier,
                total_with_modifier: value + modifier,
                rolls: vec![value],
            }),
            Notation::Dice {
                num_dice,
                num_sides,
                modifier: embedded,
            } => {
                let mut rng = rand::rng();
                let rolls: Vec<i32> = (0..num_dice)
                    .map(|_| rng.random_range(1..=num_sides))
                    .collect();
                let total: i32 = rolls.iter().sum();
                let modifier = embedded + modifier;
                tracing::debug!(notation, total, modifier, "rolled dice");
                Ok(DiceRoll {
                    num_dice,
                    num_sides,
                    total,
                    modifier,
                    total_with_modifier: total + modifier,
                    rolls,
                })
            }
        }
    }
}

/// Deterministic dice service that replays a fixed sequence of roll totals.
///
/// Each non-literal roll consumes the next queued value as the raw total;
/// the sequence wraps around when exhausted so a long encounter can never
/// fall back to real randomness mid-run. Integer-literal expressions keep
/// their guaranteed value and do not consume from the queue.
#[derive(Debug)]
pub struct FixedDiceService {
    totals: Vec<i32>,
    cursor: Cell<usize>,
}

impl FixedDiceService {
    pub fn new(totals: impl Into<Vec<i32>>) -> Self {
        Self {
            totals: totals.into(),
            cursor: Cell::new(0),
        }
    }

    fn next_total(&self) -> Option<i32> {
        if self.totals.is_empty() {
            return None;
        }
        let idx = self.cursor.get();
        self.cursor.set(idx + 1);
        Some(self.totals[idx % self.totals.len()])
    }
}

impl DiceService for FixedDiceService {
    fn roll_with_modifier(&self, notation: &str, modifier: i32) -> Result<DiceRoll, DiceError> {
        match parse_notation(notation)? {
            Notation::Literal(value) => Ok(DiceRoll {
                num_dice: 1,
                num_sides: value,
                total: value,
                modifier,
                total_with_modifier: value + modifier,
                rolls: vec![value],
            }),
            Notation::Dice {
                num_dice,
                num_sides,
                modifier: embedded,
            } => {
                // An empty queue yields minimum rolls, keeping tests total.
                let total = self.next_total().unwrap_or(num_dice as i32);
                let modifier = embedded + modifier;
                Ok(DiceRoll {
                    num_dice,
                    num_sides,
                    total,
                    modifier,
                    total_with_modifier: total + modifier,
                    rolls: vec![total],
                })
            }
        }
    }
}
