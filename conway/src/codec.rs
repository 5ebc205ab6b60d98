// codec.rs - Compact, URL-safe text form of a Board
//
// The format is "{width}-{height}-{runs}". `runs` is a sequence of base-36
// digit pairs, each pair being (dead run, live run) over the row-major cell
// stream. One digit holds at most 35, so a run that reaches 35 is written
// out immediately and counting starts over.

use crate::grid::Board;
use std::str::FromStr;
use thiserror::Error;

const RADIX: u32 = 36;
const MAX_RUN: u32 = RADIX - 1;

/// Why an encoded board was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected 3 '-' separated parts, found {0}")]
    PartCount(usize),
    #[error("invalid dimension {0:?}: expected a positive integer")]
    Dimension(String),
    #[error("invalid run digit {0:?}")]
    RunDigit(char),
    #[error("runs describe {actual} cells, board needs {expected}")]
    CellCount { expected: usize, actual: usize },
}

fn digit(run: u32) -> char {
    // run never exceeds MAX_RUN
    char::from_digit(run, RADIX).unwrap_or('z')
}

/// Encodes `board` into its run-length string.
pub fn encode(board: &Board) -> String {
    let mut runs = String::new();
    let mut push = |zeros: u32, ones: u32| {
        runs.push(digit(zeros));
        runs.push(digit(ones));
    };

    let mut zeros = 0;
    let mut ones = 0;
    let mut counting_zeros = true;

    for &alive in board.cells() {
        if counting_zeros {
            if alive {
                counting_zeros = false;
                ones = 1;
            } else {
                zeros += 1;
            }
        } else if alive {
            ones += 1;
        } else {
            push(zeros, ones);
            zeros = 1;
            ones = 0;
            counting_zeros = true;
        }

        if counting_zeros && zeros == MAX_RUN {
            push(zeros, 0);
            zeros = 0;
        } else if !counting_zeros && ones == MAX_RUN {
            push(zeros, ones);
            zeros = 0;
            ones = 0;
            counting_zeros = true;
        }
    }

    if zeros > 0 || ones > 0 {
        push(zeros, ones);
    }

    format!("{}-{}-{}", board.width(), board.height(), runs)
}

fn parse_dimension(text: &str) -> Result<usize, DecodeError> {
    let invalid = || DecodeError::Dimension(text.to_owned());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match text.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid()),
    }
}

/// Decodes a run-length string, reporting why it was rejected.
pub fn try_decode(text: &str) -> Result<Board, DecodeError> {
    let parts: Vec<&str> = text.split('-').collect();
    let [width, height, runs] = parts[..] else {
        return Err(DecodeError::PartCount(parts.len()));
    };

    let width = parse_dimension(width)?;
    let height = parse_dimension(height)?;
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| DecodeError::Dimension(format!("{width}x{height}")))?;

    let mut cells = Vec::with_capacity(expected.min(runs.len().saturating_mul(MAX_RUN as usize)));
    for (position, c) in runs.chars().enumerate() {
        let run = c.to_digit(RADIX).ok_or(DecodeError::RunDigit(c))? as usize;
        let alive = position % 2 == 1;
        if cells.len() + run > expected {
            return Err(DecodeError::CellCount {
                expected,
                actual: cells.len() + run,
            });
        }
        cells.extend(std::iter::repeat_n(alive, run));
    }

    if cells.len() != expected {
        return Err(DecodeError::CellCount {
            expected,
            actual: cells.len(),
        });
    }
    Ok(Board::from_cells(width, height, cells))
}

/// Decodes a run-length string; any malformed input gives `None`.
pub fn decode(text: &str) -> Option<Board> {
    try_decode(text).ok()
}

impl FromStr for Board {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_decode(s)
    }
}
