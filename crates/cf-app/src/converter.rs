//! Two's-complement converter form.
//!
//! Same shape as the calculator form: plain state, a pure reducer, and the
//! conversion itself delegated to `cf_formula::binary`.

use cf_formula::{BitWidth, ErrorKind, SolveError, TwosComplement, binary};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    DecimalToBinary,
    BinaryToDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConverterStatus {
    Idle,
    Success(TwosComplement),
    Error { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterState {
    pub direction: Direction,
    pub width: BitWidth,
    pub input: String,
    pub status: ConverterStatus,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self {
            direction: Direction::DecimalToBinary,
            width: BitWidth::Eight,
            input: String::new(),
            status: ConverterStatus::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConverterAction {
    SetDirection(Direction),
    SetWidth(BitWidth),
    SetInput(String),
    Convert,
    Clear,
}

impl ConverterState {
    pub fn reduce(mut self, action: ConverterAction) -> Self {
        match action {
            ConverterAction::SetDirection(direction) => {
                if direction != self.direction {
                    self.direction = direction;
                    self.input.clear();
                }
                self.status = ConverterStatus::Idle;
            }
            ConverterAction::SetWidth(width) => {
                self.width = width;
                self.status = ConverterStatus::Idle;
            }
            ConverterAction::SetInput(input) => {
                // The binary field only accepts 0 and 1; anything else is dropped.
                if self.direction == Direction::BinaryToDecimal
                    && !input.chars().all(|c| c == '0' || c == '1')
                {
                    return self;
                }
                self.input = input;
                self.status = ConverterStatus::Idle;
            }
            ConverterAction::Convert => {
                self.status = match self.convert() {
                    Ok(out) => ConverterStatus::Success(out),
                    Err(err) => ConverterStatus::Error {
                        kind: err.kind(),
                        message: err.to_string(),
                    },
                };
            }
            ConverterAction::Clear => {
                return Self {
                    direction: self.direction,
                    width: self.width,
                    ..Self::default()
                };
            }
        }
        self
    }

    fn convert(&self) -> Result<TwosComplement, SolveError> {
        debug!(direction = ?self.direction, bits = self.width.bits(), "converting");
        match self.direction {
            Direction::DecimalToBinary => binary::encode(&self.input, self.width),
            Direction::BinaryToDecimal => binary::decode(&self.input, self.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: ConverterState, actions: Vec<ConverterAction>) -> ConverterState {
        actions.into_iter().fold(state, ConverterState::reduce)
    }

    #[test]
    fn encodes_negative_decimal() {
        let state = run(
            ConverterState::default(),
            vec![ConverterAction::SetInput("-42".into()), ConverterAction::Convert],
        );
        match state.status {
            ConverterStatus::Success(out) => assert_eq!(out.binary, "11010110"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn binary_input_ignores_other_characters() {
        let state = run(
            ConverterState::default(),
            vec![
                ConverterAction::SetDirection(Direction::BinaryToDecimal),
                ConverterAction::SetInput("1101".into()),
                ConverterAction::SetInput("1102".into()),
            ],
        );
        assert_eq!(state.input, "1101");
    }

    #[test]
    fn out_of_range_is_domain_error() {
        let state = run(
            ConverterState::default(),
            vec![
                ConverterAction::SetWidth(BitWidth::Four),
                ConverterAction::SetInput("8".into()),
                ConverterAction::Convert,
            ],
        );
        assert!(matches!(
            state.status,
            ConverterStatus::Error { kind: ErrorKind::Domain, .. }
        ));
    }

    #[test]
    fn clear_keeps_mode_and_width() {
        let state = run(
            ConverterState::default(),
            vec![
                ConverterAction::SetDirection(Direction::BinaryToDecimal),
                ConverterAction::SetWidth(BitWidth::Sixteen),
                ConverterAction::SetInput("1".into()),
                ConverterAction::Convert,
                ConverterAction::Clear,
            ],
        );
        assert_eq!(state.direction, Direction::BinaryToDecimal);
        assert_eq!(state.width, BitWidth::Sixteen);
        assert!(state.input.is_empty());
        assert_eq!(state.status, ConverterStatus::Idle);
    }
}
