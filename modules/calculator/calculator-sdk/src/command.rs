use crate::errors::{CalculatorError, Operand};
use crate::models::{Operation, UnknownOperation};

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `quit`, `exit` or `q`.
    Quit,
    /// `<operation> <a> <b>`.
    Calculate { operation: Operation, a: i64, b: i64 },
}

impl Command {
    const QUIT_WORDS: [&'static str; 3] = ["quit", "exit", "q"];

    /// Parse a line of the form `<operation> <a> <b>`.
    ///
    /// The operation is matched case-insensitively; tokens after the third
    /// are ignored.
    ///
    /// # Errors
    /// - [`CalculatorError::InvalidInput`] for fewer than three tokens
    /// - [`CalculatorError::UnknownOperation`] for an unsupported operation
    /// - [`CalculatorError::InvalidOperand`] naming the operand that is not an integer
    pub fn parse(input: &str) -> Result<Self, CalculatorError> {
        let line = input.trim();
        if Self::QUIT_WORDS.contains(&line) {
            return Ok(Self::Quit);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [op, a, b, ..] = parts.as_slice() else {
            return Err(CalculatorError::InvalidInput);
        };

        let operation = op
            .to_lowercase()
            .parse::<Operation>()
            .map_err(|UnknownOperation(name)| CalculatorError::UnknownOperation(name))?;

        let a = a
            .parse::<i64>()
            .map_err(|e| CalculatorError::invalid_operand(Operand::First, e))?;
        let b = b
            .parse::<i64>()
            .map_err(|e| CalculatorError::invalid_operand(Operand::Second, e))?;

        Ok(Self::Calculate { operation, a, b })
    }
}
