//! Two-operand arithmetic.
//!
//! Accepts exactly `<int> <op> <int>` with non-negative integer literals and
//! `op` one of `+ - * /`. Nothing else is evaluated.

use std::fmt;

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Not of the form `<int> <op> <int>`.
    #[error("malformed expression: {0:?}")]
    Malformed(String),
    /// An operand does not fit in 64 bits.
    #[error("number out of range: {0}")]
    OutOfRange(String),
    /// Right operand of `/` was zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

/// A parsed `<int> <op> <int>` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    /// Left operand.
    pub left: u64,
    /// Operator.
    pub op: Operator,
    /// Right operand.
    pub right: u64,
}

impl Expression {
    /// Parses `input`. Whitespace around the operator and at the ends is allowed.
    ///
    /// # Errors
    ///
    /// [`CalcError::Malformed`] for anything other than two unsigned integer
    /// literals around one operator, [`CalcError::OutOfRange`] if a literal
    /// overflows `u64`.
    pub fn parse(input: &str) -> Result<Self, CalcError> {
        let malformed = || CalcError::Malformed(input.to_string());
        let trimmed = input.trim();
        let (at, symbol) = trimmed
            .char_indices()
            .find(|&(i, c)| i > 0 && Operator::from_char(c).is_some())
            .ok_or_else(malformed)?;
        let op = Operator::from_char(symbol).ok_or_else(malformed)?;
        let left = operand(trimmed[..at].trim(), input)?;
        let right = operand(trimmed[at + symbol.len_utf8()..].trim(), input)?;
        Ok(Self { left, op, right })
    }

    /// Computes the value.
    ///
    /// # Errors
    ///
    /// [`CalcError::DivisionByZero`] when dividing by zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn eval(&self) -> Result<f64, CalcError> {
        let (left, right) = (self.left as f64, self.right as f64);
        match self.op {
            Operator::Add => Ok(left + right),
            Operator::Sub => Ok(left - right),
            Operator::Mul => Ok(left * right),
            Operator::Div if self.right == 0 => Err(CalcError::DivisionByZero),
            Operator::Div => Ok(left / right),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.symbol(), self.right)
    }
}

fn operand(digits: &str, input: &str) -> Result<u64, CalcError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::Malformed(input.to_string()));
    }
    digits.parse().map_err(|_| CalcError::OutOfRange(digits.to_string()))
}

/// Parses and evaluates `input`.
///
/// # Errors
///
/// See [`Expression::parse`] and [`Expression::eval`].
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    Expression::parse(input)?.eval()
}

/// Renders a result, dropping the fractional part when it is zero.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
