//! Calculator engine.
//!
//! A four-function calculator whose state is a handful of strings. A result
//! equal to [`SECRET_SENTINEL`] is reported to the caller as
//! [`CalcSignal::SecretAccess`]; scheduling the delayed vault prompt is the
//! caller's job.

use std::collections::VecDeque;
use std::time::Duration;

use calcvault_types::Operator;

/// Displayed result that opens the vault prompt.
pub const SECRET_SENTINEL: &str = "1337";
/// Maximum number of retained history entries.
pub const HISTORY_LIMIT: usize = 10;
/// Delay between producing the sentinel and opening the vault prompt.
pub const SECRET_ACCESS_DELAY: Duration = Duration::from_secs(1);

/// Side effect requested by a calculator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CalcSignal {
    Quiet,
    SecretAccess,
}

impl CalcSignal {
    fn for_result(result: &str) -> Self {
        if result == SECRET_SENTINEL {
            CalcSignal::SecretAccess
        } else {
            CalcSignal::Quiet
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    pending_value: Option<String>,
    pending_operator: Option<Operator>,
    awaiting_operand: bool,
    /// Most recent first.
    history: VecDeque<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending_value: None,
            pending_operator: None,
            awaiting_operand: false,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[must_use]
    pub fn pending_value(&self) -> Option<&str> {
        self.pending_value.as_deref()
    }

    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    #[must_use]
    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_operand
    }

    /// History entries, most recent first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Append a digit (`0..=9`). Other characters are ignored.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.awaiting_operand {
            self.display = digit.to_string();
            self.awaiting_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    /// Start the fractional part. A second decimal point is ignored.
    pub fn input_decimal(&mut self) {
        if self.awaiting_operand {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn input_operator(&mut self, op: Operator) -> CalcSignal {
        let mut signal = CalcSignal::Quiet;
        match (self.pending_value.as_deref(), self.pending_operator) {
            (None, _) => self.pending_value = Some(self.display.clone()),
            (Some(pending), Some(pending_op)) => {
                let result = format_number(apply(
                    pending_op,
                    parse_number(pending),
                    parse_number(&self.display),
                ));
                signal = CalcSignal::for_result(&result);
                self.display.clone_from(&result);
                self.pending_value = Some(result);
            }
            (Some(_), None) => {}
        }
        self.awaiting_operand = true;
        self.pending_operator = Some(op);
        signal
    }

    /// Complete the pending operation. Does nothing without one.
    pub fn evaluate(&mut self) -> CalcSignal {
        let (Some(pending), Some(op)) = (self.pending_value.as_deref(), self.pending_operator)
        else {
            return CalcSignal::Quiet;
        };
        let result = format_number(apply(op, parse_number(pending), parse_number(&self.display)));
        let entry = format!("{pending} {op} {} = {result}", self.display);
        self.pending_value = None;
        self.pending_operator = None;
        self.push_history(entry);
        self.display.clone_from(&result);
        self.awaiting_operand = true;
        CalcSignal::for_result(&result)
    }

    pub fn negate(&mut self) {
        self.display = format_number(-parse_number(&self.display));
    }

    pub fn percent(&mut self) {
        self.display = format_number(parse_number(&self.display) / 100.0);
    }

    /// Reset to the initial state. History is kept.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.pending_value = None;
        self.pending_operator = None;
        self.awaiting_operand = false;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn push_history(&mut self, entry: String) {
        self.history.push_front(entry);
        self.history.truncate(HISTORY_LIMIT);
    }
}

/// Apply a binary operator. Division by zero yields `0`.
#[must_use]
pub fn apply(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b == 0.0 {
                0.0
            } else {
                a / b
            }
        }
        Operator::Equals => b,
    }
}

/// Parse a display string. Anything unparseable reads as `0`.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Shortest round-trip decimal form, using exponent notation for very large
/// and very small magnitudes (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    format!("{value}")
}
