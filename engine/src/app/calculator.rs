//! Calculator screen operations.

use tracing::debug;

use calcvault_core::{CalcSignal, SECRET_ACCESS_DELAY, TimerKind};
use calcvault_types::Operator;

use super::App;

impl App {
    pub fn calc_digit(&mut self, digit: char) {
        self.calculator.input_digit(digit);
    }

    pub fn calc_decimal(&mut self) {
        self.calculator.input_decimal();
    }

    pub fn calc_operator(&mut self, op: Operator) {
        let signal = self.calculator.input_operator(op);
        self.handle_calc_signal(signal);
    }

    pub fn calc_evaluate(&mut self) {
        let signal = self.calculator.evaluate();
        self.handle_calc_signal(signal);
    }

    pub fn calc_negate(&mut self) {
        self.calculator.negate();
    }

    pub fn calc_percent(&mut self) {
        self.calculator.percent();
    }

    pub fn calc_clear(&mut self) {
        self.calculator.clear();
    }

    pub fn toggle_history(&mut self) {
        self.view.show_history = !self.view.show_history;
    }

    pub fn clear_history(&mut self) {
        self.calculator.clear_history();
    }

    /// One pending vault prompt at a time: repeated sentinels before it fires
    /// don't stack.
    fn handle_calc_signal(&mut self, signal: CalcSignal) {
        if signal != CalcSignal::SecretAccess {
            return;
        }
        if self.navigator.is_pending(TimerKind::SecretAccess) {
            debug!("Secret access already pending");
            return;
        }
        self.navigator
            .schedule(TimerKind::SecretAccess, self.clock, SECRET_ACCESS_DELAY);
    }
}
