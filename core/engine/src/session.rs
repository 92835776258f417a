//! FILENAME: core/engine/src/session.rs
//! PURPOSE: The calculator session: angle mode plus memory in one object.
//! CONTEXT: Shells construct one Session and route every operation through
//! it. There is no ambient state anywhere in the engine; a host that wants
//! several independent calculators simply creates several sessions.

use crate::angle::AngleMode;
use crate::error::Result;
use crate::evaluator;
use crate::memory::{CalculatorMemory, DEFAULT_HISTORY_CAPACITY};
use crate::registry;

/// One calculator session.
#[derive(Debug)]
pub struct Session {
    angle_mode: AngleMode,
    memory: CalculatorMemory,
}

impl Session {
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a session whose history keeps at most `capacity` entries.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Session {
            angle_mode: AngleMode::default(),
            memory: CalculatorMemory::with_capacity(capacity),
        }
    }

    // ==================== Angle mode ====================

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    // ==================== Evaluation ====================

    /// Runs a registry operation under the session's current angle mode.
    pub fn evaluate(&self, category: &str, operation: &str, args: &[f64]) -> Result<f64> {
        registry::evaluate(category, operation, args, self.angle_mode)
    }

    /// Evaluates a textual expression under the session's current angle mode.
    pub fn evaluate_expression(&self, text: &str) -> Result<f64> {
        evaluator::evaluate_expression(text, self.angle_mode)
    }

    // ==================== Memory ====================

    pub fn memory(&self) -> &CalculatorMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut CalculatorMemory {
        &mut self.memory
    }

    /// Resets the session to its initial state: degree mode, zero memory,
    /// empty history and variables. The history capacity is preserved.
    pub fn reset(&mut self) {
        let capacity = self.memory.history_capacity();
        self.angle_mode = AngleMode::default();
        self.memory = CalculatorMemory::with_capacity(capacity);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
