//! FILENAME: core/engine/src/memory.rs
//! PURPOSE: Memory accumulator, bounded calculation history, and variables.
//! CONTEXT: One instance per session. The accumulator is a single scalar
//! mutated in place; history is a FIFO-bounded log of past calculations;
//! variables are a name-to-value table. A failed mutation (divide by zero)
//! leaves the stored value unchanged.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Default number of history entries to keep.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One past calculation: the expression text and its formatted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Memory, history, and variable storage for one calculator session.
#[derive(Debug)]
pub struct CalculatorMemory {
    /// The memory accumulator.
    memory: f64,
    /// Past calculations, oldest at the front.
    history: VecDeque<HistoryEntry>,
    /// Maximum number of history entries.
    capacity: usize,
    /// Named variables.
    variables: HashMap<String, f64>,
}

impl CalculatorMemory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a store whose history keeps at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        CalculatorMemory {
            memory: 0.0,
            history: VecDeque::with_capacity(capacity),
            capacity,
            variables: HashMap::new(),
        }
    }

    // ==================== Accumulator ====================

    /// Stores a value in memory.
    pub fn store(&mut self, value: f64) {
        self.memory = value;
    }

    /// Recalls the value in memory.
    pub fn recall(&self) -> f64 {
        self.memory
    }

    /// Clears memory back to zero.
    pub fn clear(&mut self) {
        self.memory = 0.0;
    }

    /// Adds to the value in memory.
    pub fn add(&mut self, value: f64) {
        self.memory += value;
    }

    /// Subtracts from the value in memory.
    pub fn subtract(&mut self, value: f64) {
        self.memory -= value;
    }

    /// Multiplies the value in memory.
    pub fn multiply(&mut self, value: f64) {
        self.memory *= value;
    }

    /// Divides the value in memory. Rejects a zero divisor, leaving the
    /// stored value untouched.
    pub fn divide(&mut self, value: f64) -> Result<()> {
        if value == 0.0 {
            return Err(CalcError::domain("Cannot divide memory by zero"));
        }
        self.memory /= value;
        Ok(())
    }

    // ==================== History ====================

    /// Appends a calculation to the history, evicting the oldest entry
    /// once the capacity is reached.
    pub fn add_to_history(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            expression: expression.into(),
            result: result.into(),
        });
    }

    /// Returns history entries oldest-first. A limit of `None` returns
    /// everything; `Some(n)` returns only the most recent n entries.
    pub fn history(&self, limit: Option<usize>) -> Vec<&HistoryEntry> {
        let skip = match limit {
            Some(n) => self.history.len().saturating_sub(n),
            None => 0,
        };
        self.history.iter().skip(skip).collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.capacity
    }

    /// Clears the calculation history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ==================== Variables ====================

    /// Stores a named variable, overwriting any previous value.
    pub fn store_variable(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    /// Recalls a named variable.
    pub fn recall_variable(&self, name: &str) -> Result<f64> {
        self.variables
            .get(name)
            .copied()
            .ok_or_else(|| CalcError::not_found(name))
    }

    /// Lists all variables sorted by name.
    pub fn variables(&self) -> Vec<(&str, f64)> {
        let mut list: Vec<(&str, f64)> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        list.sort_by(|a, b| a.0.cmp(b.0));
        list
    }

    /// Removes all variables.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }
}

impl Default for CalculatorMemory {
    fn default() -> Self {
        Self::new()
    }
}
