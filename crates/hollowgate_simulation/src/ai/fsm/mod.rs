//! Generic FSM engine (transition tables + any-state list)
//!
//! Машина хранит только id текущего состояния (`S`) и таблицы переходов.
//! Данные состояний и их enter/exit/tick живут в host'е (`StateHost`),
//! предикаты — чистые `fn(&H) -> bool` без side effects.
//!
//! Порядок в `tick()`:
//! 1. any-state переходы (в порядке регистрации, первый match)
//! 2. переходы текущего состояния (в порядке регистрации, первый match)
//! 3. `tick_state(current)` — всегда, даже если переход сработал
//!
//! За один tick срабатывает максимум один переход.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Предикат перехода: чистое чтение состояния host'а
pub type Predicate<H> = fn(&H) -> bool;

/// Lifecycle hooks состояний (dispatch по id)
pub trait StateHost<S> {
    fn enter_state(&mut self, state: S);
    fn exit_state(&mut self, state: S);
    fn tick_state(&mut self, state: S);
}

/// Переход: (целевое состояние, предикат)
pub struct Transition<S, H> {
    pub to: S,
    pub predicate: Predicate<H>,
}

impl<S: Copy, H> Clone for Transition<S, H> {
    fn clone(&self) -> Self {
        Self {
            to: self.to,
            predicate: self.predicate,
        }
    }
}

/// Запись о смене состояния (для observers: анимация, UI, логи)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange<S> {
    /// None только для самого первого входа в initial state
    pub from: Option<S>,
    pub to: S,
}

/// Builder — регистрация переходов только на этапе конструирования
pub struct StateMachineBuilder<S, H> {
    transitions: HashMap<S, Vec<Transition<S, H>>>,
    any: Vec<Transition<S, H>>,
    terminal: Option<S>,
}

impl<S, H> Default for StateMachineBuilder<S, H> {
    fn default() -> Self {
        Self {
            transitions: HashMap::new(),
            any: Vec::new(),
            terminal: None,
        }
    }
}

impl<S: Copy + Eq + Hash + fmt::Debug, H: StateHost<S>> StateMachineBuilder<S, H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transition(mut self, from: S, to: S, predicate: Predicate<H>) -> Self {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition { to, predicate });
        self
    }

    pub fn add_any_transition(mut self, to: S, predicate: Predicate<H>) -> Self {
        self.any.push(Transition { to, predicate });
        self
    }

    /// Terminal state: вход в него выключает машину навсегда
    pub fn terminal(mut self, state: S) -> Self {
        self.terminal = Some(state);
        self
    }

    /// Завершает конструирование входом в initial state
    pub fn build(self, initial: S, host: &mut H) -> StateMachine<S, H> {
        let mut machine = StateMachine {
            current: initial,
            transitions: self.transitions,
            any: self.any,
            terminal: self.terminal,
            enabled: true,
            changes: Vec::new(),
        };

        host.enter_state(initial);
        machine.changes.push(StateChange {
            from: None,
            to: initial,
        });
        if machine.terminal == Some(initial) {
            machine.enabled = false;
        }

        machine
    }
}

pub struct StateMachine<S, H> {
    current: S,
    transitions: HashMap<S, Vec<Transition<S, H>>>,
    any: Vec<Transition<S, H>>,
    terminal: Option<S>,
    enabled: bool,
    changes: Vec<StateChange<S>>,
}

impl<S: Copy + Eq + Hash + fmt::Debug, H: StateHost<S>> StateMachine<S, H> {
    pub fn builder() -> StateMachineBuilder<S, H> {
        StateMachineBuilder::new()
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// exit(old) → current = new → enter(new) → notify
    ///
    /// No-op если `state == current` (защита от flapping предикатов).
    pub fn set_state(&mut self, state: S, host: &mut H) {
        if state == self.current {
            return;
        }

        let previous = self.current;
        host.exit_state(previous);
        self.current = state;
        host.enter_state(state);

        self.changes.push(StateChange {
            from: Some(previous),
            to: state,
        });

        if self.terminal == Some(state) {
            self.enabled = false;
        }
    }

    pub fn tick(&mut self, host: &mut H) {
        if !self.enabled {
            return;
        }

        if let Some(next) = self.find_transition(host) {
            self.set_state(next, host);
        }

        host.tick_state(self.current);
    }

    /// Накопленные смены состояния с прошлого drain
    pub fn drain_changes(&mut self) -> Vec<StateChange<S>> {
        std::mem::take(&mut self.changes)
    }

    fn find_transition(&self, host: &H) -> Option<S> {
        if let Some(transition) = self.any.iter().find(|t| (t.predicate)(host)) {
            return Some(transition.to);
        }

        self.transitions
            .get(&self.current)
            .and_then(|list| list.iter().find(|t| (t.predicate)(host)))
            .map(|t| t.to)
    }
}

impl<S: fmt::Debug, H> fmt::Debug for StateMachine<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("enabled", &self.enabled)
            .field("terminal", &self.terminal)
            .field("any_transitions", &self.any.len())
            .finish()
    }
}

// Tests (separate file with _tests suffix)
#[cfg(test)]
mod fsm_tests;
