//! Tests for the generic FSM engine.

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Light {
    Green,
    Yellow,
    Red,
    Broken,
}

/// Toy host: флаги для предикатов + журнал lifecycle вызовов
#[derive(Default)]
struct Host {
    go_yellow: bool,
    go_red: bool,
    emergency: bool,
    journal: Vec<String>,
}

impl StateHost<Light> for Host {
    fn enter_state(&mut self, state: Light) {
        self.journal.push(format!("enter {:?}", state));
    }

    fn exit_state(&mut self, state: Light) {
        self.journal.push(format!("exit {:?}", state));
    }

    fn tick_state(&mut self, state: Light) {
        self.journal.push(format!("tick {:?}", state));
    }
}

fn build(host: &mut Host) -> StateMachine<Light, Host> {
    StateMachine::builder()
        .add_any_transition(Light::Broken, |h: &Host| h.emergency)
        .add_transition(Light::Green, Light::Yellow, |h: &Host| h.go_yellow)
        .add_transition(Light::Yellow, Light::Red, |h: &Host| h.go_red)
        // Вторая регистрация из Green — проигрывает первой
        .add_transition(Light::Green, Light::Red, |h: &Host| h.go_red)
        .terminal(Light::Broken)
        .build(Light::Green, host)
}

#[test]
fn test_build_enters_initial_state() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    assert_eq!(fsm.current(), Light::Green);
    assert_eq!(host.journal, vec!["enter Green"]);
    assert_eq!(
        fsm.drain_changes(),
        vec![StateChange {
            from: None,
            to: Light::Green
        }]
    );
}

#[test]
fn test_transition_order_exit_enter_tick() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);
    host.journal.clear();

    host.go_yellow = true;
    fsm.tick(&mut host);

    assert_eq!(fsm.current(), Light::Yellow);
    assert_eq!(host.journal, vec!["exit Green", "enter Yellow", "tick Yellow"]);
}

#[test]
fn test_single_transition_per_tick() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    // Green→Yellow и Yellow→Red оба выполнимы — но за tick только один шаг
    host.go_yellow = true;
    host.go_red = true;
    fsm.tick(&mut host);
    assert_eq!(fsm.current(), Light::Yellow);

    fsm.tick(&mut host);
    assert_eq!(fsm.current(), Light::Red);
}

#[test]
fn test_registration_order_first_match_wins() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    host.go_yellow = true;
    host.go_red = true;
    fsm.tick(&mut host);

    // Green→Yellow зарегистрирован раньше Green→Red
    assert_eq!(fsm.current(), Light::Yellow);
}

#[test]
fn test_any_state_has_priority() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    host.go_yellow = true;
    host.emergency = true;
    fsm.tick(&mut host);

    assert_eq!(fsm.current(), Light::Broken);
}

#[test]
fn test_terminal_state_disables_machine() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    host.emergency = true;
    fsm.tick(&mut host);
    assert!(!fsm.is_enabled());
    host.journal.clear();

    host.emergency = false;
    host.go_yellow = true;
    for _ in 0..5 {
        fsm.tick(&mut host);
    }

    assert_eq!(fsm.current(), Light::Broken);
    assert!(host.journal.is_empty(), "disabled machine must not tick states");
}

#[test]
fn test_set_state_same_state_is_noop() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);
    fsm.drain_changes();
    host.journal.clear();

    fsm.set_state(Light::Green, &mut host);

    assert!(host.journal.is_empty());
    assert!(fsm.drain_changes().is_empty());
}

#[test]
fn test_forced_terminal_state_outside_table() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);
    fsm.drain_changes();

    fsm.set_state(Light::Broken, &mut host);

    assert!(!fsm.is_enabled());
    assert_eq!(
        fsm.drain_changes(),
        vec![StateChange {
            from: Some(Light::Green),
            to: Light::Broken
        }]
    );
}

#[test]
fn test_state_without_transitions_just_ticks() {
    let mut host = Host::default();
    let mut fsm = build(&mut host);

    host.go_yellow = true;
    fsm.tick(&mut host);
    host.go_red = true;
    fsm.tick(&mut host);
    assert_eq!(fsm.current(), Light::Red);

    // Из Red переходов нет
    host.journal.clear();
    fsm.tick(&mut host);
    assert_eq!(fsm.current(), Light::Red);
    assert_eq!(host.journal, vec!["tick Red"]);
}
