use injector::Injector;
use injector_macros::Wireable;

#[derive(Wireable)]
enum State {
    Idle,
    Busy,
}

fn main() {
    let injector = Injector::new();

    let mut state = State::Idle;
    injector.apply(&mut state).unwrap();
    assert!(matches!(state, State::Idle));

    let mut state = State::Busy;
    injector.apply(&mut state).unwrap();
    assert!(matches!(state, State::Busy));
}
