use macroquad::input::KeyCode;
use platformer_rendering::FrameInput;
use platformer_rendering_macroquad::frame_input_from_keys;

fn input_for(held: &[KeyCode]) -> FrameInput {
    frame_input_from_keys(|key| held.contains(&key))
}

#[test]
fn no_keys_produce_idle_input() {
    assert_eq!(input_for(&[]), FrameInput::default());
}

#[test]
fn arrows_and_wasd_move() {
    assert!(input_for(&[KeyCode::Left]).left);
    assert!(input_for(&[KeyCode::A]).left);
    assert!(input_for(&[KeyCode::Right]).right);
    assert!(input_for(&[KeyCode::D]).right);
    assert!(input_for(&[KeyCode::Up]).jump);
    assert!(input_for(&[KeyCode::W]).jump);
}

#[test]
fn space_and_enter_only_confirm() {
    let space = input_for(&[KeyCode::Space]);
    assert!(space.confirm);
    assert!(!space.jump);

    let enter = input_for(&[KeyCode::Enter]);
    assert!(enter.confirm);
    assert!(!enter.jump);
}
