//! Integration tests: winit events steering the scene camera through the dispatcher

use cube_starter::app::config::{GuiConfig, SceneConfig};
use cube_starter::app::events::EventDispatcher;
use cube_starter::scene::{RandomSeeds, Scene};
use winit::dpi::PhysicalPosition;
use winit::event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

fn device() -> DeviceId {
    // SAFETY: the id is only compared, never passed back to the platform
    unsafe { DeviceId::dummy() }
}

fn cursor_moved(x: f64, y: f64) -> WindowEvent {
    WindowEvent::CursorMoved {
        device_id: device(),
        position: PhysicalPosition::new(x, y),
    }
}

fn left_button(state: ElementState) -> WindowEvent {
    WindowEvent::MouseInput {
        device_id: device(),
        state,
        button: MouseButton::Left,
    }
}

fn scene_with_dispatcher(forward_gui_captured: bool) -> (Scene, EventDispatcher) {
    let scene = Scene::with_seeds(
        &SceneConfig::default(),
        &GuiConfig::default(),
        RandomSeeds::with_seed(7),
    );
    let mut dispatcher = EventDispatcher::new(1.0, forward_gui_captured);
    dispatcher.set_events_callbacks(scene.events_callbacks());
    (scene, dispatcher)
}

#[test]
fn test_left_drag_rotates_camera() {
    let (scene, mut dispatcher) = scene_with_dispatcher(true);

    dispatcher.handle_window_event(&cursor_moved(100.0, 100.0), false);
    dispatcher.handle_window_event(&left_button(ElementState::Pressed), false);
    dispatcher.handle_window_event(&cursor_moved(140.0, 100.0), false);
    dispatcher.handle_window_event(&left_button(ElementState::Released), false);

    let camera = scene.camera().borrow();
    assert!(camera.yaw < 0.0, "dragging right should turn the camera");
    assert!(!camera.is_dragging());
}

#[test]
fn test_moves_without_press_leave_camera_alone() {
    let (scene, mut dispatcher) = scene_with_dispatcher(true);
    let revision = scene.camera().borrow().revision();

    dispatcher.handle_window_event(&cursor_moved(10.0, 10.0), false);
    dispatcher.handle_window_event(&cursor_moved(50.0, 80.0), false);

    assert_eq!(scene.camera().borrow().revision(), revision);
}

#[test]
fn test_scroll_zooms_in() {
    let (scene, mut dispatcher) = scene_with_dispatcher(true);
    let before = scene.camera().borrow().distance;

    dispatcher.handle_window_event(
        &WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: TouchPhase::Moved,
        },
        false,
    );

    assert!(scene.camera().borrow().distance < before);
}

#[test]
fn test_camera_motion_resets_still_frames() {
    let (mut scene, mut dispatcher) = scene_with_dispatcher(true);
    scene.update();
    scene.update();
    assert_eq!(scene.frames_still(), 2);

    dispatcher.handle_window_event(&left_button(ElementState::Pressed), false);
    dispatcher.handle_window_event(&cursor_moved(30.0, 0.0), false);
    scene.update();

    assert_eq!(scene.frames_still(), 1);
}

#[test]
fn test_gui_captured_drag_is_withheld() {
    let (scene, mut dispatcher) = scene_with_dispatcher(false);

    dispatcher.handle_window_event(&left_button(ElementState::Pressed), true);
    dispatcher.handle_window_event(&cursor_moved(200.0, 0.0), true);

    let camera = scene.camera().borrow();
    assert!(!camera.is_dragging());
    assert_eq!(camera.yaw, 0.0);
}

#[test]
fn test_drag_ending_over_gui_stops_rotation() {
    let (scene, mut dispatcher) = scene_with_dispatcher(false);

    dispatcher.handle_window_event(&cursor_moved(100.0, 100.0), false);
    dispatcher.handle_window_event(&left_button(ElementState::Pressed), false);
    dispatcher.handle_window_event(&left_button(ElementState::Released), true);
    let yaw_after_release = scene.camera().borrow().yaw;

    // Hovering the scene with the button up
    dispatcher.handle_window_event(&cursor_moved(300.0, 100.0), false);

    let camera = scene.camera().borrow();
    assert!(!camera.is_dragging());
    assert_eq!(camera.yaw, yaw_after_release);
}
