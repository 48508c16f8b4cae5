// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Maps `winit` window events onto the engine's [`InputEvent`] values.

use pulse_core::platform::{InputEvent, MouseButton};
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Converts a window event into an input event.
///
/// Returns `None` for events that are not user input (resize, focus, close)
/// and for key auto-repeat, unidentified keys and zero scroll deltas.
pub fn translate_winit_input(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            let key_code = format!("{code:?}");
            match (event.state, event.repeat) {
                (ElementState::Pressed, false) => Some(InputEvent::KeyPressed { key_code }),
                (ElementState::Released, _) => Some(InputEvent::KeyReleased { key_code }),
                (ElementState::Pressed, true) => None,
            }
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let button = engine_button(*button);
            Some(match state {
                ElementState::Pressed => InputEvent::MouseButtonPressed { button },
                ElementState::Released => InputEvent::MouseButtonReleased { button },
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let (delta_x, delta_y) = match *delta {
                MouseScrollDelta::LineDelta(x, y) => (x, y),
                MouseScrollDelta::PixelDelta(p) => (p.x as f32, p.y as f32),
            };
            (delta_x != 0.0 || delta_y != 0.0)
                .then_some(InputEvent::MouseWheelScrolled { delta_x, delta_y })
        }
        _ => None,
    }
}

fn engine_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Back,
        WinitButton::Forward => MouseButton::Forward,
        WinitButton::Other(code) => MouseButton::Other(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, TouchPhase};

    fn mouse(state: ElementState, button: WinitButton) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state,
            button,
        }
    }

    fn wheel(delta: MouseScrollDelta) -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta,
            phase: TouchPhase::Moved,
        }
    }

    #[test]
    fn test_mouse_buttons_keep_their_identity() {
        let cases = [
            (WinitButton::Left, MouseButton::Left),
            (WinitButton::Right, MouseButton::Right),
            (WinitButton::Middle, MouseButton::Middle),
            (WinitButton::Back, MouseButton::Back),
            (WinitButton::Forward, MouseButton::Forward),
            (WinitButton::Other(9), MouseButton::Other(9)),
        ];
        for (winit_button, button) in cases {
            assert_eq!(
                translate_winit_input(&mouse(ElementState::Pressed, winit_button)),
                Some(InputEvent::MouseButtonPressed { button })
            );
            assert_eq!(
                translate_winit_input(&mouse(ElementState::Released, winit_button)),
                Some(InputEvent::MouseButtonReleased { button })
            );
        }
    }

    #[test]
    fn test_cursor_position_is_narrowed_to_f32() {
        let event = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(12.5, 480.25),
        };
        assert_eq!(
            translate_winit_input(&event),
            Some(InputEvent::MouseMoved { x: 12.5, y: 480.25 })
        );
    }

    #[test]
    fn test_wheel_line_and_pixel_deltas() {
        assert_eq!(
            translate_winit_input(&wheel(MouseScrollDelta::LineDelta(0.0, -3.0))),
            Some(InputEvent::MouseWheelScrolled {
                delta_x: 0.0,
                delta_y: -3.0
            })
        );
        assert_eq!(
            translate_winit_input(&wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
                4.0, 0.0
            )))),
            Some(InputEvent::MouseWheelScrolled {
                delta_x: 4.0,
                delta_y: 0.0
            })
        );
    }

    #[test]
    fn test_zero_scroll_is_dropped() {
        assert_eq!(
            translate_winit_input(&wheel(MouseScrollDelta::LineDelta(0.0, 0.0))),
            None
        );
    }

    #[test]
    fn test_window_events_are_not_input() {
        for event in [
            WindowEvent::Resized(PhysicalSize::new(640, 480)),
            WindowEvent::Focused(false),
            WindowEvent::CloseRequested,
        ] {
            assert_eq!(translate_winit_input(&event), None);
        }
    }
}
