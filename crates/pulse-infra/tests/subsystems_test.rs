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

use approx::assert_relative_eq;
use pulse_core::collision::Polygon;
use pulse_core::math::Vec2;
use pulse_core::platform::{Display, HeadlessDisplay, InputEvent};
use pulse_core::{EngineError, SubsystemState};
use pulse_infra::{standard_subsystems, CollisionSubsystem, GraphicsSubsystem, InputSubsystem};

#[test]
fn test_standard_set_runs_a_frame_with_headless_input() {
    // --- 1. ARRANGE ---
    let input = InputSubsystem::new();
    let mut display = HeadlessDisplay::new(320, 200)
        .input_after(1, InputEvent::key_pressed("Escape"))
        .with_input_sender(input.sender());
    let mut subsystems = standard_subsystems(320, 200, input).unwrap();
    subsystems.init_all().unwrap();

    // --- 2. ACT ---
    // The display publishes during its update; the next begin_frame latches it.
    subsystems.begin_frame().unwrap();
    subsystems.end_frame().unwrap();
    display.update().unwrap();
    subsystems.begin_frame().unwrap();

    // --- 3. ASSERT ---
    assert_eq!(
        subsystems.names(),
        vec!["graphics", "audio", "collision", "input"]
    );
    let input = subsystems.get::<InputSubsystem>().unwrap();
    assert!(input.is_key_pressed("Escape"));
    assert_eq!(
        subsystems.state_of("collision"),
        Some(SubsystemState::FrameActive)
    );
}

#[test]
fn test_resize_reaches_graphics_viewport() {
    // --- 1. ARRANGE ---
    let mut subsystems = standard_subsystems(640, 480, InputSubsystem::new()).unwrap();
    subsystems.init_all().unwrap();

    // --- 2. ACT ---
    subsystems.resize(1024, 768).unwrap();

    // --- 3. ASSERT ---
    let graphics = subsystems.get::<GraphicsSubsystem>().unwrap();
    assert_eq!(graphics.viewport(), (1024, 768));
}

#[test]
fn test_collision_subsystem_reports_contact_through_the_set() {
    // --- 1. ARRANGE ---
    let mut subsystems = standard_subsystems(1, 1, InputSubsystem::new()).unwrap();
    subsystems.init_all().unwrap();
    let a = Polygon::rectangle(2.0, 2.0);
    let b = Polygon::rectangle(2.0, 2.0).with_position(Vec2::new(0.5, 1.5));

    // --- 2. ACT ---
    let contact = subsystems
        .get::<CollisionSubsystem>()
        .and_then(|c| c.test_polygons_contact(&a, &b));

    // --- 3. ASSERT ---
    let contact = contact.expect("the rectangles overlap");
    assert_relative_eq!(contact.normal.y, 1.0);
    assert_relative_eq!(contact.depth, 0.5);
}

#[test]
fn test_dispose_runs_in_reverse_and_only_once() {
    // --- 1. ARRANGE ---
    let mut subsystems = standard_subsystems(1, 1, InputSubsystem::new()).unwrap();
    subsystems.init_all().unwrap();

    // --- 2. ACT ---
    subsystems.dispose_all().unwrap();
    let second = subsystems.dispose_all();

    // --- 3. ASSERT ---
    assert!(second.is_ok());
    for name in ["graphics", "audio", "collision", "input"] {
        assert_eq!(subsystems.state_of(name), Some(SubsystemState::Disposed));
    }
    assert!(matches!(
        subsystems.begin_frame(),
        Err(EngineError::Lifecycle(_))
    ));
}
