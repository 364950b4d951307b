//! Headless scenarios
//!
//! A scenario is a JSON script of host events and assertions replayed
//! against a [`MemoryHost`] with a manually advanced clock. Window-scope
//! events (resize, pointer move, pointer up) go through an
//! [`EventDispatcher`] the same way a real host would deliver them.
//!
//! ```json
//! {
//!   "viewport": { "width": 300, "height": 300 },
//!   "content": { "width": 300, "height": 900 },
//!   "steps": [
//!     { "type": "scroll", "axis": "vertical", "offset": 590 },
//!     { "type": "assert_shadow", "edge": "bottom", "expected": 0.2 },
//!     { "type": "wait", "ms": 1500 },
//!     { "type": "assert_revealed", "expected": false }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use veneer_animation::ManualClock;
use veneer_core::events::{event_types, Event, EventData, EventDispatcher};
use veneer_core::geometry::{Axis, Point, Rect, Size};

use crate::config::ScrollAreaConfig;
use crate::error::ScenarioError;
use crate::host::{MemoryHost, ScrollHost};
use crate::widgets::ScrollArea;

fn default_tolerance() -> f32 {
    0.5
}

fn default_shadow_tolerance() -> f32 {
    1e-3
}

/// Initial setup plus the steps to replay
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Viewport origin in window coordinates
    #[serde(default)]
    pub origin: Point,
    pub viewport: Size,
    pub content: Size,
    #[serde(default)]
    pub config: ScrollAreaConfig,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }
}

/// Vertical edge shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowEdge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Content box changes size
    ResizeContent { width: f32, height: f32 },
    /// Window (and with it the viewport) changes size
    ResizeViewport { width: f32, height: f32 },
    /// Native scroll on one axis
    Scroll { axis: Axis, offset: f32 },
    /// Press on a track, window coordinates
    PointerDown { axis: Axis, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Advance the clock and fire expired timers
    Wait { ms: u64 },
    AssertThumbOffset {
        axis: Axis,
        expected: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertScrollOffset {
        axis: Axis,
        expected: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertShadow {
        edge: ShadowEdge,
        expected: f32,
        #[serde(default = "default_shadow_tolerance")]
        tolerance: f32,
    },
    AssertRevealed { expected: bool },
}

/// Outcome of a successful replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioReport {
    pub steps: usize,
    pub assertions: usize,
    /// Overlay state generation after the last step
    pub generation: u64,
}

/// Replays a [`Scenario`]
pub struct ScenarioRunner {
    scenario: Scenario,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }

    pub fn run(&self) -> Result<ScenarioReport, ScenarioError> {
        let scenario = &self.scenario;
        let origin = scenario.origin;
        let host = MemoryHost::new(
            Rect::new(
                origin.x,
                origin.y,
                scenario.viewport.width,
                scenario.viewport.height,
            ),
            scenario.content,
        )
        .with_track_thickness(scenario.config.track_thickness.max(0.0));

        let clock: Arc<ManualClock> = ManualClock::shared();
        let dispatcher = EventDispatcher::new();
        let area = ScrollArea::new(host, scenario.config.clone(), clock.clone());
        area.mount();
        area.attach(&dispatcher);

        tracing::debug!(
            name = scenario.name.as_deref().unwrap_or("<unnamed>"),
            steps = scenario.steps.len(),
            "replaying scenario"
        );

        let mut assertions = 0;
        for (index, step) in scenario.steps.iter().enumerate() {
            let step_no = index + 1;
            match *step {
                ScenarioStep::ResizeContent { width, height } => {
                    let size = Size::new(width, height);
                    area.with_host(|host| host.set_content(size));
                    area.on_content_resize(size);
                }
                ScenarioStep::ResizeViewport { width, height } => {
                    area.with_host(|host| {
                        host.set_viewport(Rect::new(origin.x, origin.y, width, height))
                    });
                    dispatcher.dispatch(&mut Event::resize(width, height));
                }
                ScenarioStep::Scroll { axis, offset } => {
                    area.with_host(|host| host.set_scroll_offset(axis, offset));
                    area.on_scroll();
                }
                ScenarioStep::PointerDown { axis, x, y } => {
                    area.on_track_pointer_down(axis, Point::new(x, y));
                }
                ScenarioStep::PointerMove { x, y } => {
                    dispatcher.dispatch(&mut Event::pointer(event_types::POINTER_MOVE, x, y));
                }
                ScenarioStep::PointerUp => {
                    dispatcher.dispatch(&mut Event::new(event_types::POINTER_UP, EventData::None));
                }
                ScenarioStep::Wait { ms } => {
                    clock.advance_millis(ms);
                    area.tick();
                }
                ScenarioStep::AssertThumbOffset {
                    axis,
                    expected,
                    tolerance,
                } => {
                    assertions += 1;
                    let actual = area.state().axis(axis).thumb_offset;
                    check_close(step_no, "thumb offset", actual, expected, tolerance)?;
                }
                ScenarioStep::AssertScrollOffset {
                    axis,
                    expected,
                    tolerance,
                } => {
                    assertions += 1;
                    let actual = area.with_host(|host| host.scroll_offset().along(axis));
                    check_close(step_no, "scroll offset", actual, expected, tolerance)?;
                }
                ScenarioStep::AssertShadow {
                    edge,
                    expected,
                    tolerance,
                } => {
                    assertions += 1;
                    let render = area.render();
                    let actual = match edge {
                        ShadowEdge::Top => render.top_shadow.opacity,
                        ShadowEdge::Bottom => render.bottom_shadow.opacity,
                    };
                    check_close(step_no, "shadow opacity", actual, expected, tolerance)?;
                }
                ScenarioStep::AssertRevealed { expected } => {
                    assertions += 1;
                    let actual = area.is_revealed();
                    if actual != expected {
                        return Err(ScenarioError::Assertion {
                            step: step_no,
                            message: format!("expected revealed = {expected}, got {actual}"),
                        });
                    }
                }
            }
        }

        let report = ScenarioReport {
            steps: scenario.steps.len(),
            assertions,
            generation: area.state().generation(),
        };
        area.unmount();
        Ok(report)
    }
}

fn check_close(
    step: usize,
    what: &str,
    actual: f32,
    expected: f32,
    tolerance: f32,
) -> Result<(), ScenarioError> {
    if (actual - expected).abs() <= tolerance {
        Ok(())
    } else {
        Err(ScenarioError::Assertion {
            step,
            message: format!("{what}: expected {expected} (±{tolerance}), got {actual}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADOWS: &str = r#"{
        "name": "shadows",
        "viewport": { "width": 300, "height": 300 },
        "content": { "width": 300, "height": 900 },
        "steps": [
            { "type": "scroll", "axis": "vertical", "offset": 0 },
            { "type": "assert_shadow", "edge": "top", "expected": 0.0 },
            { "type": "assert_shadow", "edge": "bottom", "expected": 1.0 },
            { "type": "scroll", "axis": "vertical", "offset": 590 },
            { "type": "assert_shadow", "edge": "top", "expected": 1.0 },
            { "type": "assert_shadow", "edge": "bottom", "expected": 0.2 }
        ]
    }"#;

    #[test]
    fn test_shadow_scenario() {
        let report = ScenarioRunner::new(Scenario::from_json(SHADOWS).unwrap())
            .run()
            .unwrap();
        assert_eq!(report.steps, 6);
        assert_eq!(report.assertions, 4);
    }

    #[test]
    fn test_failed_assertion_names_the_step() {
        let scenario = Scenario::from_json(
            r#"{
                "viewport": { "width": 300, "height": 300 },
                "content": { "width": 300, "height": 900 },
                "steps": [
                    { "type": "scroll", "axis": "vertical", "offset": 300 },
                    { "type": "assert_thumb_offset", "axis": "vertical", "expected": 50 }
                ]
            }"#,
        )
        .unwrap();

        match ScenarioRunner::new(scenario).run() {
            Err(ScenarioError::Assertion { step, .. }) => assert_eq!(step, 2),
            other => panic!("expected assertion failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_is_a_parse_error() {
        let err = Scenario::from_json(
            r#"{ "viewport": { "width": 1, "height": 1 },
                 "content": { "width": 1, "height": 1 },
                 "steps": [{ "type": "teleport" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }
}
