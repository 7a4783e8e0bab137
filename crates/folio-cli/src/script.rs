use std::path::Path;

use anyhow::{Context, Result};
use folio_core::geometry::Point;
use folio_core::headless::HeadlessDocument;
use folio_core::input::{Handled, InputEvent, NavKey, NavZone};
use folio_core::Viewer;
use serde::{Deserialize, Serialize};

/// A scripted reading session, read from TOML:
///
/// ```toml
/// [[steps]]
/// action = "scroll"
/// to = 2400.0
///
/// [[steps]]
/// action = "wait"
/// ms = 150
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        toml::from_str(&contents).context("Invalid script")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// One reader action. Positions are client coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Scroll the document to `to` and report the scroll.
    Scroll { to: f64 },
    /// Let time pass so pending timers fire.
    Wait { ms: u64 },
    /// Arrow key.
    Key { key: Side },
    /// Click a navigation zone at client height `y`.
    Click { zone: Side, y: f64 },
    /// One-finger horizontal swipe at client height `y`.
    Swipe { from_x: f64, to_x: f64, y: f64 },
    /// Two fingers centered on (`x`, `y`), `distance` apart, spread by `scale`.
    Pinch {
        x: f64,
        y: f64,
        #[serde(default = "default_pinch_distance")]
        distance: f64,
        scale: f64,
    },
    /// Jump to a 1-based page number.
    Goto { page: usize },
}

fn default_pinch_distance() -> f64 {
    100.0
}

impl Step {
    /// Feed this step to the viewer the way a browser would.
    pub fn apply(&self, viewer: &mut Viewer<HeadlessDocument>) -> Handled {
        match *self {
            Step::Scroll { to } => viewer.scroll_by_user(to),
            Step::Wait { ms } => {
                viewer.advance_clock(ms);
                Handled::Consumed
            }
            Step::Key { key } => viewer.handle(InputEvent::Key(match key {
                Side::Left => NavKey::Left,
                Side::Right => NavKey::Right,
            })),
            Step::Click { zone, y } => viewer.handle(InputEvent::Click {
                zone: match zone {
                    Side::Left => NavZone::Left,
                    Side::Right => NavZone::Right,
                },
                client_y: y,
            }),
            Step::Swipe { from_x, to_x, y } => {
                let start = Point::new(from_x, y);
                let end = Point::new(to_x, y);
                viewer.handle(InputEvent::TouchStart {
                    touches: vec![start],
                });
                viewer.handle(InputEvent::TouchMove { touches: vec![end] });
                viewer.handle(InputEvent::TouchEnd {
                    point: end,
                    remaining: 0,
                })
            }
            Step::Pinch {
                x,
                y,
                distance,
                scale,
            } => {
                let spread = |d: f64| vec![Point::new(x - d / 2.0, y), Point::new(x + d / 2.0, y)];
                let end = spread(distance * scale);
                viewer.handle(InputEvent::TouchStart {
                    touches: spread(distance),
                });
                let handled = viewer.handle(InputEvent::TouchMove {
                    touches: end.clone(),
                });
                viewer.handle(InputEvent::TouchEnd {
                    point: end[1],
                    remaining: 1,
                });
                viewer.handle(InputEvent::TouchEnd {
                    point: end[0],
                    remaining: 0,
                });
                handled
            }
            Step::Goto { page } => {
                let moved = page
                    .checked_sub(1)
                    .map(|index| viewer.goto_page(index))
                    .unwrap_or(false);
                if moved {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
        }
    }

    /// Short human-readable description for the session log.
    pub fn describe(&self) -> String {
        match self {
            Step::Scroll { to } => format!("scroll to {to:.0}"),
            Step::Wait { ms } => format!("wait {ms} ms"),
            Step::Key { key } => format!("key {key:?}"),
            Step::Click { zone, y } => format!("click {zone:?} at y={y:.0}"),
            Step::Swipe { from_x, to_x, y } => {
                format!("swipe {from_x:.0} -> {to_x:.0} at y={y:.0}")
            }
            Step::Pinch { x, y, scale, .. } => format!("pinch x{scale:.2} at ({x:.0}, {y:.0})"),
            Step::Goto { page } => format!("goto page {page}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script: Script = toml::from_str(
            r#"
            [[steps]]
            action = "scroll"
            to = 1200.0

            [[steps]]
            action = "wait"
            ms = 150

            [[steps]]
            action = "click"
            zone = "right"
            y = 400.0

            [[steps]]
            action = "pinch"
            x = 100.0
            y = 100.0
            scale = 2.0

            [[steps]]
            action = "goto"
            page = 3
            "#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 5);
        assert_eq!(script.steps[0], Step::Scroll { to: 1200.0 });
        assert_eq!(
            script.steps[2],
            Step::Click {
                zone: Side::Right,
                y: 400.0
            }
        );
        assert!(matches!(
            script.steps[3],
            Step::Pinch { distance, .. } if distance == 100.0
        ));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let parsed: std::result::Result<Script, _> = toml::from_str(
            r#"
            [[steps]]
            action = "teleport"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_goto_is_one_based() {
        let doc = HeadlessDocument::new(800.0);
        let catalog = folio_core::PageCatalog::new(vec!["a".into(), "b".into()]).unwrap();
        let mut viewer = Viewer::new(doc, catalog, Default::default()).unwrap();

        assert_eq!(Step::Goto { page: 2 }.apply(&mut viewer), Handled::Consumed);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(Step::Goto { page: 0 }.apply(&mut viewer), Handled::Ignored);
        assert_eq!(Step::Goto { page: 3 }.apply(&mut viewer), Handled::Ignored);
    }
}
