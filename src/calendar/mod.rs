//! Contribution calendar engine
//!
//! Grid construction, intensity mapping, the hover/selection state machine,
//! overlay placement and responsive cell sizing. Everything here is pure and
//! synchronous; hosts feed it records, layout signals and pointer events.

pub mod grid;
pub mod intensity;
pub mod interaction;
pub mod links;
pub mod positioner;
pub mod sizer;

pub use grid::{build_grid, CalendarGrid, CellPos, GridCell, GridSpan};
pub use intensity::{bucket, cell_fill, fill_for, opacity, CellFill, Channel};
pub use interaction::{InteractionState, OutsideClick, OverlayHitArea, PointerEvent};
pub use links::resolve_url;
pub use positioner::{place_overlay, place_popover, place_tooltip, Bounds, Placement, Point, Size};
pub use sizer::cell_size;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calendar_client::parse_calendar_response;
    use crate::types::{CalendarKind, Category, DayRecord, Locale};
    use chrono::NaiveDate;
    use positioner::{EDGE_MARGIN, POPOVER_SIZE};

    const FIXTURE: &str = include_str!("../../fixtures/calendar_2024.json");

    fn fixture_records() -> Vec<DayRecord> {
        let mut body = FIXTURE.as_bytes().to_vec();
        parse_calendar_response(&mut body).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== grid and intensity tests ==========

    #[test]
    fn test_leap_day_scenario() {
        let records: Vec<DayRecord> =
            serde_json::from_str(r#"[{"date": "2024-02-29", "type": "post", "count": 3}]"#).unwrap();
        let grid = build_grid(&records, GridSpan::Year(2024));

        assert_eq!(grid.real_days(), 366);
        let leap = grid.position_of(date(2024, 2, 29)).unwrap();
        for (pos, cell) in grid.cells() {
            let fill = cell_fill(cell.record.as_ref(), CalendarKind::Post);
            if pos == leap {
                assert_eq!(
                    fill,
                    CellFill::Solid {
                        channel: Channel::Post,
                        bucket: 3,
                        opacity: 0.9
                    }
                );
            } else {
                assert_eq!(fill, CellFill::Background);
            }
        }
    }

    #[test]
    fn test_fixture_grid_fills() {
        let records = fixture_records();
        assert_eq!(records.len(), 4);
        let grid = build_grid(&records, GridSpan::Year(2024));

        let cell = |y, m, d| {
            let pos = grid.position_of(date(y, m, d)).unwrap();
            grid.cell(pos).unwrap().record.as_ref()
        };

        assert!(matches!(
            cell_fill(cell(2024, 2, 29), CalendarKind::All),
            CellFill::Blend { bucket: 3, .. }
        ));
        assert!(matches!(
            cell_fill(cell(2024, 2, 29), CalendarKind::Life),
            CellFill::Solid {
                channel: Channel::Life,
                ..
            }
        ));
        assert_eq!(cell_fill(cell(2024, 7, 14), CalendarKind::All).bucket(), 4);
        assert_eq!(cell_fill(cell(2024, 3, 1), CalendarKind::All), CellFill::Background);
    }

    #[test]
    fn test_fixture_items_resolve() {
        let records = fixture_records();
        let leap = records.iter().find(|r| r.date == "2024-02-29").unwrap();

        let post = &leap.items(Category::Post)[0];
        assert_eq!(
            resolve_url(post, Locale::Zh).as_deref(),
            Some("/zh/blog/leap-day-notes")
        );

        let walk = &leap.items(Category::Life)[0];
        assert_eq!(resolve_url(walk, Locale::En).as_deref(), Some("/en/life/301"));
        assert!(walk.label().ends_with("..."));
        assert_eq!(walk.label().chars().count(), 53);

        let review = records.iter().find(|r| r.date == "2024-12-31").unwrap();
        assert_eq!(resolve_url(&review.posts[1], Locale::En), None);
    }

    // ========== positioning tests ==========

    #[test]
    fn test_right_edge_popover_scenario() {
        let trigger = Bounds::new(980.0, 100.0, 20.0, 20.0);
        let viewport = Size {
            width: 1000.0,
            height: 800.0,
        };
        let placement = place_popover(trigger, viewport);
        // 1000 - 320 = 680, clamped to 1000 - 320 - 8
        assert_eq!(placement.left, 672.0);
        assert_eq!(placement.top, 128.0);
    }

    #[test]
    fn test_popover_always_inside_margins() {
        for (vw, vh) in [(400.0, 400.0), (1000.0, 800.0), (1920.0, 1080.0)] {
            let viewport = Size {
                width: vw,
                height: vh,
            };
            let mut x = 0.0;
            while x < vw {
                let mut y = 0.0;
                while y < vh {
                    let p = place_popover(Bounds::new(x, y, 16.0, 16.0), viewport);
                    assert!(p.left >= EDGE_MARGIN && p.left <= vw - POPOVER_SIZE.width - EDGE_MARGIN);
                    assert!(p.top >= EDGE_MARGIN && p.top <= vh - POPOVER_SIZE.height - EDGE_MARGIN);
                    y += 37.0;
                }
                x += 41.0;
            }
        }
    }

    // ========== interaction tests ==========

    #[test]
    fn test_click_empty_cell_while_selected_scenario() {
        let grid = build_grid(&fixture_records(), GridSpan::Year(2024));
        let active = grid.position_of(date(2024, 1, 1)).unwrap();
        let empty = grid.position_of(date(2024, 1, 2)).unwrap();

        let state = InteractionState::Idle.apply(PointerEvent::Click(active), &grid);
        assert_eq!(state, InteractionState::Selected(active));

        let state = state.apply(PointerEvent::Click(empty), &grid);
        assert_eq!(state, InteractionState::Idle);
    }

    #[test]
    fn test_outside_press_then_click_switches_selection() {
        let grid = build_grid(&fixture_records(), GridSpan::Year(2024));
        let first = grid.position_of(date(2024, 1, 1)).unwrap();
        let second = grid.position_of(date(2024, 2, 29)).unwrap();

        let area = OverlayHitArea {
            overlay: Bounds::new(100.0, 100.0, 320.0, 300.0),
            trigger: Bounds::new(40.0, 40.0, 16.0, 16.0),
        };
        let state = InteractionState::Selected(first);

        // Press on the trigger itself is not outside
        assert_eq!(
            state.press_outside(Point { x: 45.0, y: 45.0 }, &area),
            InteractionState::Selected(first)
        );

        let state = state.press_outside(Point { x: 600.0, y: 20.0 }, &area);
        assert_eq!(state, InteractionState::Idle);
        let state = state.apply(PointerEvent::Click(second), &grid);
        assert_eq!(state, InteractionState::Selected(second));
    }

    // ========== trailing span tests ==========

    #[test]
    fn test_trailing_span_from_two_years() {
        let mut records = fixture_records();
        records.extend(
            serde_json::from_str::<Vec<DayRecord>>(
                r#"[{"date": "2023-12-25", "type": "life", "count": 1}]"#,
            )
            .unwrap(),
        );
        let grid = build_grid(&records, GridSpan::Trailing { end: date(2024, 6, 30) });

        assert_eq!(grid.real_days(), 365);
        assert!(grid.position_of(date(2023, 12, 25)).is_some());
        assert!(grid.position_of(date(2024, 7, 14)).is_none());
        // Window starts on 2023-07-02, a Sunday
        assert_eq!(grid.cell(CellPos::new(0, 6)).unwrap().date, Some(date(2023, 7, 2)));
    }
}
