use chrono::{Duration, NaiveDate, Utc, Weekday};
use pretty_assertions::assert_eq;
use slotbook_core::calendar::CalendarResponse;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_calendar_grid_from_base_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/calendar")
        .add_query_param("base", "2026-10-22")
        .await;

    response.assert_status_ok();
    let grid: CalendarResponse = response.json();
    assert_eq!(grid.week_start, Weekday::Mon);
    assert_eq!(grid.weeks.len(), 2);
    assert!(grid.weeks.iter().all(|week| week.len() == 7));
    assert_eq!(grid.weeks[0][0].date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    assert_eq!(grid.weeks[1][6].date, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
}

#[tokio::test]
async fn test_calendar_defaults_to_today() {
    let ctx = TestContext::new();
    let today = Utc::now().date_naive();

    let grid: CalendarResponse = ctx.server.get("/api/calendar").await.json();

    let days: Vec<_> = grid.weeks.iter().flatten().collect();
    assert!(days.iter().any(|day| day.date == today));
    for day in days {
        assert_eq!(day.selectable, day.date >= today);
    }
}

#[tokio::test]
async fn test_past_weeks_are_not_selectable() {
    let ctx = TestContext::new();
    let base = Utc::now().date_naive() - Duration::days(60);

    let grid: CalendarResponse = ctx
        .server
        .get("/api/calendar")
        .add_query_param("base", base)
        .await
        .json();

    assert!(grid.weeks.iter().flatten().all(|day| !day.selectable));
}
