//! Integration tests for day planning against an on-disk database.

use std::sync::Barrier;
use std::thread;

use chrono::NaiveDate;
use dayplanner_core::{
    build_schedule, plan_day, BlockCategory, EmptyDayPolicy, NewTask, PlanOutcome, PlannerDb,
    RefusalKind, SleepSchedule, TaskRef, UserProfile,
};
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn setup() -> (TempDir, PlannerDb) {
    let dir = tempfile::tempdir().unwrap();
    let db = PlannerDb::open_at(&dir.path().join("dayplanner.db")).unwrap();
    db.register_user("asha", "asha@example.com", false).unwrap();
    (dir, db)
}

fn complete_profile(db: &PlannerDb) {
    let scope = db.scope("asha").unwrap();
    scope
        .save_profile(&UserProfile {
            name: Some("Asha".into()),
            sleep_schedule: Some(SleepSchedule {
                wake_time: "7:00 AM".into(),
                bedtime: "11:00 PM".into(),
            }),
            workout_preference: Some("morning".into()),
            ..Default::default()
        })
        .unwrap();
}

#[test]
fn refuses_incomplete_profile_without_storing() {
    let (_dir, db) = setup();
    let scope = db.scope("asha").unwrap();
    scope
        .add_task(NewTask::new("Write report", BlockCategory::Work))
        .unwrap();

    let outcome = plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap();
    match outcome {
        PlanOutcome::Refused(refusal) => assert_eq!(refusal.kind, RefusalKind::ProfileIncomplete),
        other => panic!("expected refusal, got {other:?}"),
    }
    assert!(scope.schedule_for(date()).unwrap().is_none());
}

#[test]
fn refuses_empty_task_list() {
    let (_dir, db) = setup();
    complete_profile(&db);
    let scope = db.scope("asha").unwrap();

    let outcome = plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap();
    assert!(matches!(
        outcome,
        PlanOutcome::Refused(ref r) if r.kind == RefusalKind::NoTasks
    ));

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "refused");
    assert_eq!(json["kind"], "no_tasks");
}

#[test]
fn template_policy_stores_generic_day() {
    let (_dir, db) = setup();
    complete_profile(&db);
    let scope = db.scope("asha").unwrap();

    let outcome = plan_day(&scope, date(), EmptyDayPolicy::Template).unwrap();
    let PlanOutcome::Ready { result, cached } = outcome else {
        panic!("expected a schedule");
    };
    assert!(!cached);
    assert_eq!(result.schedule.len(), 9);
    assert!(scope.schedule_for(date()).unwrap().is_some());
}

#[test]
fn second_request_returns_stored_schedule() {
    let (_dir, db) = setup();
    complete_profile(&db);
    let scope = db.scope("asha").unwrap();
    scope
        .add_task(NewTask::new("Write report", BlockCategory::Work))
        .unwrap();
    scope
        .add_task(NewTask::new("Study math", BlockCategory::Study))
        .unwrap();

    let PlanOutcome::Ready { result: first, cached } =
        plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap()
    else {
        panic!("expected a schedule");
    };
    assert!(!cached);
    assert_eq!(first.schedule.len(), 9);
    assert_eq!(first.schedule[7].time_range, "7:30 AM - 8:30 AM");

    // Changing inputs must not affect an already stored day.
    scope
        .add_task(NewTask::new("Call the bank", BlockCategory::Personal))
        .unwrap();

    let PlanOutcome::Ready { result: second, cached } =
        plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap()
    else {
        panic!("expected a schedule");
    };
    assert!(cached);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn stored_schedule_survives_reopen() {
    let (dir, db) = setup();
    complete_profile(&db);
    {
        let scope = db.scope("asha").unwrap();
        scope
            .add_task(NewTask::new("Write report", BlockCategory::Work))
            .unwrap();
        plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap();
    }
    drop(db);

    let db = PlannerDb::open_at(&dir.path().join("dayplanner.db")).unwrap();
    let scope = db.scope("asha").unwrap();
    let outcome = plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap();
    assert!(matches!(outcome, PlanOutcome::Ready { cached: true, .. }));
}

#[test]
fn record_stored_by_another_connection_wins() {
    let (dir, db) = setup();
    complete_profile(&db);
    let other = PlannerDb::open_at(&dir.path().join("dayplanner.db")).unwrap();

    let scope = db.scope("asha").unwrap();
    scope
        .add_task(NewTask::new("Write report", BlockCategory::Work))
        .unwrap();
    let other_scope = other.scope("asha").unwrap();

    let first = build_schedule(
        "6:00 AM",
        "10:00 PM",
        &[TaskRef::new("Early draft", BlockCategory::Work)],
        &Default::default(),
    );
    other_scope.store_schedule_if_absent(date(), &first).unwrap();

    let PlanOutcome::Ready { result, cached } =
        plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap()
    else {
        panic!("expected a schedule");
    };
    assert!(cached);
    assert_eq!(result, first);
}

#[test]
fn racing_writers_converge_on_one_record() {
    let (dir, db) = setup();
    let path = dir.path().join("dayplanner.db");
    let writers: Vec<PlannerDb> = (0..4).map(|_| PlannerDb::open_at(&path).unwrap()).collect();
    let barrier = Barrier::new(writers.len());

    let stored: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = writers
            .into_iter()
            .enumerate()
            .map(|(i, writer)| {
                let barrier = &barrier;
                s.spawn(move || {
                    let scope = writer.scope("asha").unwrap();
                    let result = build_schedule(
                        "7:00 AM",
                        "11:00 PM",
                        &[TaskRef::new(format!("Draft {i}"), BlockCategory::Work)],
                        &Default::default(),
                    );
                    barrier.wait();
                    scope.store_schedule_if_absent(date(), &result).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winner = db.scope("asha").unwrap().schedule_for(date()).unwrap().unwrap();
    for record in stored {
        assert_eq!(record.result, winner.result);
    }
    assert_eq!(db.scope("asha").unwrap().schedule_history(10).unwrap().len(), 1);
}

#[test]
fn different_days_are_generated_independently() {
    let (_dir, db) = setup();
    complete_profile(&db);
    let scope = db.scope("asha").unwrap();
    scope
        .add_task(NewTask::new("Write report", BlockCategory::Work))
        .unwrap();

    let next = date().succ_opt().unwrap();
    plan_day(&scope, date(), EmptyDayPolicy::Refuse).unwrap();
    let outcome = plan_day(&scope, next, EmptyDayPolicy::Refuse).unwrap();
    assert!(matches!(outcome, PlanOutcome::Ready { cached: false, .. }));

    let history = scope.schedule_history(10).unwrap();
    assert_eq!(
        history.iter().map(|s| s.date).collect::<Vec<_>>(),
        vec![next, date()]
    );
}
