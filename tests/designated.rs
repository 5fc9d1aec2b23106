#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate, Weekday};
use garde::{
    scheduler::{edge_target, place_on_off_day, place_on_workday, week_start, Placement},
    Blackout, CarerId, Cell, DesignatedMode, DesignatedRule, PlanOptions, SchedError,
    ScheduleDay, ScheduleWarning, Scheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cell(name: &str) -> Cell {
    Cell::Assigned(CarerId::new(name))
}

fn labels(cells: &[Cell]) -> Vec<&str> {
    cells.iter().map(Cell::label).collect()
}

fn with_rule(names: &[&str], shifts: &[&str], carer: &str, mode: DesignatedMode) -> PlanOptions {
    PlanOptions {
        carers: names.iter().map(CarerId::new).collect(),
        shifts: shifts.iter().map(|s| s.to_string()).collect(),
        designated: Some(DesignatedRule {
            carer: CarerId::new(carer),
            mode,
        }),
        ..PlanOptions::default()
    }
}

fn fixed(days: &[Weekday]) -> DesignatedMode {
    DesignatedMode::FixedWeekday {
        days: days.to_vec(),
    }
}

#[test]
fn fixed_weekday_places_b_on_edges_and_parks_her_otherwise() {
    let monday = ymd(2025, 3, 3);
    let o = with_rule(&["A", "B", "C"], &["S1", "S2"], "B", fixed(&[Weekday::Tue, Weekday::Sat]));
    let planning = Scheduler::new(o).build(monday, monday + Duration::days(6)).unwrap();
    let days = &planning.schedule.days;

    // lundi : B était sur S2, elle part en pause et C reprend S2
    assert_eq!(labels(days[0].cells()), vec!["A", "C", "B"]);
    // mardi : B était sur S1, elle prend S2 (dernier créneau)
    assert_eq!(labels(days[1].cells()), vec!["C", "B", "A"]);
    // mercredi : déjà en pause
    assert_eq!(labels(days[2].cells()), vec!["C", "A", "B"]);
    assert_eq!(labels(days[3].cells()), vec!["A", "C", "B"]);
    assert_eq!(labels(days[4].cells()), vec!["A", "C", "B"]);
    // samedi : premier créneau
    assert_eq!(labels(days[5].cells()), vec!["B", "A", "C"]);
    assert_eq!(labels(days[6].cells()), vec!["A", "C", "B"]);

    assert_eq!(planning.workdays, vec![ymd(2025, 3, 4), ymd(2025, 3, 8)]);
    assert!(planning.warnings.is_empty());
}

#[test]
fn rule_only_swaps_within_a_day() {
    let start = ymd(2025, 1, 5);
    let names = ["A", "B", "C", "D", "E"];
    let o = with_rule(
        &names,
        &["S1", "S2", "S3"],
        "C",
        DesignatedMode::RandomizedPerWeek {
            days_per_week: 3,
            seed: Some(11),
        },
    );
    let planning = Scheduler::new(o).build(start, start + Duration::days(55)).unwrap();
    let expected: HashSet<&str> = names.iter().copied().collect();
    let carer = CarerId::new("C");

    for day in &planning.schedule.days {
        let seen: HashSet<&str> = labels(day.cells()).into_iter().collect();
        assert_eq!(seen, expected, "day {}", day.date);
        let occurrences = day.cells().iter().filter(|c| c.carer() == Some(&carer)).count();
        assert_eq!(occurrences, 1);

        let pos = day.position_of(&carer).unwrap();
        if planning.workdays.contains(&day.date) {
            assert_eq!(Some(pos), edge_target(day.weekday, &[0, 1, 2]));
        } else {
            assert!(pos >= 3, "{} should be on a break column", day.date);
        }
    }
}

#[test]
fn workday_placement_is_idempotent() {
    let tuesday = ymd(2025, 3, 4);
    let carer = CarerId::new("B");
    let mut day = ScheduleDay::new(tuesday, Weekday::Tue, vec![cell("B"), cell("C"), cell("A")]);
    let target = edge_target(day.weekday, &[0, 1]).unwrap();

    assert_eq!(place_on_workday(&mut day, &carer, target, Some(2)), Placement::Moved);
    let once = day.clone();
    assert_eq!(place_on_workday(&mut day, &carer, target, Some(2)), Placement::Unchanged);
    assert_eq!(day, once);
    assert_eq!(labels(day.cells()), vec!["C", "B", "A"]);
}

#[test]
fn absent_carer_takes_target_and_occupant_is_parked() {
    let tuesday = ymd(2025, 3, 4);
    let carer = CarerId::new("B");
    let mut day = ScheduleDay::new(tuesday, Weekday::Tue, vec![cell("A"), cell("C"), cell("D")]);

    assert_eq!(place_on_workday(&mut day, &carer, 1, Some(2)), Placement::Moved);
    assert_eq!(labels(day.cells()), vec!["A", "B", "C"]);

    let mut no_break = ScheduleDay::new(tuesday, Weekday::Tue, vec![cell("A"), cell("C")]);
    let before = no_break.clone();
    assert_eq!(
        place_on_workday(&mut no_break, &carer, 1, None),
        Placement::MissingBreak
    );
    assert_eq!(no_break, before);
}

#[test]
fn off_day_is_a_mutual_swap_and_noop_on_break() {
    let monday = ymd(2025, 3, 3);
    let carer = CarerId::new("B");
    let mut day = ScheduleDay::new(monday, Weekday::Mon, vec![cell("A"), cell("B"), cell("C")]);
    assert_eq!(place_on_off_day(&mut day, &carer, &[0, 1], Some(2)), Placement::Moved);
    assert_eq!(labels(day.cells()), vec!["A", "C", "B"]);
    assert_eq!(place_on_off_day(&mut day, &carer, &[0, 1], Some(2)), Placement::Unchanged);
    assert_eq!(labels(day.cells()), vec!["A", "C", "B"]);
}

#[test]
fn missing_break_column_degrades_without_failing() {
    let monday = ymd(2025, 3, 3);
    let base = PlanOptions {
        carers: vec![CarerId::new("A"), CarerId::new("B")],
        shifts: vec!["S1".into(), "S2".into()],
        ..PlanOptions::default()
    };
    let o = with_rule(&["A", "B"], &["S1", "S2"], "A", fixed(&[Weekday::Thu]));

    let expected = Scheduler::new(base).build(monday, monday + Duration::days(2)).unwrap();
    let planning = Scheduler::new(o).build(monday, monday + Duration::days(2)).unwrap();

    assert_eq!(planning.schedule, expected.schedule);
    assert_eq!(
        planning.warnings,
        vec![
            ScheduleWarning::MissingBreakColumn { date: monday },
            ScheduleWarning::MissingBreakColumn {
                date: ymd(2025, 3, 4)
            },
            ScheduleWarning::MissingBreakColumn {
                date: ymd(2025, 3, 5)
            },
        ]
    );
}

#[test]
fn unknown_designated_carer_is_a_noop() {
    let monday = ymd(2025, 3, 3);
    let o = with_rule(&["A", "B", "C"], &["S1", "S2"], "Z", fixed(&[Weekday::Mon]));
    let planning = Scheduler::new(o).build(monday, monday).unwrap();
    assert_eq!(labels(planning.schedule.days[0].cells()), vec!["A", "B", "C"]);
    assert_eq!(
        planning.warnings,
        vec![ScheduleWarning::DesignatedNotRostered {
            carer: CarerId::new("Z")
        }]
    );
}

#[test]
fn blackout_days_are_left_alone() {
    let monday = ymd(2025, 3, 3);
    let mut o = with_rule(&["A", "B", "C"], &["S1", "S2"], "B", fixed(&[Weekday::Tue]));
    o.blackout = Some(Blackout {
        weekday: Weekday::Tue,
        pause_rotation: false,
    });
    let planning = Scheduler::new(o).build(monday, monday + Duration::days(1)).unwrap();
    assert_eq!(labels(planning.schedule.days[1].cells()), vec!["-", "-", "-"]);
    assert!(planning.workdays.is_empty());
}

#[test]
fn randomized_mode_respects_non_adjacency_and_quota() {
    let start = ymd(2025, 3, 5); // mercredi : première semaine partielle
    for seed in 0..50 {
        let o = with_rule(
            &["A", "B", "C", "D"],
            &["S1", "S2", "S3"],
            "D",
            DesignatedMode::RandomizedPerWeek {
                days_per_week: 3,
                seed: Some(seed),
            },
        );
        let planning = Scheduler::new(o).build(start, start + Duration::days(30)).unwrap();

        let mut weeks: BTreeMap<NaiveDate, Vec<NaiveDate>> = BTreeMap::new();
        for day in &planning.workdays {
            weeks.entry(week_start(*day)).or_default().push(*day);
        }
        for days in weeks.values() {
            assert!(days.len() <= 3, "seed {seed}");
            for a in days {
                for b in days {
                    assert_ne!((*b - *a).num_days().abs(), 1, "seed {seed}");
                }
            }
        }
    }
}

#[test]
fn same_seed_gives_same_planning() {
    let start = ymd(2025, 3, 2);
    let mode = DesignatedMode::RandomizedPerWeek {
        days_per_week: 2,
        seed: Some(2024),
    };
    let o = with_rule(&["A", "B", "C"], &["S1", "S2"], "A", mode);
    let a = Scheduler::new(o.clone()).build(start, start + Duration::days(27)).unwrap();
    let b = Scheduler::new(o.clone()).build(start, start + Duration::days(27)).unwrap();
    assert_eq!(a, b);

    let mut rng_a = StdRng::seed_from_u64(5);
    let mut rng_b = StdRng::seed_from_u64(5);
    let scheduler = Scheduler::new(o);
    let c = scheduler
        .build_with_rng(start, start + Duration::days(27), &mut rng_a)
        .unwrap();
    let d = scheduler
        .build_with_rng(start, start + Duration::days(27), &mut rng_b)
        .unwrap();
    assert_eq!(c, d);
}

#[test]
fn partial_week_quota_is_clamped_and_underfill_reported() {
    // vendredi + samedi : deux jours voisins, un seul peut être retenu
    let friday = ymd(2025, 3, 7);
    let o = with_rule(
        &["A", "B", "C"],
        &["S1", "S2"],
        "A",
        DesignatedMode::RandomizedPerWeek {
            days_per_week: 3,
            seed: Some(1),
        },
    );
    let planning = Scheduler::new(o).build(friday, friday + Duration::days(1)).unwrap();
    assert_eq!(planning.workdays.len(), 1);
    assert_eq!(
        planning.warnings,
        vec![ScheduleWarning::UnderfilledWeek {
            week_start: ymd(2025, 3, 2),
            requested: 2,
            selected: 1,
        }]
    );
}

#[test]
fn zero_days_per_week_parks_the_carer_every_day() {
    let start = ymd(2025, 3, 2);
    let o = with_rule(
        &["A", "B", "C"],
        &["S1", "S2"],
        "A",
        DesignatedMode::RandomizedPerWeek {
            days_per_week: 0,
            seed: None,
        },
    );
    let planning = Scheduler::new(o).build(start, start + Duration::days(6)).unwrap();
    assert!(planning.workdays.is_empty());
    for day in &planning.schedule.days {
        assert_eq!(day.get(2), Some(&cell("A")));
    }
}

#[test]
fn days_per_week_above_seven_is_rejected() {
    let day = ymd(2025, 3, 2);
    let o = with_rule(
        &["A", "B"],
        &["S1"],
        "A",
        DesignatedMode::RandomizedPerWeek {
            days_per_week: 8,
            seed: None,
        },
    );
    let err = Scheduler::new(o).build(day, day).unwrap_err();
    assert!(matches!(err, SchedError::InvalidDaysPerWeek(8)));
}
