//! Hour-angle conversion tests across timezones and daylight-saving
//! transitions.

use chrono::{DateTime, FixedOffset, TimeZone};
use chrono_tz::America::Denver;
use chrono_tz::Asia::Kolkata;
use solar_geometry::time::{
    hour_angle, hour_angle_to_hours_since_midnight, hours_since_midnight,
    local_times_from_hours_since_midnight,
};

#[test]
fn same_instant_same_hour_angle() {
    // one physical instant expressed three ways
    let utc: DateTime<FixedOffset> = "2023-06-21T20:00:00Z".parse().unwrap();
    let denver = utc.with_timezone(&Denver);
    let kolkata = utc.with_timezone(&Kolkata);

    let eot = [-1.5];
    let from_utc = hour_angle(&[utc], -105.0, &eot).unwrap();
    let from_denver = hour_angle(&[denver], -105.0, &eot).unwrap();
    let from_kolkata = hour_angle(&[kolkata], -105.0, &eot).unwrap();

    // Kolkata's local calendar is already on the 22nd, which surfaces as a
    // whole turn of difference rather than a different physical angle
    assert!((from_utc[0] - from_denver[0]).abs() < 1e-9);
    assert!((from_utc[0] - from_kolkata[0] - 360.0).abs() < 1e-9);
    assert!(
        (from_utc[0].to_radians().sin() - from_kolkata[0].to_radians().sin()).abs() < 1e-9
    );
}

#[test]
fn round_trip_through_dst_transitions() {
    // spring forward and fall back days in Denver
    let times = vec![
        Denver.with_ymd_and_hms(2023, 3, 12, 1, 30, 0).unwrap(),
        Denver.with_ymd_and_hms(2023, 3, 12, 12, 0, 0).unwrap(),
        Denver.with_ymd_and_hms(2023, 11, 5, 0, 30, 0).unwrap(),
        Denver.with_ymd_and_hms(2023, 11, 5, 12, 0, 0).unwrap(),
    ];
    let eot = vec![-10.1, -10.1, 16.4, 16.4];

    let ha = hour_angle(&times, -105.0, &eot).unwrap();
    let hours = hour_angle_to_hours_since_midnight(&times, &ha, -105.0, &eot).unwrap();

    for (time, &recovered) in times.iter().zip(&hours) {
        assert!((hours_since_midnight(time) - recovered).abs() < 1e-9);
    }
}

#[test]
fn local_times_resolve_in_the_right_zone() {
    let anchor = Denver.with_ymd_and_hms(2023, 6, 21, 12, 0, 0).unwrap();
    let resolved = local_times_from_hours_since_midnight(&[anchor], &[5.5]).unwrap();

    let sunrise = resolved[0].as_ref().unwrap();
    assert_eq!(
        sunrise.to_string(),
        Denver
            .with_ymd_and_hms(2023, 6, 21, 5, 30, 0)
            .unwrap()
            .to_string()
    );

    // NaN hours (a polar day) resolve to no timestamp at all
    let none = local_times_from_hours_since_midnight(&[anchor], &[f64::NAN]).unwrap();
    assert!(none[0].is_none());
}

#[test]
fn nonexistent_local_time_in_dst_gap() {
    // 02:30 does not exist on the spring-forward day in Denver
    let anchor = Denver.with_ymd_and_hms(2023, 3, 12, 12, 0, 0).unwrap();
    let resolved = local_times_from_hours_since_midnight(&[anchor], &[2.5]).unwrap();
    assert!(resolved[0].is_none());
}
