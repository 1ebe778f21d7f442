use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use salah::hijri::gregorian_date;
use salah::projection::disclaimer_level;
use salah::{
    CalculationMethod, CalendarVariant, DailyPrayerTimes, GeoCoordinate, Madhab, PrayerResult,
    compute_prayer_times, to_hijri,
};

/// Latitudes where the sun rises and sets every day of the year
fn latitude_strategy() -> impl Strategy<Value = f64> {
    -60.0..=60.0
}

/// Latitudes where Fajr and Isha depend on the high-latitude fallback
fn high_latitude_strategy() -> impl Strategy<Value = f64> {
    (60.0..=67.0f64, any::<bool>()).prop_map(|(lat, south)| if south { -lat } else { lat })
}

fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..=180.0
}

/// Dates between 1950 and 2100
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..55_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1950, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn method_strategy() -> impl Strategy<Value = CalculationMethod> {
    proptest::sample::select(CalculationMethod::ALL.to_vec())
}

fn madhab_strategy() -> impl Strategy<Value = Madhab> {
    proptest::sample::select(Madhab::ALL.to_vec())
}

/// Either five strictly ordered times or a reported latitude limitation
fn check_ordered_or_limited(result: PrayerResult<DailyPrayerTimes>) -> Result<(), String> {
    match result {
        Ok(t) => {
            let times = [t.fajr, t.sunrise, t.dhuhr, t.asr, t.maghrib, t.isha];
            if times.windows(2).all(|pair| pair[0] < pair[1]) {
                Ok(())
            } else {
                Err(format!("out of order: {times:?}"))
            }
        }
        Err(e) if e.is_latitude_limitation() => Ok(()),
        Err(e) => Err(format!("unexpected error: {e}")),
    }
}

#[test]
fn test_high_latitude_sweep_every_method_and_madhab() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for lat in (60..=67).flat_map(|l| [l as f64, -(l as f64)]) {
        let coordinate = GeoCoordinate::new(lat, 10.0).unwrap();
        for offset in (0..366).step_by(15) {
            let date = start + Duration::days(offset);
            for method in CalculationMethod::ALL {
                for madhab in Madhab::ALL {
                    let result = compute_prayer_times(coordinate, date, method, madhab);
                    if let Err(msg) = check_ordered_or_limited(result) {
                        panic!("lat {lat} {date} {method:?} {madhab:?}: {msg}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod prayer_time_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 300,
            ..ProptestConfig::default()
        })]

        /// Any successful day is strictly ordered; failures are only latitude limits
        #[test]
        fn test_times_are_ordered(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
            method in method_strategy(),
            madhab in madhab_strategy(),
        ) {
            let coordinate = GeoCoordinate::new(lat, lon).unwrap();
            match compute_prayer_times(coordinate, date, method, madhab) {
                Ok(t) => {
                    prop_assert!(t.fajr < t.sunrise, "fajr {} !< sunrise {}", t.fajr, t.sunrise);
                    prop_assert!(t.sunrise < t.dhuhr);
                    prop_assert!(t.dhuhr < t.asr);
                    prop_assert!(t.asr < t.maghrib);
                    prop_assert!(t.maghrib < t.isha);
                }
                Err(e) => prop_assert!(
                    e.is_latitude_limitation(),
                    "unexpected error at ({lat}, {lon}) on {date}: {e}"
                ),
            }
        }

        /// Near the polar circles every method and madhab either orders its
        /// times or reports the latitude limit
        #[test]
        fn test_high_latitude_times_are_ordered_or_unsolvable(
            lat in high_latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
        ) {
            let coordinate = GeoCoordinate::new(lat, lon).unwrap();
            for method in CalculationMethod::ALL {
                for madhab in Madhab::ALL {
                    let result = compute_prayer_times(coordinate, date, method, madhab);
                    if let Err(msg) = check_ordered_or_limited(result) {
                        prop_assert!(false, "({lat}, {lon}) {date} {method:?} {madhab:?}: {msg}");
                    }
                }
            }
        }

        /// Same inputs always give the same output
        #[test]
        fn test_computation_is_deterministic(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
            method in method_strategy(),
        ) {
            let coordinate = GeoCoordinate::new(lat, lon).unwrap();
            let first = compute_prayer_times(coordinate, date, method, Madhab::Shafii);
            let second = compute_prayer_times(coordinate, date, method, Madhab::Shafii);
            prop_assert_eq!(first, second);
        }

        /// The longer Hanafi shadow never makes Asr earlier
        #[test]
        fn test_hanafi_asr_not_earlier(
            lat in latitude_strategy(),
            lon in longitude_strategy(),
            date in date_strategy(),
        ) {
            let coordinate = GeoCoordinate::new(lat, lon).unwrap();
            let method = CalculationMethod::MuslimWorldLeague;
            if let (Ok(shafii), Ok(hanafi)) = (
                compute_prayer_times(coordinate, date, method, Madhab::Shafii),
                compute_prayer_times(coordinate, date, method, Madhab::Hanafi),
            ) {
                prop_assert!(hanafi.asr >= shafii.asr);
            }
        }
    }
}

#[cfg(test)]
mod calendar_properties {
    use super::*;

    proptest! {
        /// Arithmetic calendars convert back to the same Gregorian day
        #[test]
        fn test_arithmetic_round_trip(
            date in date_strategy(),
            variant in prop_oneof![Just(CalendarVariant::Civil), Just(CalendarVariant::Tabular)],
        ) {
            let hijri = to_hijri(date, variant);
            prop_assert_eq!(gregorian_date(hijri, variant).unwrap(), date);
        }

        /// Lunation variants invert their own model
        #[test]
        fn test_lunar_round_trip(
            date in date_strategy(),
            variant in prop_oneof![
                Just(CalendarVariant::UmmAlQura),
                Just(CalendarVariant::Astronomical),
            ],
        ) {
            let hijri = to_hijri(date, variant);
            prop_assert!((1..=30).contains(&hijri.day));
            prop_assert_eq!(gregorian_date(hijri, variant).unwrap(), date);
        }

        /// Consecutive days never move the Hijri date backwards
        #[test]
        fn test_hijri_dates_advance(date in date_strategy()) {
            let next = date.succ_opt().unwrap();
            for variant in CalendarVariant::ALL {
                prop_assert!(to_hijri(next, variant) > to_hijri(date, variant));
            }
        }
    }
}

#[cfg(test)]
mod disclaimer_properties {
    use super::*;

    proptest! {
        /// Further away is never reported as more precise
        #[test]
        fn test_disclaimer_monotone(
            today in date_strategy(),
            near in 0i64..4000,
            extra in 0i64..4000,
        ) {
            let closer = today + Duration::days(near);
            let further = today + Duration::days(near + extra);
            prop_assert!(disclaimer_level(closer, today) <= disclaimer_level(further, today));

            let past = today - Duration::days(near);
            let further_past = today - Duration::days(near + extra);
            prop_assert!(disclaimer_level(past, today) <= disclaimer_level(further_past, today));
        }
    }
}
