//! Properties that hold for every valid input.

#![allow(clippy::unwrap_used, clippy::panic)]
extern crate std;

use chrono::{DateTime, Datelike, Timelike, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use proptest::prelude::*;
use proptest_arbitrary_interop::arb;
use std::format;

use crate::{
    compute, Atmosphere, CalendarInstant, NoEventReason, Observer, OutputMode, RefractionModel, SpaError, SpaInput,
    SunEvent, Surface,
};

fn any_refraction() -> impl Strategy<Value = RefractionModel> {
    prop_oneof![Just(RefractionModel::Piecewise), Just(RefractionModel::Bennett)]
}

/// Valid inputs with every output requested.
fn any_valid_input() -> impl Strategy<Value = SpaInput> {
    (
        (-2000i32..=6000, 1i32..=12, 1i32..=31, 0i32..=23, 0i32..=59, 0.0f64..60.0),
        (-0.9f64..0.9, -8000.0f64..=8000.0),
        (-180.0f64..=180.0, -90.0f64..=90.0, -500.0f64..=9000.0, -12.0f64..=12.0),
        (500.0f64..=1100.0, -40.0f64..=50.0, 0.0f64..=1.0),
        (-90.0f64..=90.0, -180.0f64..=180.0),
        any_refraction(),
    )
        .prop_map(
            |(
                (year, month, day, hour, minute, second),
                (delta_ut1, delta_t),
                (longitude, latitude, elevation, timezone),
                (pressure, temperature, atmos_refract),
                (slope, azm_rotation),
                refraction,
            )| {
                SpaInput::new(
                    CalendarInstant::new(year, month, day, hour, minute, second)
                        .with_delta_ut1(delta_ut1)
                        .with_delta_t(delta_t),
                    Observer::new(latitude, longitude, elevation, timezone),
                )
                .with_atmosphere(Atmosphere {
                    pressure,
                    temperature,
                    atmos_refract,
                })
                .with_surface(Surface::new(slope, azm_rotation))
                .with_mode(OutputMode::All)
                .with_refraction(refraction)
            },
        )
}

proptest! {
    #[test]
    fn identical_inputs_give_identical_outputs(input in any_valid_input()) {
        let first = compute(&input).unwrap();
        let second = compute(&input).unwrap();
        prop_assert_eq!(first.zenith.to_bits(), second.zenith.to_bits());
        prop_assert_eq!(first.azimuth.to_bits(), second.azimuth.to_bits());
        // Debug output compares NaN-safe and covers the optional outputs.
        prop_assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn angles_stay_in_their_domains(input in any_valid_input()) {
        let output = compute(&input).unwrap();
        prop_assert!((0.0..=180.0).contains(&output.zenith), "{output:?}");
        prop_assert!((0.0..360.0).contains(&output.azimuth));
        prop_assert!((0.0..360.0).contains(&output.azimuth_astro));
        prop_assert!((output.zenith + output.elevation - 90.0).abs() < 1e-9);

        let turned = (output.azimuth_astro + 180.0) % 360.0;
        prop_assert!((turned - output.azimuth).abs() < 1e-9 || (turned - output.azimuth).abs() > 359.999_999);
    }

    #[test]
    fn equation_of_time_stays_within_twenty_minutes(input in any_valid_input()) {
        let rts = compute(&input).unwrap().rise_transit_set.unwrap();
        prop_assert!((-20.0..=20.0).contains(&rts.equation_of_time), "{}", rts.equation_of_time);
    }

    #[test]
    fn events_are_all_or_nothing(input in any_valid_input()) {
        let rts = compute(&input).unwrap().rise_transit_set.unwrap();
        match rts.transit {
            SunEvent::Occurs(_) => {
                prop_assert!(rts.sunrise.hours().is_some() && rts.sunset.hours().is_some());
                prop_assert!(rts.transit_altitude.is_some());
                for event in [rts.sunrise, rts.transit, rts.sunset] {
                    prop_assert!((0.0..24.0).contains(&event.hours().unwrap()));
                }
                let rise_angle = rts.sunrise_hour_angle.unwrap();
                let set_angle = rts.sunset_hour_angle.unwrap();
                prop_assert!((-180.0..=180.0).contains(&rise_angle));
                prop_assert!((-180.0..=180.0).contains(&set_angle));
            }
            SunEvent::NoEvent(reason) => {
                prop_assert_eq!(rts.sunrise, SunEvent::NoEvent(reason));
                prop_assert_eq!(rts.sunset, SunEvent::NoEvent(reason));
                prop_assert!(rts.sunrise_hour_angle.is_none() && rts.sunset_hour_angle.is_none());
            }
        }
    }

    #[test]
    fn sunrise_precedes_transit_precedes_sunset(
        (year, month, day) in (-2000i32..=6000, 1i32..=12, 1i32..=28),
        longitude in -180.0f64..=180.0,
        latitude in -60.0f64..=60.0,
        delta_t in -8000.0f64..=8000.0
    ) {
        // Keep the local clock close to solar time so the day does not wrap.
        let timezone = (longitude / 15.0).round().clamp(-12.0, 12.0);
        let input = SpaInput::new(
            CalendarInstant::new(year, month, day, 12, 0, 0.0).with_delta_t(delta_t),
            Observer::new(latitude, longitude, 0.0, timezone),
        )
        .with_mode(OutputMode::ZenithAzimuthRiseTransitSet);

        let rts = compute(&input).unwrap().rise_transit_set.unwrap();
        let sunrise = rts.sunrise.hours().unwrap();
        let transit = rts.transit.hours().unwrap();
        let sunset = rts.sunset.hours().unwrap();
        prop_assert!(sunrise < transit && transit < sunset, "{sunrise} {transit} {sunset}");
    }

    #[test]
    fn solstice_sun_never_crosses_polar_horizon(
        latitude in 70.0f64..=89.9,
        year in 1900i32..=2100,
        longitude in -180.0f64..=180.0
    ) {
        let solstice = |latitude: f64, month: i32| {
            let input = SpaInput::new(
                CalendarInstant::new(year, month, 21, 12, 0, 0.0).with_delta_t(69.0),
                Observer::new(latitude, longitude, 0.0, 0.0),
            )
            .with_mode(OutputMode::ZenithAzimuthRiseTransitSet);
            compute(&input).unwrap().rise_transit_set.unwrap().transit
        };

        prop_assert_eq!(solstice(latitude, 6), SunEvent::NoEvent(NoEventReason::PolarDay));
        prop_assert_eq!(solstice(latitude, 12), SunEvent::NoEvent(NoEventReason::PolarNight));
        prop_assert_eq!(solstice(-latitude, 6), SunEvent::NoEvent(NoEventReason::PolarNight));
        prop_assert_eq!(solstice(-latitude, 12), SunEvent::NoEvent(NoEventReason::PolarDay));
    }

    #[test]
    fn arbitrary_datetimes_are_checked_by_year_and_second(datetime in arb::<DateTime<Utc>>()) {
        let input = SpaInput::from_datetime(&datetime, 39.742476, -105.1786, 1830.14).with_delta_t(69.0);
        let year_in_range = (-2000..=6000).contains(&datetime.year());
        let leap_second = datetime.nanosecond() >= 1_000_000_000;

        match compute(&input) {
            Ok(output) => {
                prop_assert!(year_in_range && !leap_second);
                prop_assert!((0.0..=180.0).contains(&output.zenith));
            }
            Err(SpaError::Year) => prop_assert!(!year_in_range),
            Err(SpaError::Second) => prop_assert!(year_in_range && leap_second),
            Err(other) => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
