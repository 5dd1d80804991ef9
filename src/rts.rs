//! Sunrise, sun transit and sunset for the calendar day of the input.
//!
//! The geocentric position is sampled at 0 h UT of the day before, the day of
//! and the day after, interpolated at the approximate event times and each
//! event is then corrected once.
//!
//! Times are wrapped into the local day, so sunrise < transit < sunset holds
//! only away from the polar circles. Within a few degrees of them the sunset
//! of a long day can wrap past local midnight and read as an early hour.

#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::debug;

use crate::{
    geo::{altitude, sun_mean_longitude, SUN_RADIUS},
    math::{normalize_degrees_180, normalize_degrees_180_pm, normalize_unit_interval},
    pipeline::GeocentricSun,
    time::{dayfrac_to_local_hr, equation_of_time, julian_day},
    types::{NoEventReason, RiseTransitSet, SpaInput, SunEvent},
};

/// Sidereal rotation in degrees per fraction of a day.
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985_647;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One of the three daily events, in the order they are solved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Event {
    Transit = 0,
    Rise = 1,
    Set = 2,
}

/// Position of the sun at 0 h UT on three consecutive days.
#[derive(Copy, Clone, Debug, PartialEq)]
struct ThreeDaySamples {
    right_ascension: [f64; 3],
    declination: [f64; 3],
}

impl ThreeDaySamples {
    fn around(julian_day_zero: f64) -> Self {
        let mut samples = Self {
            right_ascension: [0.0; 3],
            declination: [0.0; 3],
        };
        for (index, offset) in [-1.0, 0.0, 1.0].into_iter().enumerate() {
            // ΔT is dropped for the samples; it is applied to the interpolation instant instead.
            let sun = GeocentricSun::at(julian_day_zero + offset, 0.0);
            samples.right_ascension[index] = sun.geocentric.right_ascension;
            samples.declination[index] = sun.geocentric.declination;
        }
        samples
    }
}

/// Three-point interpolation of `samples` at `n` days after the middle one.
///
/// A difference of 2 or more between neighbours is a wrap of the 0/360 cut in
/// right ascension and is folded back into \[0, 1).
fn interpolate(samples: &[f64; 3], n: f64) -> f64 {
    let mut a = samples[1] - samples[0];
    let mut b = samples[2] - samples[1];
    if a.abs() >= 2.0 {
        a = normalize_unit_interval(a);
    }
    if b.abs() >= 2.0 {
        b = normalize_unit_interval(b);
    }
    samples[1] + n * (a + b + (b - a) * n) / 2.0
}

/// Approximate hour angle at sunrise/sunset (H₀) in degrees, or why there is none.
fn rise_set_hour_angle(latitude: f64, declination: f64, h0_prime: f64) -> Result<f64, NoEventReason> {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    let argument = (h0_prime.to_radians().sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());

    if (-1.0..=1.0).contains(&argument) {
        Ok(normalize_degrees_180(argument.acos().to_degrees()))
    } else if argument < -1.0 {
        Err(NoEventReason::PolarDay)
    } else {
        Err(NoEventReason::PolarNight)
    }
}

/// Refined time of one event as a fraction of the UT day, with the local hour
/// angle and altitude found at the approximate time.
#[derive(Copy, Clone, Debug)]
struct Refined {
    day_fraction: f64,
    hour_angle: f64,
    altitude: f64,
}

/// Computes the equation of time and the sunrise, transit and sunset of the
/// local calendar date in `input`, reported in the observer's local hours.
pub(crate) fn rise_transit_set(input: &SpaInput, sun: &GeocentricSun) -> RiseTransitSet {
    let instant = &input.instant;
    let observer = &input.observer;

    let equation_of_time = equation_of_time(
        sun_mean_longitude(sun.times.jme),
        sun.geocentric.right_ascension,
        sun.nutation.longitude,
        sun.geocentric.true_obliquity,
    );

    // 0 h UT of the calendar date, without ΔUT1 or the timezone.
    let jd_zero = julian_day(instant.year, instant.month, instant.day, 0, 0, 0.0, 0.0, 0.0);
    let sidereal_time = GeocentricSun::at(jd_zero, instant.delta_t).geocentric.sidereal_time;
    let samples = ThreeDaySamples::around(jd_zero);

    let h0_prime = -(SUN_RADIUS + input.atmosphere.atmos_refract);
    let h0 = match rise_set_hour_angle(observer.latitude, samples.declination[1], h0_prime) {
        Ok(h0) => h0,
        Err(reason) => {
            debug!("no sunrise or sunset on {}-{}-{}: {reason:?}", instant.year, instant.month, instant.day);
            let none = SunEvent::NoEvent(reason);
            return RiseTransitSet {
                equation_of_time,
                sunrise: none,
                transit: none,
                sunset: none,
                sunrise_hour_angle: None,
                sunset_hour_angle: None,
                transit_altitude: None,
            };
        }
    };

    let transit_approx = (samples.right_ascension[1] - observer.longitude - sidereal_time) / 360.0;
    let mut approx = [0.0; 3];
    approx[Event::Transit as usize] = normalize_unit_interval(transit_approx);
    approx[Event::Rise as usize] = normalize_unit_interval(transit_approx - h0 / 360.0);
    approx[Event::Set as usize] = normalize_unit_interval(transit_approx + h0 / 360.0);

    let refine = |event: Event| -> Refined {
        let m = approx[event as usize];
        let n = m + instant.delta_t / SECONDS_PER_DAY;
        let right_ascension = interpolate(&samples.right_ascension, n);
        let declination = interpolate(&samples.declination, n);

        let hour_angle =
            normalize_degrees_180_pm(sidereal_time + SIDEREAL_DEGREES_PER_DAY * m + observer.longitude - right_ascension);
        let altitude = altitude(observer.latitude, declination, hour_angle);

        let day_fraction = match event {
            Event::Transit => m - hour_angle / 360.0,
            Event::Rise | Event::Set => {
                m + (altitude - h0_prime)
                    / (360.0
                        * declination.to_radians().cos()
                        * observer.latitude.to_radians().cos()
                        * hour_angle.to_radians().sin())
            }
        };
        Refined {
            day_fraction,
            hour_angle,
            altitude,
        }
    };

    let transit = refine(Event::Transit);
    let rise = refine(Event::Rise);
    let set = refine(Event::Set);
    let local = |refined: &Refined| SunEvent::Occurs(dayfrac_to_local_hr(refined.day_fraction, observer.timezone));

    RiseTransitSet {
        equation_of_time,
        sunrise: local(&rise),
        transit: local(&transit),
        sunset: local(&set),
        sunrise_hour_angle: Some(rise.hour_angle),
        sunset_hour_angle: Some(set.hour_angle),
        transit_altitude: Some(transit.altitude),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    extern crate std;

    use super::*;
    use crate::types::{Atmosphere, CalendarInstant, Observer};
    use approx::assert_abs_diff_eq;

    fn input_at(latitude: f64, longitude: f64, timezone: f64, year: i32, month: i32, day: i32) -> SpaInput {
        SpaInput::new(
            CalendarInstant::new(year, month, day, 12, 0, 0.0).with_delta_t(67.0),
            Observer::new(latitude, longitude, 0.0, timezone),
        )
    }

    fn solve(input: &SpaInput) -> RiseTransitSet {
        let instant = &input.instant;
        let jd = julian_day(
            instant.year,
            instant.month,
            instant.day,
            instant.hour,
            instant.minute,
            instant.second,
            instant.delta_ut1,
            input.observer.timezone,
        );
        rise_transit_set(input, &GeocentricSun::at(jd, instant.delta_t))
    }

    #[test]
    fn interpolation_passes_through_samples() {
        let samples = [10.0, 11.0, 12.5];
        assert_abs_diff_eq!(interpolate(&samples, 0.0), 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate(&samples, 1.0), 12.5, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate(&samples, -1.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolation_folds_right_ascension_wrap() {
        // The first difference crosses 360° -> 0° and reads -359.02 before folding to 0.98.
        let samples = [359.4, 0.38, 1.36];
        assert_abs_diff_eq!(interpolate(&samples, 0.5), 0.87, epsilon = 1e-9);
    }

    #[test]
    fn hour_angle_reasons() {
        assert!(rise_set_hour_angle(40.0, 0.0, -0.8333).is_ok());
        assert_eq!(rise_set_hour_angle(80.0, 23.0, -0.8333), Err(NoEventReason::PolarDay));
        assert_eq!(rise_set_hour_angle(80.0, -23.0, -0.8333), Err(NoEventReason::PolarNight));
        assert_eq!(rise_set_hour_angle(-80.0, 23.0, -0.8333), Err(NoEventReason::PolarNight));
    }

    #[test]
    fn equinox_at_equator_is_twelve_hours_long() {
        let rts = solve(&input_at(0.0, 0.0, 0.0, 2024, 3, 20));
        let sunrise = rts.sunrise.hours().unwrap();
        let sunset = rts.sunset.hours().unwrap();
        let transit = rts.transit.hours().unwrap();
        assert!((sunset - sunrise - 12.1).abs() < 0.1, "{sunrise} {sunset}");
        assert!((transit - 12.12).abs() < 0.05, "{transit}");
        assert!(rts.sunrise_hour_angle.unwrap() < 0.0);
        assert!(rts.sunset_hour_angle.unwrap() > 0.0);
        assert!(rts.transit_altitude.unwrap() > 89.0);
    }

    #[test]
    fn midnight_sun_and_polar_night() {
        let summer = solve(&input_at(78.22, 15.65, 1.0, 2024, 6, 21));
        assert_eq!(summer.sunrise, SunEvent::NoEvent(NoEventReason::PolarDay));
        assert_eq!(summer.transit, SunEvent::NoEvent(NoEventReason::PolarDay));
        assert_eq!(summer.sunset, SunEvent::NoEvent(NoEventReason::PolarDay));
        assert!(summer.sunrise_hour_angle.is_none());
        assert!(summer.transit_altitude.is_none());

        let winter = solve(&input_at(78.22, 15.65, 1.0, 2024, 12, 21));
        assert_eq!(winter.transit, SunEvent::NoEvent(NoEventReason::PolarNight));
        assert!((-20.0..=20.0).contains(&winter.equation_of_time));
    }

    #[test]
    fn events_near_polar_circle_stay_within_local_day() {
        for latitude in [65.5, 66.0, 66.12, 66.5, 67.0] {
            for day in 1..=30 {
                let rts = solve(&input_at(latitude, 15.0, 1.0, 2024, 6, day));
                for event in [rts.sunrise, rts.transit, rts.sunset] {
                    if let SunEvent::Occurs(hours) = event {
                        assert!(hours.is_finite() && (0.0..24.0).contains(&hours), "{latitude} {day}: {hours}");
                    }
                }
            }
        }
    }

    #[test]
    fn horizon_refraction_lengthens_the_day() {
        let mut input = input_at(45.0, 0.0, 0.0, 2024, 5, 1);
        input.atmosphere = Atmosphere {
            atmos_refract: 0.0,
            ..Atmosphere::default()
        };
        let short = solve(&input);
        input.atmosphere.atmos_refract = 1.0;
        let long = solve(&input);

        let length = |rts: &RiseTransitSet| rts.sunset.hours().unwrap() - rts.sunrise.hours().unwrap();
        assert!(length(&long) > length(&short));
    }
}
