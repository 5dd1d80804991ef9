#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::normalize_unit_interval;

/// Julian Day of the J2000.0 epoch.
pub(crate) const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// First Julian Day of the Gregorian calendar (1582-10-15).
const GREGORIAN_CALENDAR_START_JD: f64 = 2_299_160.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Normalize a time offset (in minutes) to a small range around zero.
///
/// This function assumes that the input value is effectively an offset that
/// might be off by approximately a whole number of days. It "wraps" values
/// that are more than 20 minutes away from zero by adding or subtracting
/// one full day (1440 minutes), so that the result lies in the range
/// \[-20, 20\] minutes.
pub(crate) fn normalize_time_offset_minutes(minutes: f64) -> f64 {
    let mut limited = minutes;
    if limited < -20.0_f64 {
        limited += 1440.0_f64;
    } else if limited > 20.0_f64 {
        limited -= 1440.0_f64;
    }
    limited
}

/// Compute the equation of time (`EoT`) in minutes, normalized to a small range.
///
/// # Arguments
///
/// * `mean_longitude_deg` - Mean longitude of the Sun (degrees).
/// * `apparent_ra_deg` - Geocentric right ascension of the Sun (degrees).
/// * `nutation_longitude_deg` - Nutation in longitude (degrees).
/// * `true_obliquity_deg` - True obliquity of the ecliptic (degrees).
///
/// # Returns
///
/// The equation of time in minutes, approximately \[-20, 20\].
pub(crate) fn equation_of_time(
    mean_longitude_deg: f64,
    apparent_ra_deg: f64,
    nutation_longitude_deg: f64,
    true_obliquity_deg: f64,
) -> f64 {
    normalize_time_offset_minutes(
        4.0 * (mean_longitude_deg - 0.005_718_3 - apparent_ra_deg
            + nutation_longitude_deg * true_obliquity_deg.to_radians().cos()),
    )
}

/// Compute the astronomical Julian Day for a local calendar date/time.
///
/// - `timezone_hours`: observer offset from UTC, negative west of Greenwich.
/// - `delta_ut1`: UT1 − UTC in seconds, added to the clock seconds.
///
/// ΔT is deliberately not applied here; see [`julian_ephemeris_day`].
#[allow(clippy::too_many_arguments)]
pub(crate) fn julian_day(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: f64,
    delta_ut1: f64,
    timezone_hours: f64,
) -> f64 {
    let day_decimal = f64::from(day)
        + (f64::from(hour) - timezone_hours + (f64::from(minute) + (second + delta_ut1) / 60.0) / 60.0) / 24.0;

    // January and February count as months 13 and 14 of the previous year.
    let (year, month) = if month < 3 { (year - 1, month + 12) } else { (year, month) };

    let mut julian_day = (365.25 * (f64::from(year) + 4716.0)).trunc() + (30.6001 * f64::from(month + 1)).trunc()
        + day_decimal
        - 1524.5;

    if julian_day > GREGORIAN_CALENDAR_START_JD {
        let a = f64::from(year / 100);
        julian_day += 2.0 - a + (a / 4.0).trunc();
    }
    julian_day
}

/// Julian century (T) from the given Julian Day (JD),
/// measured in Julian centuries since the J2000.0 epoch.
pub(crate) fn julian_century_from_julian_day(julian_day: f64) -> f64 {
    (julian_day - J2000_EPOCH_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Julian Ephemeris Day (JDE) from Julian Day (JD) and ΔT `delta_t` in seconds.
pub(crate) fn julian_ephemeris_day(julian_day: f64, delta_t: f64) -> f64 {
    julian_day + delta_t / SECONDS_PER_DAY
}

/// Julian Ephemeris Century (JCE) from Julian Ephemeris Day (JDE).
pub(crate) fn julian_ephemeris_century(ephemeris_day: f64) -> f64 {
    (ephemeris_day - J2000_EPOCH_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Julian Ephemeris Millennium (JME) from Julian Ephemeris Century (JCE).
pub(crate) fn julian_ephemeris_millennium(ephemeris_century: f64) -> f64 {
    ephemeris_century / 10.0
}

/// The chain of day-count time scales for one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct JulianTimes {
    /// Julian Day (UT)
    pub jd: f64,
    /// Julian Century from J2000.0 (UT)
    pub jc: f64,
    /// Julian Ephemeris Day (TT)
    pub jde: f64,
    /// Julian Ephemeris Century (TT)
    pub jce: f64,
    /// Julian Ephemeris Millennium (TT)
    pub jme: f64,
}

impl JulianTimes {
    pub(crate) fn new(julian_day: f64, delta_t: f64) -> Self {
        let jde = julian_ephemeris_day(julian_day, delta_t);
        let jce = julian_ephemeris_century(jde);
        Self {
            jd: julian_day,
            jc: julian_century_from_julian_day(julian_day),
            jde,
            jce,
            jme: julian_ephemeris_millennium(jce),
        }
    }
}

/// Convert a fractional day value (UT) to the local hour of the day.
///
/// The result wraps so it stays within a single local day, \[0.0, 24.0).
pub(crate) fn dayfrac_to_local_hr(day_fraction: f64, timezone_hours: f64) -> f64 {
    24.0 * normalize_unit_interval(day_fraction + timezone_hours / 24.0)
}
