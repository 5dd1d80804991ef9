#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::{
    math::{eval_cubic, normalize_degrees_360, polynomial},
    terms::{PeriodicTerm, B_TERMS, L_TERMS, PE_TERMS, R_TERMS, Y_TERMS},
    time::{JulianTimes, J2000_EPOCH_JD},
    types::{Atmosphere, RefractionModel},
};

// ============================================================================
// Constants
// ============================================================================

/// Angular radius of the Sun in degrees (approximately 16 arcminutes)
pub(crate) const SUN_RADIUS: f64 = 0.26667;

/// Earth's equatorial radius in meters
const EARTH_EQUATORIAL_RADIUS_METERS: f64 = 6_378_140.0;

/// Ratio of Earth's polar to equatorial radius
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Sun's equatorial horizontal parallax at 1 AU, in arcseconds
const PARALLAX_CONSTANT: f64 = 8.794;

/// Aberration constant in arcseconds
const ABERRATION_CONSTANT: f64 = 20.4898;

const ARCSECONDS_PER_DEGREE: f64 = 3600.0;

/// Mean rate of increase of Greenwich sidereal time (degrees per day)
const SIDEREAL_TIME_RATE: f64 = 360.985_647_366_29;

/// Greenwich mean sidereal time at J2000.0 (degrees)
const GREENWICH_MEAN_SIDEREAL_TIME_BASE: f64 = 280.460_618_37;

/// Periodic series amplitudes are tabulated in units of 10⁻⁸
const EARTH_POSITION_SCALE_FACTOR: f64 = 1.0e8;

/// Nutation amplitudes are tabulated in units of 0.0001″
const NUTATION_SCALE_FACTOR: f64 = 36_000_000.0;

/// Mean obliquity of the ecliptic in arcseconds, ascending powers of JME/10.
const MEAN_OBLIQUITY_COEFFS: [f64; 11] = [
    84_381.448, -4680.93, -1.55, 1999.25, -51.38, -249.67, -39.05, 7.12, 27.87, 5.79, 2.45,
];

/// Mean longitude of the Sun in degrees, ascending powers of JME.
const SUN_MEAN_LONGITUDE_COEFFS: [f64; 6] = [
    280.466_456_7,
    360_007.698_277_9,
    0.030_320_28,
    1.0 / 49_931.0,
    -1.0 / 15_300.0,
    -1.0 / 2_000_000.0,
];

// ============================================================================
// Earth Heliocentric Position
// ============================================================================

/// Earth's position seen from the Sun.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct HeliocentricPosition {
    /// L, degrees in \[0, 360)
    pub longitude: f64,
    /// B, degrees
    pub latitude: f64,
    /// R, astronomical units
    pub radius: f64,
}

impl HeliocentricPosition {
    pub(crate) fn at(julian_millennium: f64) -> Self {
        Self {
            longitude: normalize_degrees_360(evaluate_series(&L_TERMS, julian_millennium).to_degrees()),
            latitude: evaluate_series(&B_TERMS, julian_millennium).to_degrees(),
            radius: evaluate_series(&R_TERMS, julian_millennium),
        }
    }
}

/// Sums one order of a periodic series, each term being `A·cos(B + C·jme)`.
fn periodic_term_sum(terms: &[PeriodicTerm], julian_millennium: f64) -> f64 {
    terms
        .iter()
        .map(|&[a, b, c]| a * (b + c * julian_millennium).cos())
        .sum()
}

/// Evaluates a whole L, B or R series: the per-order sums are the
/// coefficients of a polynomial in `jme`, scaled by 10⁻⁸.
///
/// # Arguments
/// * `orders` - One table of periodic terms per power of JME, lowest first
/// * `julian_millennium` - Julian ephemeris millennium
///
/// # Returns
/// The series value, radians for L and B, AU for R
pub(crate) fn evaluate_series(orders: &[&[PeriodicTerm]], julian_millennium: f64) -> f64 {
    let sums = orders
        .iter()
        .rev()
        .map(|terms| periodic_term_sum(terms, julian_millennium));
    sums.fold(0.0, |acc, sum| acc * julian_millennium + sum) / EARTH_POSITION_SCALE_FACTOR
}

// ============================================================================
// Nutation
// ============================================================================

/// Fundamental lunar and solar arguments, in degrees.
///
/// In order: mean elongation of the Moon from the Sun, mean anomaly of the
/// Sun, mean anomaly of the Moon, Moon's argument of latitude and longitude of
/// the ascending node of the Moon's mean orbit.
pub(crate) fn fundamental_arguments(julian_century: f64) -> [f64; 5] {
    [
        eval_cubic(1.0 / 189_474.0, -0.001_914_20, 445_267.111_48, 297.850_36, julian_century),
        eval_cubic(-1.0 / 300_000.0, -0.000_160_3, 35_999.050_34, 357.527_72, julian_century),
        eval_cubic(1.0 / 56_250.0, 0.008_697_2, 477_198.867_398, 134.962_98, julian_century),
        eval_cubic(1.0 / 327_270.0, -0.003_682_5, 483_202.017_538, 93.271_91, julian_century),
        eval_cubic(1.0 / 450_000.0, 0.002_070_8, -1934.136_261, 125.044_52, julian_century),
    ]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Nutation {
    pub arguments: [f64; 5],
    /// Δψ, degrees
    pub longitude: f64,
    /// Δε, degrees
    pub obliquity: f64,
}

impl Nutation {
    /// Nutation in longitude and obliquity at the given Julian ephemeris century.
    pub(crate) fn at(julian_century: f64) -> Self {
        let arguments = fundamental_arguments(julian_century);

        let (sum_longitude, sum_obliquity) = Y_TERMS.iter().zip(PE_TERMS.iter()).fold(
            (0.0, 0.0),
            |(sum_longitude, sum_obliquity), (multipliers, &[a, b, c, d])| {
                let phase = multipliers
                    .iter()
                    .zip(arguments.iter())
                    .map(|(&multiplier, &argument)| f64::from(multiplier) * argument)
                    .sum::<f64>()
                    .to_radians();
                (
                    sum_longitude + (a + b * julian_century) * phase.sin(),
                    sum_obliquity + (c + d * julian_century) * phase.cos(),
                )
            },
        );

        Self {
            arguments,
            longitude: sum_longitude / NUTATION_SCALE_FACTOR,
            obliquity: sum_obliquity / NUTATION_SCALE_FACTOR,
        }
    }
}

// ============================================================================
// Geocentric Position
// ============================================================================

/// Mean obliquity of the ecliptic (ε₀) in arcseconds.
pub(crate) fn ecliptic_mean_obliquity(julian_millennium: f64) -> f64 {
    polynomial(&MEAN_OBLIQUITY_COEFFS, julian_millennium / 10.0)
}

/// Aberration correction (Δτ) in degrees for an Earth-Sun distance in AU.
pub(crate) fn aberration_correction(earth_sun_distance: f64) -> f64 {
    -ABERRATION_CONSTANT / (ARCSECONDS_PER_DEGREE * earth_sun_distance)
}

/// Greenwich mean sidereal time (ν₀) in degrees, in \[0, 360).
pub(crate) fn greenwich_mean_sidereal_time(julian_day: f64, julian_century: f64) -> f64 {
    normalize_degrees_360(
        GREENWICH_MEAN_SIDEREAL_TIME_BASE
            + SIDEREAL_TIME_RATE * (julian_day - J2000_EPOCH_JD)
            + julian_century * julian_century * (0.000_387_933 - julian_century / 38_710_000.0),
    )
}

/// Mean longitude of the Sun (M) in degrees, in \[0, 360).
pub(crate) fn sun_mean_longitude(julian_millennium: f64) -> f64 {
    normalize_degrees_360(polynomial(&SUN_MEAN_LONGITUDE_COEFFS, julian_millennium))
}

/// The Sun's apparent position seen from Earth's center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct GeocentricPosition {
    /// Θ, degrees in \[0, 360)
    pub longitude: f64,
    /// β, degrees
    pub latitude: f64,
    /// ε₀, arcseconds
    pub mean_obliquity: f64,
    /// ε, degrees
    pub true_obliquity: f64,
    /// Δτ, degrees
    pub aberration: f64,
    /// λ, degrees
    pub apparent_longitude: f64,
    /// ν₀, degrees
    pub mean_sidereal_time: f64,
    /// ν, degrees
    pub sidereal_time: f64,
    /// α, degrees in \[0, 360)
    pub right_ascension: f64,
    /// δ, degrees
    pub declination: f64,
}

impl GeocentricPosition {
    pub(crate) fn new(times: &JulianTimes, heliocentric: &HeliocentricPosition, nutation: &Nutation) -> Self {
        let longitude = normalize_degrees_360(heliocentric.longitude + 180.0);
        let latitude = -heliocentric.latitude;

        let mean_obliquity = ecliptic_mean_obliquity(times.jme);
        let true_obliquity = mean_obliquity / ARCSECONDS_PER_DEGREE + nutation.obliquity;

        let aberration = aberration_correction(heliocentric.radius);
        let apparent_longitude = longitude + nutation.longitude + aberration;

        let mean_sidereal_time = greenwich_mean_sidereal_time(times.jd, times.jc);
        let sidereal_time = mean_sidereal_time + nutation.longitude * true_obliquity.to_radians().cos();

        let lambda = apparent_longitude.to_radians();
        let epsilon = true_obliquity.to_radians();
        let beta = latitude.to_radians();
        let right_ascension = normalize_degrees_360(
            (lambda.sin() * epsilon.cos() - beta.tan() * epsilon.sin())
                .atan2(lambda.cos())
                .to_degrees(),
        );
        let declination = (beta.sin() * epsilon.cos() + beta.cos() * epsilon.sin() * lambda.sin())
            .asin()
            .to_degrees();

        Self {
            longitude,
            latitude,
            mean_obliquity,
            true_obliquity,
            aberration,
            apparent_longitude,
            mean_sidereal_time,
            sidereal_time,
            right_ascension,
            declination,
        }
    }
}

// ============================================================================
// Topocentric Position
// ============================================================================

/// The Sun's position corrected for the observer's offset from Earth's center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct TopocentricPosition {
    /// H, geocentric observer hour angle in degrees, \[0, 360)
    pub observer_hour_angle: f64,
    /// ξ, equatorial horizontal parallax in degrees
    pub equatorial_parallax: f64,
    /// Δα, parallax in right ascension in degrees
    pub parallax_right_ascension: f64,
    /// α′, degrees
    pub right_ascension: f64,
    /// δ′, degrees
    pub declination: f64,
    /// H′, degrees
    pub local_hour_angle: f64,
}

impl TopocentricPosition {
    /// Applies parallax for an observer at `latitude`/`longitude` (degrees) and
    /// `elevation` (meters) on an oblate Earth.
    ///
    /// # Arguments
    /// * `latitude`, `longitude`, `elevation` - Observer location
    /// * `geocentric` - Apparent geocentric position of the Sun
    /// * `earth_sun_distance` - R in AU
    pub(crate) fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        geocentric: &GeocentricPosition,
        earth_sun_distance: f64,
    ) -> Self {
        let observer_hour_angle =
            normalize_degrees_360(geocentric.sidereal_time + longitude - geocentric.right_ascension);
        let equatorial_parallax = PARALLAX_CONSTANT / (ARCSECONDS_PER_DEGREE * earth_sun_distance);

        let lat = latitude.to_radians();
        let xi = equatorial_parallax.to_radians();
        let hour_angle = observer_hour_angle.to_radians();
        let delta = geocentric.declination.to_radians();

        // Observer's geocentric position: ρ·sin φ′ and ρ·cos φ′.
        let u = (EARTH_AXIS_RATIO * lat.tan()).atan();
        let y = EARTH_AXIS_RATIO * u.sin() + elevation * lat.sin() / EARTH_EQUATORIAL_RADIUS_METERS;
        let x = u.cos() + elevation * lat.cos() / EARTH_EQUATORIAL_RADIUS_METERS;

        let denominator = delta.cos() - x * xi.sin() * hour_angle.cos();
        let delta_alpha = (-x * xi.sin() * hour_angle.sin()).atan2(denominator);
        let delta_prime = ((delta.sin() - y * xi.sin()) * delta_alpha.cos()).atan2(denominator);

        let parallax_right_ascension = delta_alpha.to_degrees();
        Self {
            observer_hour_angle,
            equatorial_parallax,
            parallax_right_ascension,
            right_ascension: geocentric.right_ascension + parallax_right_ascension,
            declination: delta_prime.to_degrees(),
            local_hour_angle: observer_hour_angle - parallax_right_ascension,
        }
    }
}

/// Altitude above the horizon in degrees of a body at `declination` and
/// local `hour_angle` (both degrees) for an observer at `latitude`.
pub(crate) fn altitude(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = latitude.to_radians();
    let dec = declination.to_radians();
    (lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.to_radians().cos())
        .asin()
        .to_degrees()
}

// ============================================================================
// Refraction and Final Angles
// ============================================================================

/// Atmospheric refraction correction (Δe) in degrees for the uncorrected
/// topocentric elevation `e0` (degrees). Always added to `e0`.
pub(crate) fn refraction_correction(model: RefractionModel, atmosphere: &Atmosphere, e0: f64) -> f64 {
    let Atmosphere {
        pressure,
        temperature,
        atmos_refract,
    } = *atmosphere;

    match model {
        RefractionModel::Piecewise => {
            let pt = pressure / (temperature + 273.15);
            if e0 > -2.5 && e0 < 15.0 {
                pt * (0.1594 + 0.0196 * e0 + 2.0e-5 * e0 * e0) / (1.0 + 0.505 * e0 + 0.0845 * e0 * e0)
            } else if (15.0..90.0).contains(&e0) {
                0.00452 * pt / e0.to_radians().tan()
            } else {
                0.0
            }
        }
        RefractionModel::Bennett => {
            if e0 >= -(SUN_RADIUS + atmos_refract) {
                (pressure / 1010.0) * (283.0 / (273.0 + temperature)) * 1.02
                    / (60.0 * (e0 + 10.3 / (e0 + 5.11)).to_radians().tan())
            } else {
                0.0
            }
        }
    }
}

/// Topocentric azimuth in degrees measured westward from south, in \[0, 360).
pub(crate) fn azimuth_astronomical(local_hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    let h = local_hour_angle.to_radians();
    let lat = latitude.to_radians();
    normalize_degrees_360(
        h.sin()
            .atan2(h.cos() * lat.sin() - declination.to_radians().tan() * lat.cos())
            .to_degrees(),
    )
}

/// Converts an astronomer's azimuth (from south) to a navigator's (from north).
pub(crate) fn azimuth_from_north(azimuth_astro: f64) -> f64 {
    normalize_degrees_360(azimuth_astro + 180.0)
}

/// Angle in degrees between the sun and the normal of a surface tilted by
/// `slope` and rotated by `azm_rotation` from south.
pub(crate) fn surface_incidence_angle(zenith: f64, azimuth_astro: f64, azm_rotation: f64, slope: f64) -> f64 {
    let zenith = zenith.to_radians();
    let slope = slope.to_radians();
    (zenith.cos() * slope.cos() + slope.sin() * zenith.sin() * (azimuth_astro - azm_rotation).to_radians().cos())
        .acos()
        .to_degrees()
}
