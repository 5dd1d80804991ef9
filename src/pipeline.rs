//! Runs the position stages in order for one validated input.
//!
//! Every intermediate value lives in a [`Context`] that is built fresh per
//! call and dropped once the [`SpaOutput`] has been extracted.

use log::trace;

use crate::{
    geo::{
        altitude, azimuth_astronomical, azimuth_from_north, refraction_correction, surface_incidence_angle,
        GeocentricPosition, HeliocentricPosition, Nutation, TopocentricPosition,
    },
    rts,
    time::{julian_day, JulianTimes},
    types::{SpaInput, SpaOutput},
};

/// Geocentric right ascension and declination of the Sun with everything
/// needed to derive them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct GeocentricSun {
    pub times: JulianTimes,
    pub heliocentric: HeliocentricPosition,
    pub nutation: Nutation,
    pub geocentric: GeocentricPosition,
}

impl GeocentricSun {
    pub(crate) fn at(julian_day: f64, delta_t: f64) -> Self {
        let times = JulianTimes::new(julian_day, delta_t);
        let heliocentric = HeliocentricPosition::at(times.jme);
        let nutation = Nutation::at(times.jce);
        let geocentric = GeocentricPosition::new(&times, &heliocentric, &nutation);
        Self {
            times,
            heliocentric,
            nutation,
            geocentric,
        }
    }
}

/// All intermediate values of one position computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Context {
    pub sun: GeocentricSun,
    pub topocentric: TopocentricPosition,
    /// Topocentric elevation without refraction, degrees
    pub e0: f64,
    /// Refraction correction, degrees
    pub del_e: f64,
    /// Topocentric elevation, degrees
    pub elevation: f64,
    pub zenith: f64,
    pub azimuth_astro: f64,
    pub azimuth: f64,
}

impl Context {
    pub(crate) fn new(input: &SpaInput) -> Self {
        let instant = &input.instant;
        let observer = &input.observer;

        let jd = julian_day(
            instant.year,
            instant.month,
            instant.day,
            instant.hour,
            instant.minute,
            instant.second,
            instant.delta_ut1,
            observer.timezone,
        );
        let sun = GeocentricSun::at(jd, instant.delta_t);
        trace!("time scales: {:?}", sun.times);
        trace!("heliocentric: {:?}", sun.heliocentric);
        trace!("nutation: {:?}", sun.nutation);
        trace!("geocentric: {:?}", sun.geocentric);

        let topocentric = TopocentricPosition::new(
            observer.latitude,
            observer.longitude,
            observer.elevation,
            &sun.geocentric,
            sun.heliocentric.radius,
        );
        trace!("topocentric: {topocentric:?}");

        let e0 = altitude(observer.latitude, topocentric.declination, topocentric.local_hour_angle);
        let del_e = refraction_correction(input.refraction, &input.atmosphere, e0);
        let elevation = e0 + del_e;
        let azimuth_astro = azimuth_astronomical(topocentric.local_hour_angle, observer.latitude, topocentric.declination);
        let context = Self {
            sun,
            topocentric,
            e0,
            del_e,
            elevation,
            zenith: 90.0 - elevation,
            azimuth_astro,
            azimuth: azimuth_from_north(azimuth_astro),
        };
        trace!(
            "e0={} del_e={} zenith={} azimuth={}",
            context.e0,
            context.del_e,
            context.zenith,
            context.azimuth
        );
        context
    }
}

/// Computes the outputs `input.mode` asks for. `input` must already be valid.
pub(crate) fn solar_position(input: &SpaInput) -> SpaOutput {
    let context = Context::new(input);

    let incidence = input.mode.incidence().then(|| {
        surface_incidence_angle(
            context.zenith,
            context.azimuth_astro,
            input.surface.azm_rotation,
            input.surface.slope,
        )
    });
    let rise_transit_set = input
        .mode
        .rise_transit_set()
        .then(|| rts::rise_transit_set(input, &context.sun));

    SpaOutput {
        zenith: context.zenith,
        azimuth: context.azimuth,
        azimuth_astro: context.azimuth_astro,
        elevation: context.elevation,
        incidence,
        rise_transit_set,
        julian_day: context.sun.times.jd,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    extern crate std;

    use super::*;
    use crate::types::{Atmosphere, CalendarInstant, Observer, OutputMode, RefractionModel, Surface};
    use approx::assert_abs_diff_eq;

    fn golden() -> SpaInput {
        SpaInput::new(
            CalendarInstant::new(2003, 10, 17, 12, 30, 30.0).with_delta_t(67.0),
            Observer::new(39.742476, -105.1786, 1830.14, -7.0),
        )
        .with_atmosphere(Atmosphere {
            pressure: 820.0,
            temperature: 11.0,
            atmos_refract: 0.5667,
        })
        .with_surface(Surface::new(30.0, -10.0))
    }

    #[test]
    fn context_carries_every_stage() {
        let context = Context::new(&golden().with_refraction(RefractionModel::Bennett));
        assert_abs_diff_eq!(context.sun.times.jd, 2_452_930.312_847, epsilon = 1e-6);
        assert_abs_diff_eq!(context.sun.heliocentric.longitude, 24.018_262, epsilon = 1e-6);
        assert_abs_diff_eq!(context.topocentric.observer_hour_angle, 11.105_902, epsilon = 1e-5);
        assert_abs_diff_eq!(context.e0, 39.872_046, epsilon = 1e-5);
        assert_abs_diff_eq!(context.del_e, 0.016_332, epsilon = 1e-5);
        assert_abs_diff_eq!(context.elevation, context.e0 + context.del_e, epsilon = 1e-12);
        assert_abs_diff_eq!(context.zenith, 50.111_622, epsilon = 1e-5);
    }

    #[test]
    fn mode_selects_optional_outputs() {
        let output = solar_position(&golden());
        assert!(output.incidence.is_none());
        assert!(output.rise_transit_set.is_none());

        let output = solar_position(&golden().with_mode(OutputMode::ZenithAzimuthIncidence));
        assert!(output.incidence.is_some());
        assert!(output.rise_transit_set.is_none());

        let output = solar_position(&golden().with_mode(OutputMode::ZenithAzimuthRiseTransitSet));
        assert!(output.incidence.is_none());
        assert!(output.rise_transit_set.is_some());

        let output = solar_position(&golden().with_mode(OutputMode::All));
        assert!(output.incidence.is_some());
        assert!(output.rise_transit_set.is_some());
    }

    #[test]
    fn optional_outputs_do_not_change_the_position() {
        let plain = solar_position(&golden());
        let all = solar_position(&golden().with_mode(OutputMode::All));
        assert_eq!(plain.zenith.to_bits(), all.zenith.to_bits());
        assert_eq!(plain.azimuth.to_bits(), all.azimuth.to_bits());
    }
}
