#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::debug;

use crate::types::{SpaError, SpaInput};

/// Lowest accepted observer elevation in meters.
const MIN_ELEVATION_METERS: f64 = -6_500_000.0;

fn check(valid: bool, error: SpaError) -> Result<(), SpaError> {
    if valid {
        Ok(())
    } else {
        Err(error)
    }
}

fn check_fields(input: &SpaInput) -> Result<(), SpaError> {
    let instant = &input.instant;
    let observer = &input.observer;
    let atmosphere = &input.atmosphere;

    // Calendar fields, then the atmosphere and ΔUT1, then the hour-24 rule.
    check((-2000..=6000).contains(&instant.year), SpaError::Year)?;
    check((1..=12).contains(&instant.month), SpaError::Month)?;
    check((1..=31).contains(&instant.day), SpaError::Day)?;
    check((0..=24).contains(&instant.hour), SpaError::Hour)?;
    check((0..=59).contains(&instant.minute), SpaError::Minute)?;
    check((0.0..60.0).contains(&instant.second), SpaError::Second)?;
    check((0.0..=5000.0).contains(&atmosphere.pressure), SpaError::Pressure)?;
    check(
        atmosphere.temperature > -273.0 && atmosphere.temperature <= 6000.0,
        SpaError::Temperature,
    )?;
    check(
        instant.delta_ut1 > -1.0 && instant.delta_ut1 < 1.0,
        SpaError::DeltaUt1,
    )?;
    check(!(instant.hour == 24 && instant.minute > 0), SpaError::Minute)?;
    check(!(instant.hour == 24 && instant.second > 0.0), SpaError::Second)?;

    check(instant.delta_t.abs() <= 8000.0, SpaError::DeltaT)?;
    check(observer.timezone.abs() <= 18.0, SpaError::Timezone)?;
    check(observer.longitude.abs() <= 180.0, SpaError::Longitude)?;
    check(observer.latitude.abs() <= 90.0, SpaError::Latitude)?;
    check(atmosphere.atmos_refract.abs() <= 5.0, SpaError::AtmosphericRefraction)?;
    check(observer.elevation >= MIN_ELEVATION_METERS, SpaError::Elevation)?;

    if input.mode.incidence() {
        check(input.surface.slope.abs() <= 360.0, SpaError::Slope)?;
        check(input.surface.azm_rotation.abs() <= 360.0, SpaError::AzimuthRotation)?;
    }
    Ok(())
}

/// Checks every input field against its documented range.
///
/// Fields are checked in a fixed order and only the first violation is
/// reported. The surface is only checked when the output mode includes the
/// incidence angle. NaN fails the check of the field it appears in.
///
/// # Errors
///
/// The [`SpaError`] of the first field out of range.
pub fn validate(input: &SpaInput) -> Result<(), SpaError> {
    check_fields(input).inspect_err(|error| debug!("rejected solar position input (code {}): {error}", error.code()))
}

/// Numeric form of [`validate`]: `0` for valid input, otherwise the
/// [`SpaError::code`] of the first violated field.
pub fn validation_code(input: &SpaInput) -> u8 {
    match validate(input) {
        Ok(()) => 0,
        Err(error) => error.code(),
    }
}
