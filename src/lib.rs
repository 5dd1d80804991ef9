//! # Solar Position
//!
//! The NREL Solar Position Algorithm (SPA): topocentric zenith and azimuth of
//! the Sun, the incidence angle on a tilted surface, the equation of time and
//! sunrise, sun transit and sunset for any observer between the years -2000
//! and 6000.
//!
//! The computation corrects for nutation, aberration, parallax on an oblate
//! Earth and atmospheric refraction. It is a pure function of its input; no
//! state is kept between calls.
//!
//! ## Basic Usage
//!
//! ```
//! use solar_position::{compute, Atmosphere, CalendarInstant, Observer, OutputMode, SpaInput, Surface};
//!
//! // 2003-10-17 12:30:30 local time, 7 hours behind UTC
//! let instant = CalendarInstant::new(2003, 10, 17, 12, 30, 30.0).with_delta_t(67.0);
//! // Golden, Colorado
//! let observer = Observer::new(39.742476, -105.1786, 1830.14, -7.0);
//!
//! let input = SpaInput::new(instant, observer)
//!     .with_atmosphere(Atmosphere { pressure: 820.0, temperature: 11.0, atmos_refract: 0.5667 })
//!     .with_surface(Surface::new(30.0, -10.0))
//!     .with_mode(OutputMode::All);
//!
//! let output = compute(&input).unwrap();
//! println!("Zenith: {:.6}°", output.zenith);
//! println!("Azimuth: {:.6}°", output.azimuth);
//!
//! let rts = output.rise_transit_set.unwrap();
//! match rts.sunrise.to_naive_time() {
//!     Some(time) => println!("Sunrise at {time}"),
//!     None => println!("No sunrise: {:?}", rts.sunrise),
//! }
//! ```
//!
//! ## Validation
//!
//! Inputs are range checked before anything is computed. Only the first field
//! out of range is reported, as a [`SpaError`] whose [`SpaError::code`] is the
//! classic numeric SPA error code.
//!
//! ```
//! use solar_position::{compute, validation_code, CalendarInstant, Observer, SpaError, SpaInput};
//!
//! let mut input = SpaInput::new(CalendarInstant::new(2024, 13, 1, 30, 0, 0.0), Observer::new(0.0, 0.0, 0.0, 0.0));
//! assert_eq!(compute(&input), Err(SpaError::Month));
//! assert_eq!(validation_code(&input), 2);
//!
//! input.instant.month = 12;
//! input.instant.hour = 12;
//! assert_eq!(validation_code(&input), 0);
//! ```
#![no_std]

mod geo;
mod math;
mod pipeline;
mod rts;
mod terms;
mod time;
mod types;
mod validate;

#[cfg(test)]
mod _tests;

pub use math::{normalize_degrees_180, normalize_degrees_180_pm, normalize_degrees_360, normalize_unit_interval};
pub use types::{
    timezone_hours, Atmosphere, CalendarInstant, NoEventReason, Observer, OutputMode, RefractionModel, RiseTransitSet,
    SpaError, SpaInput, SpaOutput, SunEvent, Surface,
};
pub use validate::{validate, validation_code};

/// A validated solar position input, ready to compute.
///
/// Validation happens once in [`SpaCalculator::new`]; [`SpaCalculator::calculate`]
/// cannot fail afterwards.
///
/// # Example
///
/// ```
/// use solar_position::{CalendarInstant, Observer, SpaCalculator, SpaInput};
///
/// // London at noon on the June solstice
/// let input = SpaInput::new(
///     CalendarInstant::new(2024, 6, 21, 12, 0, 0.0).with_delta_t(69.0),
///     Observer::new(51.5, 0.0, 0.0, 0.0),
/// );
/// let calculator = SpaCalculator::new(input).unwrap();
///
/// let output = calculator.calculate();
/// assert!(output.zenith > 27.0 && output.zenith < 29.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpaCalculator {
    input: SpaInput,
}

impl SpaCalculator {
    /// Validates `input`.
    ///
    /// # Errors
    ///
    /// The [`SpaError`] of the first field out of range.
    pub fn new(input: SpaInput) -> Result<Self, SpaError> {
        validate(&input)?;
        Ok(Self { input })
    }

    /// The validated input.
    pub fn input(&self) -> &SpaInput {
        &self.input
    }

    /// Computes the sun position and whatever else the input's [`OutputMode`] asks for.
    pub fn calculate(&self) -> SpaOutput {
        pipeline::solar_position(&self.input)
    }
}

/// Validates `input` and computes the sun position.
///
/// # Errors
///
/// The [`SpaError`] of the first field out of range; nothing is computed then.
pub fn compute(input: &SpaInput) -> Result<SpaOutput, SpaError> {
    SpaCalculator::new(*input).map(|calculator| calculator.calculate())
}
