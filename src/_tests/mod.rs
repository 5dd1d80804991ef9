extern crate std;

mod property_tests;

use crate::{Atmosphere, CalendarInstant, Observer, OutputMode, SpaInput, Surface};

/// The worked example of the NREL SPA technical report: Golden, Colorado on
/// 2003-10-17 at 12:30:30 local standard time.
pub(crate) fn golden_co() -> SpaInput {
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
    .with_mode(OutputMode::All)
}
