use chrono::{DateTime, Datelike, NaiveTime, Offset, TimeZone, Timelike};
#[allow(unused_imports)]
use core_maths::CoreFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the sun is observed from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observer {
    /// Geodetic latitude in degrees, positive north, in \[-90, 90\]
    pub latitude: f64,
    /// Longitude in degrees, positive east of Greenwich, in \[-180, 180\]
    pub longitude: f64,
    /// Elevation above sea level in meters
    pub elevation: f64,
    /// Offset of the local clock from UTC in hours, negative west of Greenwich
    pub timezone: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, elevation: f64, timezone: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            timezone,
        }
    }
}

/// Local atmospheric conditions used by the refraction correction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atmosphere {
    /// Annual average local pressure in millibars, in \[0, 5000\]
    pub pressure: f64,
    /// Annual average local temperature in °C, in (-273, 6000\]
    pub temperature: f64,
    /// Atmospheric refraction at sunrise and sunset in degrees, in \[-5, 5\]
    pub atmos_refract: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            pressure: 1013.25,
            temperature: 12.0,
            atmos_refract: 0.5667,
        }
    }
}

/// A local calendar date and clock time plus the two time corrections.
///
/// `hour == 24` is accepted only together with `minute == 0` and
/// `second == 0`, meaning midnight at the end of `day`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarInstant {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    /// Seconds including the fractional part, in \[0, 60)
    pub second: f64,
    /// UT1 − UTC in seconds, in (-1, 1)
    pub delta_ut1: f64,
    /// TT − UT1 in seconds, in \[-8000, 8000\]
    pub delta_t: f64,
}

impl CalendarInstant {
    /// Creates an instant with both time corrections set to zero.
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            delta_ut1: 0.0,
            delta_t: 0.0,
        }
    }

    /// Copies the local calendar fields out of a chrono datetime.
    ///
    /// The offset of `datetime` is not part of the instant, see
    /// [`timezone_hours`] or [`SpaInput::from_datetime`].
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let local = datetime.naive_local();
        // chrono encodes a leap second as nanoseconds past 1_000_000_000.
        let second = f64::from(local.second()) + f64::from(local.nanosecond()) / 1.0e9;
        Self::new(
            local.year(),
            local.month() as i32,
            local.day() as i32,
            local.hour() as i32,
            local.minute() as i32,
            second,
        )
    }

    pub fn with_delta_t(mut self, delta_t: f64) -> Self {
        self.delta_t = delta_t;
        self
    }

    pub fn with_delta_ut1(mut self, delta_ut1: f64) -> Self {
        self.delta_ut1 = delta_ut1;
        self
    }
}

/// UTC offset of a chrono datetime in hours.
pub fn timezone_hours<Tz: TimeZone>(datetime: &DateTime<Tz>) -> f64 {
    f64::from(datetime.offset().fix().local_minus_utc()) / 3600.0
}

/// Orientation of a collecting surface, used for the incidence angle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Surface {
    /// Tilt from horizontal in degrees, in \[-360, 360\]
    pub slope: f64,
    /// Rotation of the surface normal from south in degrees, in \[-360, 360\]
    pub azm_rotation: f64,
}

impl Surface {
    pub fn new(slope: f64, azm_rotation: f64) -> Self {
        Self { slope, azm_rotation }
    }
}

/// Which outputs to compute.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputMode {
    /// Zenith and azimuth only
    #[default]
    ZenithAzimuth,
    /// Zenith, azimuth and surface incidence
    ZenithAzimuthIncidence,
    /// Zenith, azimuth, equation of time and sunrise/transit/sunset
    ZenithAzimuthRiseTransitSet,
    /// Everything
    All,
}

impl OutputMode {
    /// Whether the surface incidence angle is computed (and the surface validated).
    pub fn incidence(self) -> bool {
        matches!(self, Self::ZenithAzimuthIncidence | Self::All)
    }

    /// Whether the equation of time and sunrise/transit/sunset are computed.
    pub fn rise_transit_set(self) -> bool {
        matches!(self, Self::ZenithAzimuthRiseTransitSet | Self::All)
    }
}

/// Atmospheric refraction formula applied to the topocentric elevation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefractionModel {
    /// Two-band rational/cotangent fit scaled by pressure over absolute temperature.
    /// Zero below -2.5° and at or above 90°.
    #[default]
    Piecewise,
    /// Bennett's formula with pressure and temperature correction, applied while
    /// the sun is above `-(sun radius + atmos_refract)`.
    Bennett,
}

/// Everything one solar position computation needs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaInput {
    pub instant: CalendarInstant,
    pub observer: Observer,
    #[cfg_attr(feature = "serde", serde(default))]
    pub atmosphere: Atmosphere,
    #[cfg_attr(feature = "serde", serde(default))]
    pub surface: Surface,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: OutputMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub refraction: RefractionModel,
}

impl SpaInput {
    /// Creates an input with the default atmosphere, a flat surface and
    /// [`OutputMode::ZenithAzimuth`].
    pub fn new(instant: CalendarInstant, observer: Observer) -> Self {
        Self {
            instant,
            observer,
            atmosphere: Atmosphere::default(),
            surface: Surface::default(),
            mode: OutputMode::default(),
            refraction: RefractionModel::default(),
        }
    }

    /// Builds an input from a zoned chrono datetime. The observer's timezone is
    /// taken from the datetime's offset, both time corrections start at zero.
    ///
    /// ```
    /// use chrono::{FixedOffset, TimeZone};
    /// use solar_position::SpaInput;
    ///
    /// let mst = FixedOffset::west_opt(7 * 3600).unwrap();
    /// let when = mst.with_ymd_and_hms(2003, 10, 17, 12, 30, 30).unwrap();
    /// let input = SpaInput::from_datetime(&when, 39.742476, -105.1786, 1830.14).with_delta_t(67.0);
    ///
    /// assert_eq!(input.observer.timezone, -7.0);
    /// assert_eq!(input.instant.hour, 12);
    /// ```
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self::new(
            CalendarInstant::from_datetime(datetime),
            Observer::new(latitude, longitude, elevation, timezone_hours(datetime)),
        )
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = atmosphere;
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_refraction(mut self, refraction: RefractionModel) -> Self {
        self.refraction = refraction;
        self
    }

    pub fn with_delta_t(mut self, delta_t: f64) -> Self {
        self.instant.delta_t = delta_t;
        self
    }

    pub fn with_delta_ut1(mut self, delta_ut1: f64) -> Self {
        self.instant.delta_ut1 = delta_ut1;
        self
    }
}

/// Why the sun has no rise, transit or set on a given day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoEventReason {
    /// The sun stays above the horizon all day (midnight sun)
    PolarDay,
    /// The sun stays below the horizon all day
    PolarNight,
}

/// A sunrise, transit or sunset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SunEvent {
    /// The event happens at this local time, in fractional hours \[0, 24)
    Occurs(f64),
    /// The sun does not cross the horizon that day
    NoEvent(NoEventReason),
}

impl SunEvent {
    /// Local fractional hours of the event, if it happens.
    pub fn hours(self) -> Option<f64> {
        match self {
            SunEvent::Occurs(hours) => Some(hours),
            SunEvent::NoEvent(_) => None,
        }
    }

    /// Local clock time of the event, if it happens.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        let seconds = self.hours()? * 3600.0;
        if !(0.0..86_400.0).contains(&seconds) {
            return None;
        }
        let whole = seconds.floor();
        let nanos = (((seconds - whole) * 1.0e9) as u32).min(999_999_999);
        NaiveTime::from_num_seconds_from_midnight_opt(whole as u32, nanos)
    }
}

/// Equation of time and the daily sun events for the requested date.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseTransitSet {
    /// Apparent minus mean solar time in minutes, in \[-20, 20\]
    pub equation_of_time: f64,
    pub sunrise: SunEvent,
    /// Local solar noon
    pub transit: SunEvent,
    pub sunset: SunEvent,
    /// Local hour angle at sunrise in degrees, in \[-180, 180\]
    pub sunrise_hour_angle: Option<f64>,
    /// Local hour angle at sunset in degrees, in \[-180, 180\]
    pub sunset_hour_angle: Option<f64>,
    /// Altitude of the sun at transit in degrees
    pub transit_altitude: Option<f64>,
}

/// Topocentric sun position for one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaOutput {
    /// Topocentric zenith angle in degrees
    pub zenith: f64,
    /// Azimuth in degrees eastward from north (navigator convention), in \[0, 360)
    pub azimuth: f64,
    /// Azimuth in degrees westward from south (astronomer convention), in \[0, 360)
    pub azimuth_astro: f64,
    /// Refraction-corrected topocentric elevation in degrees
    pub elevation: f64,
    /// Surface incidence angle in degrees, when the mode asks for it
    pub incidence: Option<f64>,
    /// Equation of time and sun events, when the mode asks for them
    pub rise_transit_set: Option<RiseTransitSet>,
    /// Julian Day of the instant
    pub julian_day: f64,
}

/// Input rejected by validation.
///
/// Validation stops at the first field out of range; the discriminant of each
/// variant is that field's numeric code (see [`SpaError::code`]).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum SpaError {
    /// Year outside \[-2000, 6000\]
    #[error("year out of range")]
    Year = 1,
    /// Month outside \[1, 12\]
    #[error("month out of range")]
    Month = 2,
    /// Day outside \[1, 31\]
    #[error("day out of range")]
    Day = 3,
    /// Hour outside \[0, 24\]
    #[error("hour out of range")]
    Hour = 4,
    /// Minute outside \[0, 59\], or non-zero at hour 24
    #[error("minute out of range")]
    Minute = 5,
    /// Second outside \[0, 60), or non-zero at hour 24
    #[error("second out of range")]
    Second = 6,
    #[error("ΔT out of range")]
    DeltaT = 7,
    #[error("timezone out of range")]
    Timezone = 8,
    #[error("longitude out of range")]
    Longitude = 9,
    #[error("latitude out of range")]
    Latitude = 10,
    /// Elevation below -6,500,000 meters
    #[error("elevation out of range")]
    Elevation = 11,
    #[error("pressure out of range")]
    Pressure = 12,
    #[error("temperature out of range")]
    Temperature = 13,
    #[error("surface slope out of range")]
    Slope = 14,
    #[error("surface azimuth rotation out of range")]
    AzimuthRotation = 15,
    #[error("atmospheric refraction out of range")]
    AtmosphericRefraction = 16,
    #[error("ΔUT1 out of range")]
    DeltaUt1 = 17,
}

impl SpaError {
    /// Numeric code of the rejected field, 1 to 17. Zero is never returned;
    /// it is reserved for valid input by [`crate::validation_code`].
    pub fn code(self) -> u8 {
        self as u8
    }
}
