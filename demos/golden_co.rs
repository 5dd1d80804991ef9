#![allow(missing_docs)]
use solar_position::{
    compute, Atmosphere, CalendarInstant, Observer, OutputMode, RefractionModel, SpaInput, SunEvent, Surface,
};

fn print_event(name: &str, event: SunEvent) {
    match event.to_naive_time() {
        Some(time) => println!("  {name}: {}", time.format("%H:%M:%S")),
        None => println!("  {name}: none ({event:?})"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Golden, Colorado
    let latitude = 39.742476;
    let longitude = -105.1786;
    let elevation = 1830.14; // meters above sea level

    let input = SpaInput::new(
        CalendarInstant::new(2003, 10, 17, 12, 30, 30.0)
            .with_delta_ut1(0.0)
            .with_delta_t(67.0),
        Observer::new(latitude, longitude, elevation, -7.0),
    )
    .with_atmosphere(Atmosphere {
        pressure: 820.0,
        temperature: 11.0,
        atmos_refract: 0.5667,
    })
    .with_surface(Surface::new(30.0, -10.0))
    .with_mode(OutputMode::All);

    println!("Solar Position Example - Golden, CO");
    println!("Location: {:.5}°N, {:.5}°W", latitude, longitude.abs());
    println!("Date: 2003-10-17 12:30:30 (UTC-7)");
    println!("{:=<60}", "");

    for refraction in [RefractionModel::Piecewise, RefractionModel::Bennett] {
        let output = compute(&input.with_refraction(refraction))?;
        println!("{refraction:?} refraction:");
        println!("  Julian Day: {:.6}", output.julian_day);
        println!("  Zenith angle: {:.6}°", output.zenith);
        println!("  Azimuth angle: {:.6}°", output.azimuth);
        if let Some(incidence) = output.incidence {
            println!("  Incidence angle: {incidence:.6}°");
        }
        println!();
    }

    let output = compute(&input)?;
    let rts = output.rise_transit_set.ok_or("mode All computes sun events")?;
    println!("Equation of time: {:.6} minutes", rts.equation_of_time);
    print_event("Sunrise", rts.sunrise);
    print_event("Solar noon", rts.transit);
    print_event("Sunset", rts.sunset);
    Ok(())
}
