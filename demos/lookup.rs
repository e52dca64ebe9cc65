//! Live weather lookup for skycast-rs
//!
//! ```text
//! WEATHER_API_KEY=... cargo run --example lookup -- "São Paulo"
//! ```

use skycast_rs::prelude::*;
use skycast_rs::WeatherCard;
use std::error::Error;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let city = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let city = if city.trim().is_empty() { "London".to_owned() } else { city };

    let config = WeatherConfig::from_env()?;
    let provider = HttpProvider::new(&config)?;
    let mut controller = WeatherFetchController::new(config);

    println!("Looking up weather for {city}...");
    match controller.run(&provider, &city)? {
        Resolution::Succeeded => {
            if let Some(snapshot) = controller.snapshot() {
                print_card(&WeatherCard::from_snapshot(snapshot));
            }
        }
        Resolution::Failed => {
            if let Some(err) = controller.error() {
                eprintln!("✗ {err} ({:?})", err.kind());
            }
        }
        Resolution::Stale => eprintln!("response superseded"),
    }

    Ok(())
}

fn print_card(card: &WeatherCard) {
    println!("\n{} ({})", card.location, card.region);
    println!("  {} (feels like {})", card.temperature, card.feels_like);
    println!("  {}", card.condition);
    println!("  Humidity {}", card.humidity);
    println!("  Wind {} from {}", card.wind_speed, card.wind_direction);
    println!("  Updated {}", card.last_updated);

    if let Some(day) = &card.forecast {
        println!("\nToday ({})", day.date);
        println!("  Sunrise {}  Sunset {}", day.sunrise, day.sunset);
        println!(
            "  Min {}  Max {}  Avg {}",
            day.min_temperature, day.max_temperature, day.avg_temperature
        );
        println!("  Max wind {}", day.max_wind);
    }
}
