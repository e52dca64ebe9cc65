//! Offline suggestion demo for skycast-rs
//!
//! Replays a burst of keystrokes against the embedded city index and shows
//! which of them actually reach the matcher.
//!
//! Run with `RUST_LOG=debug` to watch the debounce commits.

use skycast_rs::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== skycast suggestion demo ===\n");

    let index = CityIndex::embedded()?;
    println!("Loaded {} cities\n", index.len());

    let mut session = SuggestionSession::new(index, SuggestSettings::default());
    session.focus();

    // (keystroke value, milliseconds since the previous keystroke)
    let typing = [("s", 0), ("sa", 120), ("san", 90), ("sa", 800), ("sao", 150)];

    let mut now = Duration::ZERO;
    for (value, gap) in typing {
        let next = now + Duration::from_millis(gap);

        // the host timer would fire anything due before the next keystroke
        while let Some(deadline) = session.next_deadline() {
            if deadline.at > next {
                break;
            }
            if session.fire(deadline.token, deadline.at) {
                print_suggestions(&session);
            }
        }

        now = next;
        println!("[{:>5} ms] typed {value:?}", now.as_millis());
        session.input(value, now);
    }

    if let Some(deadline) = session.next_deadline() {
        session.fire(deadline.token, deadline.at);
        print_suggestions(&session);
    }

    println!("\n--- Typo tolerance ---");
    for query in ["lodnon", "barcleona", "zurich", "lodz"] {
        let names: Vec<_> = index
            .search(query)
            .into_iter()
            .take(3)
            .map(|m| m.city.name().to_owned())
            .collect();
        println!("  {query:<10} → {}", names.join(", "));
    }

    Ok(())
}

fn print_suggestions(session: &SuggestionSession<'_>) {
    let names: Vec<_> = session.suggestions().iter().map(|c| c.name()).collect();
    println!(
        "    committed {:?} → {:?} ({} total matches)",
        session.debounced(),
        names,
        session.ranked().len()
    );
}
