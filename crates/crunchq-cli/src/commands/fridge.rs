use clap::Subcommand;
use crunchq_core::{PantryConfig, PantryError, RefrigeratorStack};

#[derive(Subcommand)]
pub enum FridgeAction {
    /// Push a few items, look one up (retrying the eaten fault), then expire
    Demo {
        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(action: FridgeAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FridgeAction::Demo { seed } => {
            let mut fridge = RefrigeratorStack::with_config(PantryConfig {
                capacity: 4,
                shelf_life_ticks: 10,
                seed,
                ..PantryConfig::default()
            });

            for item in ["milk", "kimchi", "leftover pizza", "cold brew", "eggs"] {
                if let Some(evicted) = fridge.push(item) {
                    println!("pushed {item}, {evicted} fell out the back");
                } else {
                    println!("pushed {item}");
                }
            }

            // The lookup fault is retryable by contract.
            for attempt in 1..=10 {
                match fridge.find(|i| *i == "kimchi") {
                    Ok(Some(found)) => {
                        println!("found {found} on attempt {attempt}");
                        break;
                    }
                    Ok(None) => {
                        println!("no kimchi in here");
                        break;
                    }
                    Err(PantryError::Eaten) => println!("attempt {attempt}: someone ate it?!"),
                    Err(e) => return Err(e.into()),
                }
            }
            if let Some(freshness) = fridge.freshness_of(|i| *i == "kimchi") {
                println!("kimchi freshness now {freshness}/10");
            }

            fridge.advance(11);
            let expired = fridge.sweep_expired();
            println!("expired after 11 ticks: {expired:?}");
            println!("{} items still cold", fridge.len());
            Ok(())
        }
    }
}
