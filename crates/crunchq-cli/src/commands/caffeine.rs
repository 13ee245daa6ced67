use clap::Subcommand;
use crunchq_core::{AgingMode, CaffeineConfig, CaffeineQueue};

#[derive(Subcommand)]
pub enum CaffeineAction {
    /// Submit tasks, run aging ticks, then drain the rest
    Run {
        /// Number of tasks to submit
        #[arg(long, default_value = "6")]
        tasks: usize,
        /// Cups of coffee to down before the ticks start
        #[arg(long, default_value = "4")]
        coffees: u32,
        /// Caffeine threshold for the bounce-or-escalate trial
        #[arg(long, default_value = "12")]
        threshold: u32,
        /// Bounce probability for threshold-crossers
        #[arg(long, default_value = "0.3")]
        prob: f64,
        /// Random seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Aging ticks to run before draining
        #[arg(long, default_value = "3")]
        ticks: usize,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CaffeineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CaffeineAction::Run {
            tasks,
            coffees,
            threshold,
            prob,
            seed,
            ticks,
            json,
        } => {
            let mut queue = CaffeineQueue::with_config(CaffeineConfig {
                capacity: tasks + 2,
                threshold,
                eviction_probability: prob,
                seed,
                aging: AgingMode::Ambient,
            })?;

            for i in 1..=tasks {
                queue.submit(format!("task-{i}"))?;
                println!("submitted task-{i}");
            }
            queue.add_caffeine(coffees);
            println!("ambient caffeine level: {}", queue.ambient_level());

            for tick in 1..=ticks {
                let summary = queue.age_tick()?;
                println!(
                    "tick {tick}: aged {} / escalated {} / bounced {}",
                    summary.aged, summary.escalated, summary.bounced
                );
            }

            let outcome = queue.drain_all();
            println!("completed: {:?}", outcome.completed);
            println!("bounced:   {:?}", outcome.bounced);

            if json {
                println!("{}", serde_json::to_string_pretty(&queue.snapshot())?);
            }
            Ok(())
        }
    }
}
