use chrono::NaiveDate;
use clap::Subcommand;
use crunchq_core::{DailyScheduler, DayOutcome, DayReport};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Fast-forward the assignment scheduler day by day
    Run {
        /// Days to simulate
        #[arg(long, default_value = "14")]
        days: usize,
        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Print the day reports as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Run { days, start, json } => {
            let start = start.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut scheduler = DailyScheduler::new(start)?;
            let reports = scheduler.fast_forward(days)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    print_report(report);
                }
                println!();
                println!("final date: {}", scheduler.current_date());
                for entry in scheduler.status() {
                    println!(
                        "  {} -- {} days until {}",
                        entry.name, entry.days_left, entry.deadline
                    );
                }
            }
            Ok(())
        }
    }
}

fn print_report(report: &DayReport) {
    print!("===== {} ===== ", report.date);
    if let Some(added) = &report.auto_added {
        print!("[new: {}] ", added.name);
    }
    match report.outcome {
        DayOutcome::Idle => println!("nothing due, moving on"),
        DayOutcome::Coasted => println!("plenty of slack, coasting three days"),
        DayOutcome::TookLeave => println!(
            "{} assignments pending -- taking leave",
            report.requeued.len()
        ),
        DayOutcome::Processed => {
            let names: Vec<&str> = report.completed.iter().map(|a| a.name.as_str()).collect();
            println!("completed {:?}, {} left", names, report.requeued.len())
        }
    }
}
