//! Print daily calories and portions for a range of weights
//!
//! Usage: calorie_chart [max_weight_lbs] [step_lbs]

use chowplan::feeding::FeedingTables;
use chowplan::models::{ActivityLevel, LifeStage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let max_weight: u32 = args.next().map(|s| s.parse::<u32>()).transpose()?.unwrap_or(150);
    let step: u32 = args.next().map(|s| s.parse::<u32>()).transpose()?.unwrap_or(5).max(1);

    let tables = match FeedingTables::load_from_env()? {
        Some((tables, path)) => {
            println!("Feeding tables: {}", path);
            tables
        }
        None => FeedingTables::default(),
    };

    println!(
        "{:>6} {:>6} {:>6} {:>6} {:>7} {:>7} {:>7} {:>7}",
        "lbs", "low", "mod", "high", "puppy", "adult", "senior", "cups"
    );

    let mut weight = step;
    while weight <= max_weight {
        let w = weight as f64;
        let low = tables.estimate_daily_calories(w, ActivityLevel::Low)?;
        let moderate = tables.estimate_daily_calories(w, ActivityLevel::Moderate)?;
        let high = tables.estimate_daily_calories(w, ActivityLevel::High)?;
        let adult = tables.calculate_portions(w, ActivityLevel::Moderate, LifeStage::Adult)?;

        println!(
            "{:>6} {:>6} {:>6} {:>6} {:>7} {:>7} {:>7} {:>7.2}",
            weight,
            low,
            moderate,
            high,
            tables.adjust_for_life_stage(moderate, LifeStage::Puppy),
            adult.daily_calories,
            tables.adjust_for_life_stage(moderate, LifeStage::Senior),
            adult.dry_food_cups,
        );
        weight += step;
    }

    Ok(())
}
