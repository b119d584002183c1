//! Chowplan Status Tool
//!
//! Provides runtime status information about the chowplan service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::feeding::FeedingTables;

/// Feeding plan instructions for AI assistants
pub const FEEDING_INSTRUCTIONS: &str = r#"
# Chowplan Feeding Instructions

This guide explains how to build a dog-food purchase plan with the chowplan tools.

## Overview

A plan is computed in four steps, each tool building on the previous one:
1. **Daily calories** - from weight (lbs) and activity level
2. **Daily portions** - wet, dry and treat ounces, adjusted for life stage
3. **45-day supply** - total pounds of each food type
4. **Packages** - how many bags/cans of each product to buy, and the cost

Nothing is stored. Every call is recomputed from the parameters you pass.

---

## Describing the Dog

| Field | Values | Notes |
|-------|--------|-------|
| `weight_lbs` | positive number | Required. Zero or negative is rejected |
| `activity_level` | `low`, `moderate`, `high` | Unknown values fall back to `moderate` |
| `life_stage` | `puppy`, `adult`, `senior` | Unknown values fall back to `adult` |

If you only know the dog's age, call `classify_dog` with `age_months`:
- under 12 months -> puppy
- under 96 months -> adult
- otherwise -> senior

Size categories (used to match curated bundles):
- up to 25 lbs -> small
- up to 60 lbs -> medium
- over 60 lbs -> large

---

## How Calories Are Estimated

The calorie chart has calibration points at 5, 10, 15, 20, 25, 30, 40, 50, 60,
70, 80, 90 and 100 lbs. A weight uses the **next point up** (a 26 lb dog uses
the 30 lb row). Dogs over 100 lbs gain 40-50 calories per full 10 lbs.

Activity multipliers: low 0.85, moderate 1.00, high 1.15.
Life stage: puppy x1.10, senior x0.90.

---

## Portions

- Wet food: 25% of calories at 25 cal/oz
- Dry food: 75% of calories at 95 cal/oz (4 oz per cup)
- Treats: an extra 10% of calories at 87.5 cal/oz

The treat allowance is on top of the wet/dry split. This is intentional.

---

## Products and Bundles

A bundle is one dry product, one wet product and one treat product:

```json
{
  "id": 1, "name": "Hearty Chicken", "brand": "Acme",
  "dry_food": {"id": 10, "brand": "Acme", "name": "Kibble", "role": "dry",
               "package_size": 30, "package_unit": "lb", "price": 54.99},
  "wet_food": {"id": 11, "brand": "Acme", "name": "Stew", "role": "wet",
               "package_size": 13.2, "package_unit": "oz", "price": 2.49},
  "treats":   {"id": 12, "brand": "Acme", "name": "Biscuits", "role": "treat",
               "package_size": 2, "package_unit": "lb", "price": 8.99},
  "size_category": "medium", "life_stage": "adult",
  "preference_tags": ["grain_free"]
}
```

- `package_unit` is one of `oz`, `lb`, `g`, `kg` (default `lb`)
- Package quantity = whole packages covering the need, **plus one spare**
- A bundle with a zero or negative package size is reported under `skipped`
  and the other bundles are still ranked

---

## Tools

- `estimate_daily_calories` - calories only
- `calculate_portions` - daily portions
- `calculate_45_day_supply` - daily portions + 45-day totals
- `recommend_packages` - shopping list for a single bundle
- `plan_meals` - filter bundles for the dog, price each, cheapest first
- `classify_dog` - size category and life stage from weight/age
"#;

/// Runtime status of the chowplan service
#[derive(Debug, Clone, Serialize)]
pub struct ChowplanStatus {
    /// Build information
    pub build: String,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Feeding tables information
    pub tables_source: &'static str,
    pub calibration_points: usize,
    pub supply_days: u32,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ChowplanStatus {
        let build_info = BuildInfo::current();
        let tables = FeedingTables::global();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ChowplanStatus {
            build: build_info.summary(),
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            tables_source: FeedingTables::global_source(),
            calibration_points: tables.calorie_chart.len(),
            supply_days: tables.supply_days,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_process_and_tables() {
        let status = StatusTracker::new().get_status();
        assert_eq!(status.process_id, std::process::id());
        assert!(status.calibration_points > 0);
        assert!(status.supply_days > 0);
        assert!(!status.version.is_empty());
        assert!(status.build.starts_with("chowplan "));
    }
}
