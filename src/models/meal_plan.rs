use serde::{Deserialize, Serialize};
use std::fmt;

/// Days seeded into a fresh meal plan, in display order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A single day's entry in the weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub day: String,
    pub meal: String,
}

impl Meal {
    pub fn new(day: impl Into<String>, meal: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            meal: meal.into(),
        }
    }

    pub fn is_planned(&self) -> bool {
        !self.meal.trim().is_empty()
    }
}

/// The household's weekly plan: ordered `(day, meal)` pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlan {
    pub meals: Vec<Meal>,
}

impl MealPlan {
    pub fn new(meals: Vec<Meal>) -> Self {
        Self { meals }
    }

    /// Find the entry for a day (exact match, the way days are keyed).
    pub fn find(&self, day: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.day == day)
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meal Plan")?;
        writeln!(f, "=========")?;
        for meal in &self.meals {
            if meal.is_planned() {
                writeln!(f, "{:<10} {}", meal.day, meal.meal)?;
            } else {
                writeln!(f, "{:<10} -", meal.day)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> MealPlan {
        MealPlan::new(vec![
            Meal::new("Monday", "Lasagne"),
            Meal::new("Tuesday", ""),
            Meal::new("Wednesday", "Fish pie"),
        ])
    }

    #[test]
    fn test_find_by_day() {
        let plan = week();
        assert_eq!(plan.find("Wednesday").unwrap().meal, "Fish pie");
        assert!(plan.find("wednesday").is_none());
        assert!(plan.find("Funday").is_none());
    }

    #[test]
    fn test_is_planned() {
        assert!(Meal::new("Monday", "Soup").is_planned());
        assert!(!Meal::new("Monday", "   ").is_planned());
    }

    #[test]
    fn test_display_marks_unplanned_days() {
        let output = format!("{}", week());
        assert!(output.contains("Monday     Lasagne"));
        assert!(output.contains("Tuesday    -"));
    }

    #[test]
    fn test_weekdays_start_on_monday() {
        assert_eq!(WEEKDAYS.len(), 7);
        assert_eq!(WEEKDAYS[0], "Monday");
        assert_eq!(WEEKDAYS[6], "Sunday");
    }
}
