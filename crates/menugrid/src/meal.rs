use std::fmt;
use std::str::FromStr;

use crate::error::MenuError;

/// The two meal periods of a day; each selects one grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealPeriod {
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub const ALL: [MealPeriod; 2] = [MealPeriod::Lunch, MealPeriod::Dinner];

    /// Grid row holding this meal.
    pub fn row(self) -> usize {
        match self {
            MealPeriod::Lunch => 0,
            MealPeriod::Dinner => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealPeriod::Lunch => "lunch",
            MealPeriod::Dinner => "dinner",
        }
    }
}

impl FromStr for MealPeriod {
    type Err = MenuError;

    /// Accepts exactly `lunch` or `dinner`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lunch" => Ok(MealPeriod::Lunch),
            "dinner" => Ok(MealPeriod::Dinner),
            other => Err(MenuError::InvalidMealPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepted_tokens() {
        assert_eq!("lunch".parse::<MealPeriod>().unwrap(), MealPeriod::Lunch);
        assert_eq!("dinner".parse::<MealPeriod>().unwrap(), MealPeriod::Dinner);
    }

    #[test]
    fn parse_rejects_other_tokens() {
        for token in ["launch", "Lunch", "DINNER", "", " lunch", "breakfast"] {
            let err = token.parse::<MealPeriod>().unwrap_err();
            assert!(
                matches!(err, MenuError::InvalidMealPeriod(ref t) if t == token),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rows_and_display() {
        assert_eq!(MealPeriod::Lunch.row(), 0);
        assert_eq!(MealPeriod::Dinner.row(), 1);
        assert_eq!(MealPeriod::Dinner.to_string(), "dinner");
        for meal in MealPeriod::ALL {
            assert_eq!(meal.as_str().parse::<MealPeriod>().unwrap(), meal);
        }
    }
}
