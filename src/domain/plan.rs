//! Subscription plans granting a store its lifetime and ad slots.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::PlanId;

/// Longest store lifetime a single plan may grant.
pub const MAX_DURATION_DAYS: u32 = 3650;

/// A paid store plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    /// Store lifetime granted per purchase, in days.
    pub duration_days: u32,
    /// Number of listing slots.
    pub max_ads: u32,
    pub price: Decimal,
}

impl Plan {
    /// Create a validated plan.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidPlan`] for a duration outside
    /// `1..=MAX_DURATION_DAYS`, zero slots or a negative price.
    pub fn try_new(
        id: impl Into<PlanId>,
        duration_days: u32,
        max_ads: u32,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        let plan = Self {
            id: id.into(),
            duration_days,
            max_ads,
            price,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Check the plan parameters.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidPlan`] describing the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.duration_days == 0 {
            return Err(DomainError::InvalidPlan {
                reason: "duration must be at least one day".into(),
            });
        }
        if self.duration_days > MAX_DURATION_DAYS {
            return Err(DomainError::InvalidPlan {
                reason: format!(
                    "duration of {} days exceeds the {MAX_DURATION_DAYS} day limit",
                    self.duration_days
                ),
            });
        }
        if self.max_ads == 0 {
            return Err(DomainError::InvalidPlan {
                reason: "plan must grant at least one ad slot".into(),
            });
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::InvalidPlan {
                reason: format!("price cannot be negative ({})", self.price),
            });
        }
        Ok(())
    }

    /// Store lifetime as a duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.duration_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn valid_plan_is_accepted() {
        let plan = Plan::try_new("monthly", 30, 20, dec!(15)).unwrap();
        assert_eq!(plan.duration(), Duration::days(30));
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(matches!(
            Plan::try_new("broken", 0, 20, dec!(15)),
            Err(DomainError::InvalidPlan { .. })
        ));
    }

    #[test]
    fn duration_is_capped() {
        assert!(Plan::try_new("decade", MAX_DURATION_DAYS, 5, dec!(1)).is_ok());
        for days in [MAX_DURATION_DAYS + 1, u32::MAX] {
            assert!(matches!(
                Plan::try_new("huge", days, 5, dec!(1)),
                Err(DomainError::InvalidPlan { .. })
            ));
        }
    }

    #[test]
    fn zero_slots_are_rejected() {
        assert!(Plan::try_new("broken", 30, 0, dec!(15)).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(Plan::try_new("broken", 30, 5, dec!(-1)).is_err());
    }
}
