use crate::error::AdvisorError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

impl RiskProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Low => "Low",
            RiskProfile::Medium => "Medium",
            RiskProfile::High => "High",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "medium" => Ok(RiskProfile::Medium),
            "high" => Ok(RiskProfile::High),
            _ => Err(AdvisorError::InvalidProfile(format!(
                "Invalid risk profile '{}'. Use 'low', 'medium' or 'high'.",
                s
            ))),
        }
    }
}

/// Monthly cash flow for the single user of a database. The risk profile is
/// recorded but does not influence allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub income: Decimal,
    pub expenses: Decimal,
    pub risk_profile: RiskProfile,
    pub email: Option<String>,
}

impl Profile {
    /// May be negative when expenses exceed income.
    pub fn monthly_savings(&self) -> Decimal {
        self.income - self.expenses
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            risk_profile: RiskProfile::Medium,
            email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_savings() {
        let profile = Profile {
            income: Decimal::from(5000),
            expenses: Decimal::from(3000),
            ..Profile::default()
        };
        assert_eq!(profile.monthly_savings(), Decimal::from(2000));
    }

    #[test]
    fn test_monthly_savings_negative() {
        let profile = Profile {
            income: Decimal::from(1000),
            expenses: Decimal::from(1500),
            ..Profile::default()
        };
        assert_eq!(profile.monthly_savings(), Decimal::from(-500));
    }

    #[test]
    fn test_risk_profile_parse() {
        assert_eq!("HIGH".parse::<RiskProfile>().unwrap(), RiskProfile::High);
        assert_eq!(" low ".parse::<RiskProfile>().unwrap(), RiskProfile::Low);
        assert!("reckless".parse::<RiskProfile>().is_err());
    }
}
