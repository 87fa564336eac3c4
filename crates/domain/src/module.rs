use std::fmt::{Display, Formatter};
use std::str::FromStr;

use peopledesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Navigable application modules known to the shell, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Landing dashboard.
    Dashboard,
    /// Employee directory.
    Employees,
    /// Attendance tracking.
    Attendance,
    /// Leave requests and balances.
    Leave,
    /// Payroll runs and payslips.
    Payroll,
    /// Performance reviews and goals.
    Performance,
    /// Training programs and enrollment.
    Training,
    /// Expense claims.
    Expenses,
    /// Generated HR letters.
    Letters,
    /// Cross-module reporting.
    Reports,
    /// Company and profile settings.
    Settings,
}

impl Module {
    /// Returns the feature-matrix key for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Employees => "employees",
            Self::Attendance => "attendance",
            Self::Leave => "leave",
            Self::Payroll => "payroll",
            Self::Performance => "performance",
            Self::Training => "training",
            Self::Expenses => "expenses",
            Self::Letters => "letters",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }

    /// Returns the navigation label shown for this module.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Employees => "Employees",
            Self::Attendance => "Attendance",
            Self::Leave => "Leave Management",
            Self::Payroll => "Payroll",
            Self::Performance => "Performance",
            Self::Training => "Training",
            Self::Expenses => "Expenses",
            Self::Letters => "Letters",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        }
    }

    /// Returns the module registry in navigation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Module] = &[
            Module::Dashboard,
            Module::Employees,
            Module::Attendance,
            Module::Leave,
            Module::Payroll,
            Module::Performance,
            Module::Training,
            Module::Expenses,
            Module::Letters,
            Module::Reports,
            Module::Settings,
        ];

        ALL
    }
}

impl FromStr for Module {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|module| module.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown module '{value}'")))
    }
}

impl Display for Module {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Module;

    #[test]
    fn module_roundtrip_storage_value() {
        for module in Module::all() {
            let parsed = Module::from_str(module.as_str());
            assert!(matches!(parsed, Ok(value) if value == *module));
        }
    }

    #[test]
    fn unknown_module_is_rejected() {
        assert!(Module::from_str("timesheets").is_err());
    }
}
