//! Employee role model and the fixed role rate table.
//!
//! This module defines the [`Role`] enum and the [`RoleRate`] each role maps
//! to. The table is static: roles and their hourly rates do not change at
//! runtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly ordinary hours used to compute base pay.
pub const MONTHLY_BASE_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// The job roles known to the payroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Factory floor worker ("Operário"). Paid overtime.
    Worker,
    /// Shift supervisor. Paid overtime.
    Supervisor,
    /// Manager ("Gerente"), a position of trust without overtime.
    Manager,
    /// Director ("Diretor"), a position of trust without overtime.
    Director,
}

/// The hourly rate and overtime eligibility of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRate {
    /// The hourly rate paid for ordinary hours.
    pub hourly_rate: Decimal,
    /// Whether overtime hours are paid for this role.
    pub overtime_eligible: bool,
}

impl Role {
    /// Every role, in menu order.
    pub const ALL: [Role; 4] = [Role::Worker, Role::Supervisor, Role::Manager, Role::Director];

    /// Returns the rate table entry for this role.
    ///
    /// # Examples
    ///
    /// ```
    /// use quatro_cantos::models::Role;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Role::Supervisor.rate();
    /// assert_eq!(rate.hourly_rate, Decimal::new(4000, 2));
    /// assert!(rate.overtime_eligible);
    /// ```
    pub fn rate(self) -> RoleRate {
        match self {
            Role::Worker => RoleRate {
                hourly_rate: Decimal::new(1500, 2),
                overtime_eligible: true,
            },
            Role::Supervisor => RoleRate {
                hourly_rate: Decimal::new(4000, 2),
                overtime_eligible: true,
            },
            Role::Manager => RoleRate {
                hourly_rate: Decimal::new(6000, 2),
                overtime_eligible: false,
            },
            Role::Director => RoleRate {
                hourly_rate: Decimal::new(8000, 2),
                overtime_eligible: false,
            },
        }
    }

    /// Returns the Portuguese label printed on payroll reports.
    pub fn label(self) -> &'static str {
        match self {
            Role::Worker => "Operário",
            Role::Supervisor => "Supervisor",
            Role::Manager => "Gerente",
            Role::Director => "Diretor",
        }
    }

    /// Parses a role from its Portuguese label, English name or menu number.
    ///
    /// Matching ignores case and surrounding whitespace. Returns `None` for
    /// anything unrecognized.
    pub fn parse(input: &str) -> Option<Role> {
        match input.trim().to_lowercase().as_str() {
            "1" | "worker" | "operário" | "operario" => Some(Role::Worker),
            "2" | "supervisor" => Some(Role::Supervisor),
            "3" | "manager" | "gerente" => Some(Role::Manager),
            "4" | "director" | "diretor" => Some(Role::Director),
            _ => None,
        }
    }

    /// Parses a role, falling back to [`Role::Worker`] when unrecognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use quatro_cantos::models::Role;
    ///
    /// assert_eq!(Role::from_label("Gerente"), Role::Manager);
    /// assert_eq!(Role::from_label("Astronaut"), Role::Worker);
    /// ```
    pub fn from_label(input: &str) -> Role {
        match Role::parse(input) {
            Some(role) => role,
            None => {
                tracing::warn!(role = %input, "Unknown role, using Worker");
                Role::Worker
            }
        }
    }
}
