use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::billing::schedule::add_months;
use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A recurring bill (rent, utilities, subscriptions) with a fixed due day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedBill {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub due_day: u32,
    pub frequency: BillFrequency,
    pub next_due_date: NaiveDate,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
}

impl FixedBill {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        due_day: u32,
        frequency: BillFrequency,
        next_due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            due_day,
            frequency,
            next_due_date,
            is_paid: false,
            account_id: None,
            category_id: None,
            importance: None,
        }
    }

    /// The due date following the current one, per the bill's frequency.
    pub fn next_occurrence(&self) -> NaiveDate {
        match self.frequency {
            BillFrequency::Weekly => self.next_due_date + Duration::weeks(1),
            BillFrequency::Monthly => add_months(self.next_due_date, 1),
            BillFrequency::Yearly => add_months(self.next_due_date, 12),
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid && self.next_due_date < today
    }
}

impl Identifiable for FixedBill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FixedBill {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for FixedBill {
    fn display_label(&self) -> String {
        format!("{} (due {})", self.name, self.next_due_date)
    }
}

/// How often a fixed bill repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Yearly,
}
