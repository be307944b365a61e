use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{ApplicationId, InterestMethod, LoanType};

/// all events that can be emitted while an application is being captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // calculation events
    ScheduleCalculated {
        application_id: ApplicationId,
        method: InterestMethod,
        monthly_payment: Money,
        total_interest: Money,
        maturity_date: NaiveDate,
    },
    CalculationSkipped {
        application_id: ApplicationId,
        reason: String,
    },

    // group events
    GroupMemberAdded {
        application_id: ApplicationId,
        customer_id: String,
        loan_share: Money,
    },
    GroupMemberRemoved {
        application_id: ApplicationId,
        customer_id: String,
    },

    // lifecycle events
    ValidationFailed {
        application_id: ApplicationId,
        fields: Vec<String>,
        timestamp: DateTime<Utc>,
    },
    ApplicationSubmitted {
        application_id: ApplicationId,
        loan_type: LoanType,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    FormReset {
        application_id: ApplicationId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
