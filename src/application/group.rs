use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// a customer that can borrow or join a group loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }
}

/// member of a group loan and their share of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub loan_share: Money,
}

impl GroupMember {
    pub fn from_customer(customer: &Customer, loan_share: Money) -> Self {
        Self {
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            loan_share,
        }
    }
}

/// sum of all member shares
pub fn total_share(members: &[GroupMember]) -> Money {
    members.iter().map(|m| m.loan_share).sum()
}
