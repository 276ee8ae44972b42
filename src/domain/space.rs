//! Space domain entity.
//! A rentable venue belonging to a branch; reservations price against its
//! daily rate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub daily_price: Money,
    pub active: bool,
}

impl Space {
    pub fn new(branch_id: Uuid, name: String, daily_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            branch_id,
            name,
            daily_price,
            active: true,
        }
    }
}
