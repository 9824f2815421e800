use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub name: String,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prize {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tournament {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub subscription_fee: f64,
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
}

impl Tournament {
    pub fn paid_participants(&self) -> usize {
        self.participants.iter().filter(|p| p.paid).count()
    }

    /// Fees actually collected.
    pub fn revenue(&self) -> f64 {
        self.paid_participants() as f64 * self.subscription_fee
    }

    pub fn prize_total(&self) -> f64 {
        self.prizes.iter().map(|p| p.amount).sum()
    }

    pub fn profit(&self) -> f64 {
        self.revenue() - self.prize_total()
    }
}
