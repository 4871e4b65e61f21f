use uuid::Uuid;

/// Bank credit reported by SMS or entered by an admin. `is_used` flips once,
/// when the transaction settles an order.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub utr: String,
    pub amount: i64,
    pub is_used: bool,
    pub order_id: Option<Uuid>,
    pub sender: Option<String>,
    pub raw_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub utr: String,
    pub amount: i64,
    pub sender: Option<String>,
    pub raw_message: Option<String>,
}
