use uuid::Uuid;

pub const PAYMENT_METHOD_UPI_MANUAL: &str = "UPI_MANUAL";
pub const PAYMENT_ID_MANUAL: &str = "MANUAL";

/// Snapshot of a book at checkout time.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub book_id: Uuid,
    pub title: String,
    pub price: i64,
    pub cover_image: Option<String>,
    pub access_granted: bool,
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    pub payment_proof: String,
    pub payment_id: Option<String>,
    pub payment_method: Option<String>,
    pub is_paid: bool,
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Order {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn pending_grants(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|i| !i.access_granted)
    }
}

/// Order joined with the buyer, for admin listings.
#[derive(Debug, Clone)]
pub struct OrderWithBuyer {
    pub order: Order,
    pub buyer_name: String,
    pub buyer_email: String,
}
