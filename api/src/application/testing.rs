//! In-memory port implementations for use case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::{OrderRepository, SettleOutcome};
use crate::application::ports::sample_download_repository::SampleDownloadRepository;
use crate::application::ports::settings_repository::SettingsRepository;
use crate::application::ports::stats_repository::{
    BookSales, DashboardStats, MonthlySales, StatsRepository, latest_months,
};
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::{Config, StorageBackend};
use crate::domain::books::book::{Book, BookDraft, BookFilter};
use crate::domain::downloads::sample_download::SampleDownload;
use crate::domain::orders::order::{Order, OrderItem, OrderWithBuyer};
use crate::domain::payments::transaction::{NewTransaction, Transaction};
use crate::domain::settings::system_settings::SystemSettings;
use crate::domain::users::user::{CartLine, Role, User};
use crate::infrastructure::storage::filesystem::FsStoragePort;

#[derive(Default)]
struct State {
    ticks: i64,
    users: Vec<(User, String)>,
    books: Vec<Book>,
    cart: Vec<(Uuid, Uuid, i32)>,
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
    settings: Option<SystemSettings>,
    downloads: Vec<SampleDownload>,
    fail_grant_marks: bool,
}

impl State {
    /// Strictly increasing timestamps so "oldest first" is deterministic.
    fn tick(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(self.ticks)
    }

    fn cart_lines(&self, user_id: Uuid) -> Vec<CartLine> {
        self.cart
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .filter_map(|(_, b, qty)| {
                self.books.iter().find(|bk| bk.id == *b).map(|book| CartLine {
                    book: book.clone(),
                    qty: *qty,
                })
            })
            .collect()
    }
}

#[derive(Default)]
pub struct MemStore {
    state: Mutex<State>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, email: &str, role: Role) -> User {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let user = User {
            id: Uuid::new_v4(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            mobile: "9876543210".into(),
            role,
            created_at: now,
            updated_at: now,
        };
        st.users.push((user.clone(), String::new()));
        user
    }

    pub fn set_role(&self, user_id: Uuid, role: Role) {
        let mut st = self.state.lock().unwrap();
        if let Some((u, _)) = st.users.iter_mut().find(|(u, _)| u.id == user_id) {
            u.role = role;
        }
    }

    pub fn seed_book(&self, title: &str, selling_price: i64, drive_file: &str) -> Book {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: "Author".into(),
            description: "Description".into(),
            detailed_description: None,
            category: "Fiction".into(),
            cover_image: format!("/uploads/{}.png", title.to_lowercase().replace(' ', "-")),
            book_images: vec![],
            original_price: selling_price,
            discount_percent: 0,
            selling_price,
            offer_expires_at: None,
            future_price: None,
            google_drive_file_id: drive_file.to_string(),
            sample_pdf_url: None,
            sales_count: 0,
            created_at: now,
            updated_at: now,
        };
        st.books.push(book.clone());
        book
    }

    pub fn seed_transaction(&self, utr: &str, amount: i64) -> Transaction {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let txn = Transaction {
            id: Uuid::new_v4(),
            utr: utr.to_string(),
            amount,
            is_used: false,
            order_id: None,
            sender: None,
            raw_message: None,
            created_at: now,
        };
        st.transactions.push(txn.clone());
        txn
    }

    pub fn seed_order(&self, user_id: Uuid, items: &[OrderItem], total_price: i64) -> Order {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let order = Order {
            id: Uuid::new_v4(),
            user_id,
            items: items.to_vec(),
            total_price,
            payment_proof: String::new(),
            payment_id: None,
            payment_method: None,
            is_paid: false,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        st.orders.push(order.clone());
        order
    }

    pub fn edit_book(&self, id: Uuid, edit: impl FnOnce(&mut Book)) {
        let mut st = self.state.lock().unwrap();
        if let Some(book) = st.books.iter_mut().find(|b| b.id == id) {
            edit(book);
        }
    }

    /// Makes `mark_item_granted` fail from now on.
    pub fn fail_grant_marks(&self) {
        self.state.lock().unwrap().fail_grant_marks = true;
    }

    /// A paid order stamped with an explicit creation time.
    pub fn seed_paid_order_at(
        &self,
        user_id: Uuid,
        items: &[OrderItem],
        total_price: i64,
        created_at: DateTime<Utc>,
    ) -> Order {
        let mut st = self.state.lock().unwrap();
        let order = Order {
            id: Uuid::new_v4(),
            user_id,
            items: items.to_vec(),
            total_price,
            payment_proof: String::new(),
            payment_id: Some("MANUAL".into()),
            payment_method: None,
            is_paid: true,
            paid_at: Some(created_at),
            created_at,
            updated_at: created_at,
        };
        st.orders.push(order.clone());
        order
    }

    pub fn transaction(&self, utr: &str) -> Option<Transaction> {
        let st = self.state.lock().unwrap();
        st.transactions.iter().find(|t| t.utr == utr).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }

    pub fn order(&self, id: Uuid) -> Option<Order> {
        let st = self.state.lock().unwrap();
        st.orders.iter().find(|o| o.id == id).cloned()
    }

    pub fn book(&self, id: Uuid) -> Option<Book> {
        let st = self.state.lock().unwrap();
        st.books.iter().find(|b| b.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        let mut st = self.state.lock().unwrap();
        if st.users.iter().any(|(u, _)| u.email == new_user.email) {
            return Ok(None);
        }
        let now = st.tick();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            mobile: new_user.mobile.clone(),
            role: Role::Customer,
            created_at: now,
            updated_at: now,
        };
        st.users.push((user.clone(), new_user.password_hash.clone()));
        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, h)| UserCredentials {
                user: u.clone(),
                password_hash: h.clone(),
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        let mut users: Vec<User> = st.users.iter().map(|(u, _)| u.clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[async_trait]
impl BookRepository for MemStore {
    async fn list(&self, filter: &BookFilter) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        let keyword = filter.keyword.as_deref().map(str::to_lowercase);
        let mut books: Vec<Book> = st
            .books
            .iter()
            .filter(|b| {
                keyword
                    .as_deref()
                    .is_none_or(|k| b.title.to_lowercase().contains(k))
            })
            .filter(|b| filter.category.as_deref().is_none_or(|c| b.category == c))
            .cloned()
            .collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        Ok(self.book(id))
    }

    async fn get_many(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        Ok(st.books.iter().filter(|b| ids.contains(&b.id)).cloned().collect())
    }

    async fn create(&self, draft: &BookDraft, _created_by: Uuid) -> anyhow::Result<Book> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let book = Book {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            author: draft.author.clone(),
            description: draft.description.clone(),
            detailed_description: draft.detailed_description.clone(),
            category: draft.category.clone(),
            cover_image: draft.cover_image.clone(),
            book_images: draft.book_images.clone(),
            original_price: draft.original_price,
            discount_percent: draft.discount_percent,
            selling_price: draft.selling_price,
            offer_expires_at: draft.offer_expires_at,
            future_price: draft.future_price,
            google_drive_file_id: draft.google_drive_file_id.clone(),
            sample_pdf_url: draft.sample_pdf_url.clone(),
            sales_count: 0,
            created_at: now,
            updated_at: now,
        };
        st.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, draft: &BookDraft) -> anyhow::Result<Option<Book>> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let Some(book) = st.books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        book.title = draft.title.clone();
        book.author = draft.author.clone();
        book.description = draft.description.clone();
        book.category = draft.category.clone();
        book.cover_image = draft.cover_image.clone();
        book.book_images = draft.book_images.clone();
        book.original_price = draft.original_price;
        book.discount_percent = draft.discount_percent;
        book.selling_price = draft.selling_price;
        book.google_drive_file_id = draft.google_drive_file_id.clone();
        book.sample_pdf_url = draft.sample_pdf_url.clone();
        book.updated_at = now;
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.books.len();
        st.books.retain(|b| b.id != id);
        st.cart.retain(|(_, b, _)| *b != id);
        Ok(st.books.len() != before)
    }

    async fn top_selling(&self, limit: i64) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        let mut books = st.books.clone();
        books.sort_by(|a, b| {
            b.sales_count
                .cmp(&a.sales_count)
                .then(b.created_at.cmp(&a.created_at))
        });
        books.truncate(limit as usize);
        Ok(books)
    }

    async fn related(
        &self,
        book_id: Uuid,
        category: &str,
        limit: i64,
    ) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .books
            .iter()
            .filter(|b| b.id != book_id && b.category == category)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CartRepository for MemStore {
    async fn list_cart(&self, user_id: Uuid) -> anyhow::Result<Vec<CartLine>> {
        Ok(self.state.lock().unwrap().cart_lines(user_id))
    }

    async fn list_carts_for(&self, user_ids: &[Uuid]) -> anyhow::Result<Vec<(Uuid, CartLine)>> {
        let st = self.state.lock().unwrap();
        Ok(user_ids
            .iter()
            .flat_map(|u| st.cart_lines(*u).into_iter().map(move |l| (*u, l)))
            .collect())
    }

    async fn add_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        if st.cart.iter().any(|(u, b, _)| *u == user_id && *b == book_id) {
            return Ok(false);
        }
        st.cart.push((user_id, book_id, 1));
        Ok(true)
    }

    async fn remove_items(&self, user_id: Uuid, book_ids: &[Uuid]) -> anyhow::Result<u64> {
        let mut st = self.state.lock().unwrap();
        let before = st.cart.len();
        st.cart
            .retain(|(u, b, _)| !(*u == user_id && book_ids.contains(b)));
        Ok((before - st.cart.len()) as u64)
    }
}

#[async_trait]
impl OrderRepository for MemStore {
    async fn create(
        &self,
        user_id: Uuid,
        items: &[OrderItem],
        total_price: i64,
    ) -> anyhow::Result<Order> {
        Ok(self.seed_order(user_id, items, total_price))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.order(id))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        let st = self.state.lock().unwrap();
        let mut all: Vec<OrderWithBuyer> = st
            .orders
            .iter()
            .map(|o| {
                let buyer = st.users.iter().find(|(u, _)| u.id == o.user_id);
                OrderWithBuyer {
                    order: o.clone(),
                    buyer_name: buyer.map(|(u, _)| u.name.clone()).unwrap_or_default(),
                    buyer_email: buyer.map(|(u, _)| u.email.clone()).unwrap_or_default(),
                }
            })
            .collect();
        all.sort_by(|a, b| b.order.created_at.cmp(&a.order.created_at));
        Ok(all)
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let st = self.state.lock().unwrap();
        let mut orders: Vec<Order> = st
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn set_payment_proof(
        &self,
        id: Uuid,
        proof: &str,
        method: &str,
    ) -> anyhow::Result<Option<Order>> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let Some(order) = st.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.payment_proof = proof.to_string();
        order.payment_method = Some(method.to_string());
        order.updated_at = now;
        Ok(Some(order.clone()))
    }

    async fn list_pending_with_proof(&self, total_price: i64) -> anyhow::Result<Vec<Order>> {
        let st = self.state.lock().unwrap();
        let mut orders: Vec<Order> = st
            .orders
            .iter()
            .filter(|o| !o.is_paid && o.total_price == total_price && !o.payment_proof.is_empty())
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn settle(
        &self,
        order_id: Uuid,
        payment_id: &str,
        transaction_id: Option<Uuid>,
    ) -> anyhow::Result<SettleOutcome> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let Some(pos) = st.orders.iter().position(|o| o.id == order_id) else {
            return Ok(SettleOutcome::OrderNotFound);
        };
        if st.orders[pos].is_paid {
            return Ok(SettleOutcome::OrderAlreadyPaid);
        }
        if let Some(txn_id) = transaction_id {
            match st.transactions.iter_mut().find(|t| t.id == txn_id) {
                Some(t) if !t.is_used => {
                    t.is_used = true;
                    t.order_id = Some(order_id);
                }
                _ => return Ok(SettleOutcome::TransactionAlreadyUsed),
            }
        }
        let order = &mut st.orders[pos];
        order.is_paid = true;
        order.paid_at = Some(now);
        order.payment_id = Some(payment_id.to_string());
        order.updated_at = now;
        let paid = order.clone();
        for item in &paid.items {
            if let Some(book) = st.books.iter_mut().find(|b| b.id == item.book_id) {
                book.sales_count += 1;
            }
        }
        Ok(SettleOutcome::Settled(paid))
    }

    async fn mark_item_granted(&self, order_id: Uuid, book_id: Uuid) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        if st.fail_grant_marks {
            anyhow::bail!("order_items update failed for {order_id}/{book_id}");
        }
        if let Some(order) = st.orders.iter_mut().find(|o| o.id == order_id) {
            for item in order.items.iter_mut().filter(|i| i.book_id == book_id) {
                item.access_granted = true;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for MemStore {
    async fn insert_or_get(&self, new_txn: &NewTransaction) -> anyhow::Result<(Transaction, bool)> {
        let mut st = self.state.lock().unwrap();
        if let Some(existing) = st.transactions.iter().find(|t| t.utr == new_txn.utr) {
            return Ok((existing.clone(), false));
        }
        let now = st.tick();
        let txn = Transaction {
            id: Uuid::new_v4(),
            utr: new_txn.utr.clone(),
            amount: new_txn.amount,
            is_used: false,
            order_id: None,
            sender: new_txn.sender.clone(),
            raw_message: new_txn.raw_message.clone(),
            created_at: now,
        };
        st.transactions.push(txn.clone());
        Ok((txn, true))
    }

    async fn find_by_utr(&self, utr: &str) -> anyhow::Result<Option<Transaction>> {
        Ok(self.transaction(utr))
    }

    async fn list_unused_by_amount(&self, amount: i64) -> anyhow::Result<Vec<Transaction>> {
        let st = self.state.lock().unwrap();
        let mut txns: Vec<Transaction> = st
            .transactions
            .iter()
            .filter(|t| !t.is_used && t.amount == amount)
            .cloned()
            .collect();
        txns.sort_by_key(|t| t.created_at);
        Ok(txns)
    }

    async fn list(&self, unused_only: bool) -> anyhow::Result<Vec<Transaction>> {
        let st = self.state.lock().unwrap();
        let mut txns: Vec<Transaction> = st
            .transactions
            .iter()
            .filter(|t| !unused_only || !t.is_used)
            .cloned()
            .collect();
        txns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(txns)
    }
}

#[async_trait]
impl SettingsRepository for MemStore {
    async fn get_or_create(&self) -> anyhow::Result<SystemSettings> {
        let mut st = self.state.lock().unwrap();
        Ok(st.settings.get_or_insert_with(SystemSettings::default).clone())
    }

    async fn save(&self, settings: &SystemSettings) -> anyhow::Result<SystemSettings> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let mut saved = settings.clone();
        saved.updated_at = Some(now);
        st.settings = Some(saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl SampleDownloadRepository for MemStore {
    async fn record(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        book_title: Option<&str>,
    ) -> anyhow::Result<SampleDownload> {
        let mut st = self.state.lock().unwrap();
        let now = st.tick();
        let row = SampleDownload {
            id: Uuid::new_v4(),
            user_id,
            book_id,
            book_title: book_title.map(str::to_string),
            downloaded_at: now,
        };
        st.downloads.push(row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SampleDownload>> {
        let st = self.state.lock().unwrap();
        let mut rows: Vec<SampleDownload> = st
            .downloads
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.downloaded_at.cmp(&a.downloaded_at));
        Ok(rows)
    }
}

#[async_trait]
impl StatsRepository for MemStore {
    async fn dashboard(
        &self,
        year_start: DateTime<Utc>,
        month_start: DateTime<Utc>,
        months: i64,
        top_books: i64,
    ) -> anyhow::Result<DashboardStats> {
        let st = self.state.lock().unwrap();
        let paid: Vec<&Order> = st.orders.iter().filter(|o| o.is_paid).collect();
        let revenue_since = |from: DateTime<Utc>| -> i64 {
            paid.iter()
                .filter(|o| o.created_at >= from)
                .map(|o| o.total_price)
                .sum()
        };

        let mut by_month: HashMap<String, i64> = HashMap::new();
        for o in &paid {
            *by_month.entry(o.created_at.format("%Y-%m").to_string()).or_default() += o.total_price;
        }
        let monthly_sales = latest_months(
            by_month
                .into_iter()
                .map(|(month, revenue)| MonthlySales { month, revenue })
                .collect(),
            months as usize,
        );

        let mut by_book: HashMap<Uuid, (i64, i64)> = HashMap::new();
        for item in paid.iter().flat_map(|o| o.items.iter()) {
            let entry = by_book.entry(item.book_id).or_default();
            entry.0 += 1;
            entry.1 += item.price;
        }
        let mut book_analytics: Vec<BookSales> = by_book
            .into_iter()
            .map(|(book_id, (count, revenue))| {
                let book = st.books.iter().find(|b| b.id == book_id);
                BookSales {
                    book_id,
                    title: book.map(|b| b.title.clone()),
                    category: book.map(|b| b.category.clone()),
                    count,
                    revenue,
                }
            })
            .collect();
        book_analytics.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        book_analytics.truncate(top_books as usize);

        Ok(DashboardStats {
            total_orders: st.orders.len() as i64,
            total_users: st.users.len() as i64,
            total_books: st.books.len() as i64,
            total_cart_items: st.cart.iter().map(|(_, _, qty)| i64::from(*qty)).sum(),
            total_revenue: revenue_since(DateTime::<Utc>::MIN_UTC),
            yearly_revenue: revenue_since(year_start),
            monthly_revenue: revenue_since(month_start),
            monthly_sales,
            book_analytics,
        })
    }
}

/// Records grants; fails for file ids listed in `failing`.
#[derive(Default)]
pub struct FakeDrive {
    failing: HashSet<String>,
    grants: Mutex<Vec<(String, String)>>,
}

impl FakeDrive {
    pub fn failing_for(file_ids: &[&str]) -> Self {
        Self {
            failing: file_ids.iter().map(|s| s.to_string()).collect(),
            grants: Mutex::new(Vec::new()),
        }
    }

    pub fn grants(&self) -> Vec<(String, String)> {
        self.grants.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriveAccessPort for FakeDrive {
    async fn grant_reader(&self, file_id: &str, email: &str) -> anyhow::Result<()> {
        if self.failing.contains(file_id) {
            anyhow::bail!("drive rejected permission for {file_id}");
        }
        self.grants
            .lock()
            .unwrap()
            .push((file_id.to_string(), email.to_string()));
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        api_port: 0,
        frontend_url: Some("http://localhost:5173".into()),
        database_url: String::new(),
        db_max_connections: 1,
        jwt_secret: "test-secret-0123456789".into(),
        jwt_expires_secs: 3600,
        cookie_secure: false,
        uploads_dir: std::env::temp_dir().join("bookstore-api-tests").display().to_string(),
        upload_max_bytes: 1024 * 1024,
        public_base_url: None,
        storage_backend: StorageBackend::Filesystem,
        cloudinary: None,
        google_service_account_key: None,
        sms_webhook_secret: None,
        is_production: false,
    }
}

/// Handler-level context with every port backed by `store`.
pub fn app_context(store: &Arc<MemStore>, drive: Arc<FakeDrive>) -> AppContext {
    let cfg = test_config();
    let storage = Arc::new(FsStoragePort::new(cfg.uploads_dir.clone().into()));
    let services = AppServices::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        storage,
        drive,
    );
    AppContext::new(cfg, services)
}
