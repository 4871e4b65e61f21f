pub mod ingest_sms;
pub mod ingest_transaction;
pub mod list_transactions;
