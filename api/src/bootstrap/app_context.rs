use std::sync::Arc;

use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::drive_access_port::DriveAccessPort;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::sample_download_repository::SampleDownloadRepository;
use crate::application::ports::settings_repository::SettingsRepository;
use crate::application::ports::stats_repository::StatsRepository;
use crate::application::ports::storage_port::StoragePort;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    book_repo: Arc<dyn BookRepository>,
    cart_repo: Arc<dyn CartRepository>,
    order_repo: Arc<dyn OrderRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    sample_download_repo: Arc<dyn SampleDownloadRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    storage_port: Arc<dyn StoragePort>,
    drive_access: Arc<dyn DriveAccessPort>,
}

impl AppServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        book_repo: Arc<dyn BookRepository>,
        cart_repo: Arc<dyn CartRepository>,
        order_repo: Arc<dyn OrderRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        sample_download_repo: Arc<dyn SampleDownloadRepository>,
        stats_repo: Arc<dyn StatsRepository>,
        storage_port: Arc<dyn StoragePort>,
        drive_access: Arc<dyn DriveAccessPort>,
    ) -> Self {
        Self {
            user_repo,
            book_repo,
            cart_repo,
            order_repo,
            transaction_repo,
            settings_repo,
            sample_download_repo,
            stats_repo,
            storage_port,
            drive_access,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn book_repo(&self) -> Arc<dyn BookRepository> {
        self.services.book_repo.clone()
    }

    pub fn cart_repo(&self) -> Arc<dyn CartRepository> {
        self.services.cart_repo.clone()
    }

    pub fn order_repo(&self) -> Arc<dyn OrderRepository> {
        self.services.order_repo.clone()
    }

    pub fn transaction_repo(&self) -> Arc<dyn TransactionRepository> {
        self.services.transaction_repo.clone()
    }

    pub fn settings_repo(&self) -> Arc<dyn SettingsRepository> {
        self.services.settings_repo.clone()
    }

    pub fn sample_download_repo(&self) -> Arc<dyn SampleDownloadRepository> {
        self.services.sample_download_repo.clone()
    }

    pub fn stats_repo(&self) -> Arc<dyn StatsRepository> {
        self.services.stats_repo.clone()
    }

    pub fn storage_port(&self) -> Arc<dyn StoragePort> {
        self.services.storage_port.clone()
    }

    pub fn drive_access(&self) -> Arc<dyn DriveAccessPort> {
        self.services.drive_access.clone()
    }
}
