pub mod system_settings;
