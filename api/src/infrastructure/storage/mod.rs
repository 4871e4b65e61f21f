mod cloudinary_port_impl;
mod core;
mod filesystem_port_impl;
pub use core::*;
pub mod filesystem {
    pub use super::filesystem_port_impl::*;
}
pub mod cloudinary {
    pub use super::cloudinary_port_impl::*;
}
