pub mod catalog;
pub mod config;
pub mod deck;
pub mod error;
pub mod events;
pub mod input;
pub mod session;
pub mod viewer;
pub mod processing {
    pub mod layout;
}
pub mod render {
    pub mod frame;
    pub mod gpu;
    pub mod loader;
    pub mod overlay;
    pub mod surface;
    pub mod text;
}

pub use error::Error;
