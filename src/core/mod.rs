pub mod calculator;
pub mod culture_store;
pub mod farm;
pub mod input_store;
pub mod menu;
pub mod persistence;
pub mod session;

pub use crate::core::farm::Farm;
pub use crate::domain::model::{Application, Culture, Geometry, Input, Shape};
pub use crate::domain::ports::{ConfigProvider, Console, Storage};
pub use crate::utils::error::Result;
