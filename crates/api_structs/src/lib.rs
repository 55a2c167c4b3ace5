mod dispatch;
mod settings;
mod snooze;
mod status;
mod subscription;

pub mod dtos {
    pub use crate::dispatch::dtos::*;
    pub use crate::settings::dtos::*;
    pub use crate::snooze::dtos::*;
    pub use crate::subscription::dtos::*;
}

pub use crate::dispatch::api::*;
pub use crate::settings::api::*;
pub use crate::snooze::api::*;
pub use crate::status::api::*;
pub use crate::subscription::api::*;
