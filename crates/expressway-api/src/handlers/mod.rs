mod expressways;
mod health;

pub use expressways::{create_expressway, get_expressway, list_expressways, update_expressway};
pub use health::health_check;
