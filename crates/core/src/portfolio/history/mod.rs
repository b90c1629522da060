pub mod history_model;
pub mod history_service;
pub mod history_traits;
pub mod timeline;

pub use history_model::*;
pub use history_service::PortfolioHistoryService;
pub use history_traits::PortfolioHistoryServiceTrait;
pub use timeline::*;
