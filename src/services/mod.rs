pub mod analytics_service;
pub mod api_service;
pub mod chat_session;
pub mod lifecycle;
pub mod reconciler;
pub mod workbook_service;
pub mod workbook_session;
