pub mod context;
pub mod dispatch;
pub mod form;
pub mod http;
pub mod notify;
pub mod router;
pub mod state;
