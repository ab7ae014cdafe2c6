// ==========================================
// 医药产品目录服务 - 应用层
// ==========================================
// 职责: HTTP 集成,连接客户端与业务 API
// ==========================================

pub mod auth;
pub mod extract;
pub mod routes;
pub mod state;

// 重导出
pub use auth::AdminSession;
pub use routes::{build_router, DEFAULT_UPLOAD_LIMIT_BYTES};
pub use state::AppState;
