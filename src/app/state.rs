// ==========================================
// 组卷引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接、仓储与API实例
// ==========================================

use std::sync::Arc;

use crate::api::PaperApi;
use crate::config::ConfigManager;
use crate::db::open_shared_connection;
use crate::repository::{SqliteCatalogRepository, SqlitePaperRepository};

/// 应用状态
///
/// 供宿主展示层持有的全局状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 题库仓储（宿主维护题库时使用）
    pub catalog_repo: Arc<SqliteCatalogRepository>,

    /// 试卷API
    pub paper_api: Arc<PaperApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 所有仓储与配置管理器共享同一连接
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState,数据库路径: {}", db_path);

        let conn = open_shared_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        let catalog_repo = Arc::new(
            SqliteCatalogRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建SqliteCatalogRepository: {}", e))?,
        );
        let paper_repo = Arc::new(
            SqlitePaperRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建SqlitePaperRepository: {}", e))?,
        );
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let paper_api = Arc::new(PaperApi::new(
            catalog_repo.clone(),
            paper_repo,
            config_manager,
        ));

        tracing::info!("AppState初始化成功");

        Ok(Self {
            db_path,
            catalog_repo,
            paper_api,
        })
    }
}

/// 获取默认数据库路径
///
/// # 优先级
/// 1. 环境变量 EXAM_PAPER_DB_PATH
/// 2. 用户数据目录下 exam-paper-gen[-dev]/exam_paper.db
/// 3. 当前目录 ./exam_paper.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("EXAM_PAPER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./exam_paper.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录,避免污染生产数据
        let app_dir = if cfg!(debug_assertions) {
            data_dir.join("exam-paper-gen-dev")
        } else {
            data_dir.join("exam-paper-gen")
        };

        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join("exam_paper.db");
        } else {
            tracing::warn!("无法创建数据目录 {:?},使用当前目录", app_dir);
        }
    }

    path.to_string_lossy().to_string()
}
