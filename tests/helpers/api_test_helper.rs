// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用环境
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use exam_paper_gen::api::PaperApi;
use exam_paper_gen::config::ConfigManager;
use exam_paper_gen::db::open_shared_connection;
use exam_paper_gen::domain::DifficultyLevel;
use exam_paper_gen::repository::{SqliteCatalogRepository, SqlitePaperRepository};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 所有仓储共享同一连接
pub struct ApiTestEnv {
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub catalog_repo: Arc<SqliteCatalogRepository>,
    pub paper_repo: Arc<SqlitePaperRepository>,
    pub config_manager: Arc<ConfigManager>,
    pub paper_api: PaperApi,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let conn = open_shared_connection(&db_path)?;

        let catalog_repo = Arc::new(SqliteCatalogRepository::from_connection(conn.clone())?);
        let paper_repo = Arc::new(SqlitePaperRepository::from_connection(conn.clone())?);
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn).map_err(|e| e.to_string())?,
        );

        let paper_api = PaperApi::new(
            catalog_repo.clone(),
            paper_repo.clone(),
            config_manager.clone(),
        );

        Ok(Self {
            _temp_file: temp_file,
            db_path,
            catalog_repo,
            paper_repo,
            config_manager,
            paper_api,
        })
    }

    /// 写入题组数据
    pub fn seed(
        &self,
        group_id: &str,
        cells: &[(DifficultyLevel, &str, usize)],
    ) -> Result<usize, Box<dyn std::error::Error>> {
        test_helpers::seed_group(&self.catalog_repo, group_id, cells)
    }
}
