// ==========================================
// 组卷引擎 - 题库 Repository 实现
// ==========================================
// 职责: 管理 question_group / question_item 表
// 红线: Repository 不含业务规则,只做数据访问
// 说明: upsert_group / batch_insert_items / delete_item 供宿主与测试填充题库,
//       不属于 Catalog 只读接口
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::item::{Item, QuestionGroup};
use crate::domain::types::DifficultyLevel;
use crate::repository::catalog_repo::Catalog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteCatalogRepository - 题库仓储
// ==========================================
pub struct SqliteCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogRepository {
    /// 创建新的 SqliteCatalogRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_tables()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_tables(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS question_group (
              group_id TEXT PRIMARY KEY,
              group_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS question_item (
              item_id TEXT PRIMARY KEY,
              group_id TEXT NOT NULL REFERENCES question_group(group_id) ON DELETE CASCADE,
              content TEXT NOT NULL,
              difficulty TEXT NOT NULL,
              knowledge_area TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_question_item_cell
              ON question_item(group_id, difficulty, knowledge_area);
            "#,
        )?;
        Ok(())
    }

    fn map_item(row: &Row<'_>) -> SqliteResult<Item> {
        let raw_difficulty: String = row.get(3)?;
        let difficulty = raw_difficulty
            .parse::<DifficultyLevel>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(Item {
            item_id: row.get(0)?,
            group_id: row.get(1)?,
            content: row.get(2)?,
            difficulty,
            knowledge_area: row.get(4)?,
        })
    }

    // ==========================================
    // 题库填充
    // ==========================================

    /// 新增或更新题组
    pub fn upsert_group(&self, group: &QuestionGroup) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO question_group (group_id, group_name) VALUES (?1, ?2)
            ON CONFLICT(group_id) DO UPDATE SET group_name = excluded.group_name
            "#,
            params![group.group_id, group.group_name],
        )?;
        Ok(())
    }

    /// 批量写入题目（INSERT OR REPLACE,事务化）
    ///
    /// # 返回
    /// - Ok(usize): 写入记录数
    /// - Err: 数据库错误（整个事务回滚）
    pub fn batch_insert_items(&self, items: &[Item]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR REPLACE INTO question_item (
                    item_id, group_id, content, difficulty, knowledge_area
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for item in items {
                stmt.execute(params![
                    item.item_id,
                    item.group_id,
                    item.content,
                    item.difficulty.as_str(),
                    item.knowledge_area,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;
        Ok(count)
    }

    /// 删除题目
    pub fn delete_item(&self, item_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM question_item WHERE item_id = ?1",
            params![item_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "QuestionItem".to_string(),
                id: item_id.to_string(),
            });
        }
        Ok(())
    }
}

impl Catalog for SqliteCatalogRepository {
    fn query_items(
        &self,
        group_id: &str,
        difficulty: Option<DifficultyLevel>,
        area: Option<&str>,
    ) -> RepositoryResult<Vec<Item>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT item_id, group_id, content, difficulty, knowledge_area
            FROM question_item
            WHERE group_id = ?1
              AND (?2 IS NULL OR difficulty = ?2)
              AND (?3 IS NULL OR knowledge_area = ?3)
            ORDER BY item_id ASC
            "#,
        )?;

        let items = stmt
            .query_map(
                params![group_id, difficulty.map(|d| d.as_str()), area],
                Self::map_item,
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(items)
    }

    fn count_items(
        &self,
        group_id: &str,
        difficulty: Option<DifficultyLevel>,
        area: Option<&str>,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM question_item
            WHERE group_id = ?1
              AND (?2 IS NULL OR difficulty = ?2)
              AND (?3 IS NULL OR knowledge_area = ?3)
            "#,
            params![group_id, difficulty.map(|d| d.as_str()), area],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn find_group(&self, group_id: &str) -> RepositoryResult<Option<QuestionGroup>> {
        let conn = self.get_conn()?;
        let group = conn
            .query_row(
                "SELECT group_id, group_name FROM question_group WHERE group_id = ?1",
                params![group_id],
                |row| {
                    Ok(QuestionGroup {
                        group_id: row.get(0)?,
                        group_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(group)
    }
}
