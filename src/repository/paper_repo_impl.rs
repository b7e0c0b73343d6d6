// ==========================================
// 组卷引擎 - 试卷 Repository 实现
// ==========================================
// 职责: 管理 generated_paper / generated_paper_item 表
// 说明: generated_paper_item 保存题目快照,不外键引用 question_item,
//       题库后续删除题目不影响历史试卷
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::paper::{GeneratedPaper, PaperItem};
use crate::domain::types::DifficultyLevel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::paper_repo::PaperStore;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 试卷头信息（不含题目）
struct PaperHeader {
    paper_id: String,
    group_id: String,
    group_name: String,
    created_at: NaiveDateTime,
}

// ==========================================
// SqlitePaperRepository - 试卷仓储
// ==========================================
pub struct SqlitePaperRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePaperRepository {
    /// 创建新的 SqlitePaperRepository 实例
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
            CREATE TABLE IF NOT EXISTS generated_paper (
              paper_id TEXT PRIMARY KEY,
              group_id TEXT NOT NULL,
              group_name TEXT NOT NULL,
              created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS generated_paper_item (
              paper_id TEXT NOT NULL REFERENCES generated_paper(paper_id) ON DELETE CASCADE,
              seq_no INTEGER NOT NULL,
              item_id TEXT NOT NULL,
              content TEXT NOT NULL,
              difficulty TEXT NOT NULL,
              knowledge_area TEXT NOT NULL,
              PRIMARY KEY (paper_id, seq_no)
            );

            CREATE INDEX IF NOT EXISTS idx_generated_paper_group
              ON generated_paper(group_id, created_at);
            "#,
        )?;
        Ok(())
    }

    /// 读取试卷题目快照（按序号升序）
    fn load_items(conn: &Connection, paper_id: &str) -> RepositoryResult<Vec<PaperItem>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT seq_no, item_id, content, difficulty, knowledge_area
            FROM generated_paper_item
            WHERE paper_id = ?1
            ORDER BY seq_no ASC
            "#,
        )?;

        let items = stmt
            .query_map(params![paper_id], |row| {
                let raw_difficulty: String = row.get(3)?;
                let difficulty = raw_difficulty.parse::<DifficultyLevel>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
                })?;
                Ok(PaperItem {
                    seq_no: row.get(0)?,
                    item_id: row.get(1)?,
                    content: row.get(2)?,
                    difficulty,
                    knowledge_area: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(items)
    }

    fn assemble(conn: &Connection, header: PaperHeader) -> RepositoryResult<GeneratedPaper> {
        let items = Self::load_items(conn, &header.paper_id)?;
        Ok(GeneratedPaper {
            paper_id: header.paper_id,
            group_id: header.group_id,
            group_name: header.group_name,
            items,
            created_at: header.created_at,
        })
    }
}

impl PaperStore for SqlitePaperRepository {
    fn append_paper(&self, paper: &GeneratedPaper) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO generated_paper (paper_id, group_id, group_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![paper.paper_id, paper.group_id, paper.group_name, paper.created_at],
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO generated_paper_item (
                    paper_id, seq_no, item_id, content, difficulty, knowledge_area
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for item in &paper.items {
                stmt.execute(params![
                    paper.paper_id,
                    item.seq_no,
                    item.item_id,
                    item.content,
                    item.difficulty.as_str(),
                    item.knowledge_area,
                ])?;
            }
        }

        tx.commit()?;
        debug!(paper_id = %paper.paper_id, items = paper.items.len(), "试卷已写入");
        Ok(paper.paper_id.clone())
    }

    fn list_papers(&self, group_id: Option<&str>) -> RepositoryResult<Vec<GeneratedPaper>> {
        let conn = self.get_conn()?;
        let headers = {
            let mut stmt = conn.prepare(
                r#"
                SELECT paper_id, group_id, group_name, created_at
                FROM generated_paper
                WHERE (?1 IS NULL OR group_id = ?1)
                ORDER BY created_at DESC, paper_id ASC
                "#,
            )?;
            let rows = stmt
                .query_map(params![group_id], |row| {
                    Ok(PaperHeader {
                        paper_id: row.get(0)?,
                        group_id: row.get(1)?,
                        group_name: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                })?
                .collect::<SqliteResult<Vec<_>>>()?;
            rows
        };

        headers
            .into_iter()
            .map(|header| Self::assemble(&conn, header))
            .collect()
    }

    fn find_paper(&self, paper_id: &str) -> RepositoryResult<Option<GeneratedPaper>> {
        let conn = self.get_conn()?;
        let header = conn
            .query_row(
                r#"
                SELECT paper_id, group_id, group_name, created_at
                FROM generated_paper
                WHERE paper_id = ?1
                "#,
                params![paper_id],
                |row| {
                    Ok(PaperHeader {
                        paper_id: row.get(0)?,
                        group_id: row.get(1)?,
                        group_name: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;

        match header {
            Some(header) => Ok(Some(Self::assemble(&conn, header)?)),
            None => Ok(None),
        }
    }

    fn delete_paper(&self, paper_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM generated_paper WHERE paper_id = ?1",
            params![paper_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "GeneratedPaper".to_string(),
                id: paper_id.to_string(),
            });
        }
        Ok(())
    }

    fn remove_paper_item(&self, paper_id: &str, item_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM generated_paper_item WHERE paper_id = ?1 AND item_id = ?2",
            params![paper_id, item_id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "GeneratedPaperItem".to_string(),
                id: format!("{}/{}", paper_id, item_id),
            });
        }
        Ok(())
    }
}
