// ==========================================
// 组卷引擎 - 组卷配置读取 Trait
// ==========================================
// 职责: 定义组卷所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// ==========================================
// GenerationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait GenerationConfigReader: Send + Sync {
    /// 获取单次组卷最大总题量
    ///
    /// # 默认值
    /// - 200
    fn get_max_total_items(&self) -> Result<u32, Box<dyn Error + Send + Sync>>;
}
