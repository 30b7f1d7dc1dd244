/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 找不到刷题页面时导航到的兜底 URL
    pub fallback_url: Option<String>,
    /// 会话状态文件
    pub storage_file: String,
    /// 提示级别上限
    pub max_hint_level: usize,
    /// 启动时重置会话进度和聊天记录
    pub reset_session: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            fallback_url: None,
            storage_file: "mentor_session.json".to_string(),
            max_hint_level: 3,
            reset_session: false,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            fallback_url: std::env::var("FALLBACK_URL").ok(),
            storage_file: std::env::var("STORAGE_FILE").unwrap_or(default.storage_file),
            max_hint_level: std::env::var("MAX_HINT_LEVEL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_hint_level),
            reset_session: std::env::var("RESET_SESSION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reset_session),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
