/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 评估后端基础 URL
    pub api_base_url: String,
    /// 鉴权服务签发的 Bearer Token
    pub auth_token: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            auth_token: String::new(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("EVAL_API_BASE_URL").unwrap_or(default.api_base_url),
            auth_token: std::env::var("EVAL_AUTH_TOKEN").unwrap_or(default.auth_token),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
