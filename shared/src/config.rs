use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
        };
        let server = ServerConfig {
            port: match std::env::var("PORT") {
                Ok(port) => port.parse::<u16>()?,
                Err(_) => ServerConfig::DEFAULT_PORT,
            },
            frontend_url: std::env::var("FRONTEND_URL").ok(),
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    // アクセストークンの有効期限（秒）
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
    // 未設定なら CORS はすべてのオリジンを許可する
    pub frontend_url: Option<String>,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;
}
