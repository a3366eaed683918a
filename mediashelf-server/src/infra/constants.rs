/// Placeholder secrets used when nothing is configured. Accepted only in
/// dev mode.
pub const DEFAULT_JWT_SECRET: &str = "mediashelf-dev-jwt-secret-change-me";
pub const DEFAULT_PASSWORD_PEPPER: &str = "mediashelf-dev-pepper-change-me";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 7 * 24;
