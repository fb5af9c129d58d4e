pub const SESSION_COOKIE_NAME: &str = "sid";
pub const SESSION_MAX_AGE_SECS: u32 = 60 * 60 * 24;

pub const REGISTER_URL: &str = "/api/auth/register";
pub const LOGIN_URL: &str = "/api/auth/login";
pub const LOGOUT_URL: &str = "/api/auth/logout";
pub const ME_URL: &str = "/api/auth/me";

pub const QUESTIONS_URL: &str = "/api/questions";
pub const SCORE_URL: &str = "/api/score";
pub const RESULTS_URL: &str = "/api/results";

pub const ADMIN_QUESTIONS_URL: &str = "/api/admin/questions";
pub const ADMIN_SUBJECTS_URL: &str = "/api/admin/subjects";
pub const ADMIN_TOPICS_URL: &str = "/api/admin/topics";
pub const ADMIN_USERS_URL: &str = "/api/admin/users";

pub const PROFILE_URL: &str = "/api/user/profile";
pub const PROFILE_IMAGE_URL: &str = "/api/user/profile-image";
pub const UPLOADS_PREFIX: &str = "/uploads/profiles";

pub const ROLES: &[&str] = &["user", "admin"];
pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];
pub const DEFAULT_DIFFICULTY: &str = "medium";

// Profile image upload limits
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const UPLOAD_FIELD_NAME: &str = "profile_image";
