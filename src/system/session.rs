use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 인증된 호출자. 로그인 시 발급되고 로그아웃하면 무효가 된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
}
