/// 경매 시스템
/// 사용자, 경매, 세션을 소유하고 권한 검사를 담당한다.
/// 입찰/경매 생성 커맨드는 bidding::commands, 조회는 query::handlers 에 있다.
// region:    --- Imports
use crate::auction::AuctionItem;
use crate::clock::{Clock, SystemClock};
use crate::config::SystemConfig;
use crate::error::{AuctionError, AuctionResult};
use crate::user::User;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

mod session;

pub use session::Session;
// endregion: --- Imports

// region:    --- Auction System
/// 잠금 순서: auctions -> 개별 경매 -> users
/// 세션은 사용자당 하나만 살아있다.
pub struct AuctionSystem {
    pub(crate) users: RwLock<HashMap<String, User>>,
    pub(crate) auctions: RwLock<BTreeMap<u64, Arc<Mutex<AuctionItem>>>>,
    sessions: RwLock<HashMap<Uuid, String>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: SystemConfig,
}

impl Default for AuctionSystem {
    fn default() -> Self {
        Self::new(SystemConfig::default())
    }
}

impl AuctionSystem {
    pub fn new(config: SystemConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: SystemConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            auctions: RwLock::new(BTreeMap::new()),
            sessions: RwLock::new(HashMap::new()),
            clock,
            config,
        }
    }

    pub fn config(&self) -> SystemConfig {
        self.config
    }

    /// 사용자 등록
    pub fn register_user(&self, username: &str, password: &str, email: &str) -> AuctionResult<()> {
        let mut users = self.users.write();
        if users.contains_key(username) {
            warn!("{:<12} --> 이미 존재하는 사용자: {}", "Session", username);
            return Err(AuctionError::UserAlreadyExists(username.to_string()));
        }
        users.insert(username.to_string(), User::new(username, password, email));
        info!("{:<12} --> 사용자 등록 완료: {}", "Session", username);
        Ok(())
    }

    /// 로그인. 실패하면 기존 세션에는 아무 영향이 없다.
    pub fn login_user(&self, username: &str, password: &str) -> AuctionResult<Session> {
        let valid = self
            .users
            .read()
            .get(username)
            .is_some_and(|user| user.check_password(password));
        if !valid {
            warn!("{:<12} --> 로그인 실패: {}", "Session", username);
            return Err(AuctionError::InvalidCredentials);
        }

        // 재로그인 시 이전 토큰은 폐기
        let token = Uuid::new_v4();
        let mut sessions = self.sessions.write();
        sessions.retain(|_, owner| owner != username);
        sessions.insert(token, username.to_string());
        drop(sessions);
        info!("{:<12} --> 로그인 성공: {}", "Session", username);
        Ok(Session {
            token,
            username: username.to_string(),
        })
    }

    /// 로그아웃
    pub fn logout(&self, session: &Session) -> AuctionResult<()> {
        self.authorize(session, "log out")?;
        self.sessions.write().remove(&session.token);
        info!("{:<12} --> 로그아웃: {}", "Session", session.username);
        Ok(())
    }

    /// 토큰으로 살아있는 세션 조회
    pub fn session(&self, token: Uuid, action: &'static str) -> AuctionResult<Session> {
        self.sessions
            .read()
            .get(&token)
            .map(|username| Session {
                token,
                username: username.clone(),
            })
            .ok_or(AuctionError::Unauthorized(action))
    }

    /// 세션이 유효하면 사용자 이름을 돌려준다
    pub(crate) fn authorize(&self, session: &Session, action: &'static str) -> AuctionResult<String> {
        match self.sessions.read().get(&session.token) {
            Some(username) if *username == session.username => Ok(username.clone()),
            _ => {
                warn!("{:<12} --> 권한 없음: {}", "Session", action);
                Err(AuctionError::Unauthorized(action))
            }
        }
    }
}
// endregion: --- Auction System

// endregion: --- Tests
