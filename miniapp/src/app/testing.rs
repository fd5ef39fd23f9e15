//! In-memory backend for handler tests.
//!
//! Applies the same lifecycle rules the real backend does, moves balances,
//! and records which operations were called.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use lib_auth::{Claims, TelegramUser};
use lib_core::model::lifecycle;
use lib_core::{CoreError, Transition};
use parking_lot::Mutex;
use shared::dto::{
    AuthCheckResponse, AvatarResponse, Friend, FriendRejectResponse, FriendStatus, Listing,
    ListingCreate, ListingQuery, ListingStatus, TelegramAuthResponse, Transaction, UserProfile,
};

use crate::core::ApiService;
use crate::services::api::ApiError;

const CREATED_AT: &str = "2024-05-01T10:00:00";

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, UserProfile>,
    listings: BTreeMap<i64, Listing>,
    friends: Vec<Friend>,
    transactions: Vec<Transaction>,
    tokens: HashMap<String, i64>,
    next_id: i64,
    calls: Vec<&'static str>,
    offline: bool,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record the call, then fail like an unreachable host when offline
    fn enter(&mut self, op: &'static str) -> Result<(), ApiError> {
        self.calls.push(op);
        if self.offline {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn caller(&self, token: &str) -> Result<i64, ApiError> {
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| status(401, "Could not validate credentials"))
    }

    fn user(&self, id: i64) -> Result<UserProfile, ApiError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| status(404, "User not found"))
    }

    fn user_by_telegram(&mut self, telegram_id: i64, username: &str) -> UserProfile {
        if let Some(user) = self.users.values().find(|u| u.telegram_id == telegram_id) {
            return user.clone();
        }
        let id = self.next_id();
        let user = profile(id, telegram_id, username, 5.0);
        self.users.insert(id, user.clone());
        user
    }

    /// Every call yields a distinct token
    fn issue_token(&mut self, user_id: i64) -> String {
        let serial = self.next_id();
        let claims = Claims {
            sub: user_id.to_string(),
            telegram_id: None,
            username: Some(format!("session-{}", serial)),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"memory-backend"),
        )
        .expect("token encodes");
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn move_hours(&mut self, transfer: &lib_core::Transfer, listing: &Listing) -> Result<(), ApiError> {
        let from = self.user(transfer.from_user_id)?;
        if from.balance < transfer.hours {
            return Err(status(400, "Insufficient balance"));
        }
        if let Some(user) = self.users.get_mut(&transfer.from_user_id) {
            user.balance -= transfer.hours;
            user.spent_hours += transfer.hours;
        }
        if let Some(user) = self.users.get_mut(&transfer.to_user_id) {
            user.balance += transfer.hours;
            user.earned_hours += transfer.hours;
        }
        let id = self.next_id();
        self.transactions.push(Transaction {
            id,
            from_user_id: transfer.from_user_id,
            to_user_id: transfer.to_user_id,
            hours: transfer.hours,
            description: format!("{:?} for listing {}", transfer.kind, listing.id),
            transaction_type: transfer.kind,
            created_at: CREATED_AT.to_string(),
            from_user: None,
            to_user: None,
        });
        Ok(())
    }
}

fn status(status: u16, detail: &str) -> ApiError {
    ApiError::Status {
        status,
        detail: detail.to_string(),
    }
}

fn core_status(err: CoreError) -> ApiError {
    let code = match err {
        CoreError::Forbidden(_) => 403,
        CoreError::NotFound(_) => 404,
        _ => 400,
    };
    status(code, &err.user_message())
}

pub(crate) fn profile(id: i64, telegram_id: i64, username: &str, balance: f64) -> UserProfile {
    UserProfile {
        id,
        telegram_id,
        username: username.to_string(),
        avatar: None,
        balance,
        earned_hours: 0.0,
        spent_hours: 0.0,
        created_at: CREATED_AT.to_string(),
    }
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a user and return the init data Telegram would hand them
    pub(crate) fn add_user(&self, telegram_id: i64, username: &str, balance: f64) -> String {
        let mut inner = self.inner.lock();
        let user = inner.user_by_telegram(telegram_id, username);
        if let Some(stored) = inner.users.get_mut(&user.id) {
            stored.balance = balance;
        }
        init_data(telegram_id)
    }

    pub(crate) fn issue_token_for(&self, telegram_id: i64) -> String {
        let mut inner = self.inner.lock();
        let user_id = inner
            .users
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .map(|u| u.id)
            .expect("user registered");
        inner.issue_token(user_id)
    }

    pub(crate) fn revoke(&self, token: &str) {
        self.inner.lock().tokens.remove(token);
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    pub(crate) fn user_by_telegram_id(&self, telegram_id: i64) -> UserProfile {
        self.inner
            .lock()
            .users
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .cloned()
            .expect("user registered")
    }

    pub(crate) fn listing(&self, id: i64) -> Option<Listing> {
        self.inner.lock().listings.get(&id).cloned()
    }

    pub(crate) fn friend_edges(&self) -> Vec<Friend> {
        self.inner.lock().friends.clone()
    }

    pub(crate) fn call_count(&self, op: &str) -> usize {
        self.inner.lock().calls.iter().filter(|c| **c == op).count()
    }
}

/// Stand-in for signed init data
pub(crate) fn init_data(telegram_id: i64) -> String {
    format!("telegram_id={}&hash=signed", telegram_id)
}

fn parse_init_data(init_data: &str) -> Option<(i64, String)> {
    if let Some(rest) = init_data.strip_prefix("telegram_id=") {
        let id = rest.strip_suffix("&hash=signed")?.parse().ok()?;
        return Some((id, format!("tg{}", id)));
    }
    let encoded = init_data
        .strip_prefix("user=")?
        .strip_suffix("&hash=debug_hash")?;
    let json = urlencoding::decode(encoded).ok()?;
    let user: TelegramUser = serde_json::from_str(&json).ok()?;
    Some((user.id, user.username.unwrap_or_else(|| user.first_name.clone())))
}

#[async_trait]
impl ApiService for MemoryBackend {
    async fn telegram_auth(&self, init_data: &str) -> Result<TelegramAuthResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("telegram_auth")?;
        let (telegram_id, username) =
            parse_init_data(init_data).ok_or_else(|| status(401, "Invalid Telegram data"))?;
        let user = inner.user_by_telegram(telegram_id, &username);
        let access_token = inner.issue_token(user.id);
        Ok(TelegramAuthResponse {
            access_token,
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn auth_check(&self, token: &str) -> Result<AuthCheckResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("auth_check")?;
        let user_id = inner.tokens.get(token).copied();
        Ok(AuthCheckResponse {
            authenticated: user_id.is_some(),
            user_id,
        })
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("current_user")?;
        let me = inner.caller(token)?;
        inner.user(me)
    }

    async fn list_listings(
        &self,
        token: &str,
        query: &ListingQuery,
    ) -> Result<Vec<Listing>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("list_listings")?;
        inner.caller(token)?;

        let listings = inner
            .listings
            .values()
            .rev()
            .filter(|l| query.status.is_none_or(|s| s == l.status))
            .filter(|l| query.listing_type.is_none_or(|t| t == l.listing_type))
            .filter(|l| {
                query
                    .user_id
                    .is_none_or(|u| l.user_id == u || l.worker_ref() == Some(u))
            })
            .skip(query.skip.unwrap_or(0) as usize)
            .take(query.limit.map(|l| l as usize).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(listings)
    }

    async fn create_listing(&self, token: &str, create: &ListingCreate) -> Result<Listing, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("create_listing")?;
        let me = inner.caller(token)?;
        if create.user_id != me {
            return Err(status(403, "Cannot create listings for another user"));
        }
        let id = inner.next_id();
        let listing = Listing {
            id,
            user_id: me,
            worker_id: None,
            title: create.title.clone(),
            description: create.description.clone(),
            hours: create.hours,
            listing_type: create.listing_type,
            status: ListingStatus::Active,
            created_at: CREATED_AT.to_string(),
            prepayment_transaction_id: None,
            creator: None,
            worker: None,
        };
        inner.listings.insert(id, listing.clone());
        Ok(listing)
    }

    async fn transition_listing(
        &self,
        token: &str,
        listing_id: i64,
        transition: Transition,
    ) -> Result<Listing, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("transition_listing")?;
        let me = inner.caller(token)?;
        let listing = inner
            .listings
            .get(&listing_id)
            .cloned()
            .ok_or_else(|| status(404, "Listing not found"))?;

        let outcome = lifecycle::apply(&listing, me, transition).map_err(core_status)?;
        for transfer in &outcome.transfers {
            inner.move_hours(transfer, &listing)?;
        }

        let mut updated = outcome.listing;
        if transition == Transition::Pay {
            updated.prepayment_transaction_id = inner.transactions.last().map(|t| t.id);
        }
        inner.listings.insert(listing_id, updated.clone());
        Ok(updated)
    }

    async fn friends(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("friends")?;
        let me = inner.caller(token)?;
        Ok(inner
            .friends
            .iter()
            .filter(|f| f.status == FriendStatus::Accepted)
            .filter(|f| f.user_id == me || f.friend_id == me)
            .cloned()
            .collect())
    }

    async fn friend_requests(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("friend_requests")?;
        let me = inner.caller(token)?;
        Ok(inner
            .friends
            .iter()
            .filter(|f| f.status == FriendStatus::Pending && f.friend_id == me)
            .cloned()
            .collect())
    }

    async fn send_friend_request(&self, token: &str, friend_id: i64) -> Result<Friend, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("send_friend_request")?;
        let me = inner.caller(token)?;
        if me == friend_id {
            return Err(status(400, "Cannot add yourself as a friend"));
        }
        inner.user(friend_id)?;
        if inner.friends.iter().any(|f| f.connects(me, friend_id)) {
            return Err(status(400, "Friend request already exists"));
        }
        let id = inner.next_id();
        let edge = Friend {
            id,
            user_id: me,
            friend_id,
            status: FriendStatus::Pending,
            created_at: CREATED_AT.to_string(),
            user: None,
            friend: None,
        };
        inner.friends.push(edge.clone());
        Ok(edge)
    }

    async fn accept_friend_request(&self, token: &str, request_id: i64) -> Result<Friend, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("accept_friend_request")?;
        let me = inner.caller(token)?;
        let edge = inner
            .friends
            .iter_mut()
            .find(|f| f.id == request_id && f.friend_id == me && f.status == FriendStatus::Pending)
            .ok_or_else(|| status(404, "Friend request not found"))?;
        edge.status = FriendStatus::Accepted;
        Ok(edge.clone())
    }

    async fn reject_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<FriendRejectResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("reject_friend_request")?;
        let me = inner.caller(token)?;
        let index = inner
            .friends
            .iter()
            .position(|f| f.id == request_id && f.friend_id == me && f.status == FriendStatus::Pending)
            .ok_or_else(|| status(404, "Friend request not found"))?;
        inner.friends.remove(index);
        Ok(FriendRejectResponse {
            status: "rejected".to_string(),
        })
    }

    async fn search_users(&self, token: &str, username: &str) -> Result<Vec<UserProfile>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("search_users")?;
        let me = inner.caller(token)?;
        let needle = username.to_lowercase();
        Ok(inner
            .users
            .values()
            .filter(|u| u.id != me && u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn transaction_partners(&self, token: &str) -> Result<Vec<UserProfile>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("transaction_partners")?;
        let me = inner.caller(token)?;
        let listings: Vec<Listing> = inner.listings.values().cloned().collect();
        transaction_partners(&listings, me)
            .into_iter()
            .map(|id| inner.user(id))
            .collect()
    }

    async fn upload_avatar(
        &self,
        token: &str,
        user_id: i64,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<AvatarResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("upload_avatar")?;
        let me = inner.caller(token)?;
        if me != user_id {
            return Err(status(403, "Cannot change another user's avatar"));
        }
        let avatar_url = format!("/static/avatars/{}_{}", me, file_name);
        if let Some(user) = inner.users.get_mut(&me) {
            user.avatar = Some(avatar_url.clone());
        }
        Ok(AvatarResponse { avatar_url })
    }

    async fn transactions(&self, token: &str, user_id: i64) -> Result<Vec<Transaction>, ApiError> {
        let mut inner = self.inner.lock();
        inner.enter("transactions")?;
        inner.caller(token)?;
        Ok(inner
            .transactions
            .iter()
            .rev()
            .filter(|t| t.from_user_id == user_id || t.to_user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Counterparties of `me` across completed listings, most recent listing first,
/// each user once.
fn transaction_partners(listings: &[Listing], me: i64) -> Vec<i64> {
    let mut seen: BTreeMap<i64, i64> = BTreeMap::new();

    for listing in listings
        .iter()
        .filter(|l| l.status == ListingStatus::Completed)
    {
        let partner = if listing.user_id == me {
            listing.worker_ref()
        } else if listing.worker_ref() == Some(me) {
            Some(listing.user_id)
        } else {
            None
        };

        if let Some(partner) = partner.filter(|p| *p != me) {
            let latest = seen.entry(partner).or_insert(listing.id);
            *latest = (*latest).max(listing.id);
        }
    }

    let mut partners: Vec<(i64, i64)> = seen.into_iter().collect();
    partners.sort_by(|a, b| b.1.cmp(&a.1));
    partners.into_iter().map(|(user, _)| user).collect()
}

mod tests {
    use super::*;
    use shared::dto::ListingType;

    const ME: i64 = 1;

    #[test]
    fn test_transaction_partners() {
        let listing = |id: i64, user_id: i64, worker_id: i64, status: ListingStatus| Listing {
            id,
            user_id,
            worker_id: Some(worker_id),
            title: "T".to_string(),
            description: "D".to_string(),
            hours: 1.0,
            listing_type: ListingType::Request,
            status,
            created_at: "2024-05-01T10:00:00".to_string(),
            prepayment_transaction_id: None,
            creator: None,
            worker: None,
        };

        let listings = vec![
            listing(1, ME, 2, ListingStatus::Completed),
            listing(2, 3, ME, ListingStatus::Completed),
            listing(3, ME, 2, ListingStatus::Completed),
            listing(4, ME, 4, ListingStatus::InProgress),
            listing(5, 6, 7, ListingStatus::Completed),
        ];

        assert_eq!(transaction_partners(&listings, ME), vec![2, 3]);
    }
}
