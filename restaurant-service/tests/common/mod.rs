use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;
use restaurant_service::domain::authentication::errors::AuthError;
use restaurant_service::domain::authentication::models::Credential;
use restaurant_service::domain::authentication::models::DisplayName;
use restaurant_service::domain::authentication::models::EmailAddress;
use restaurant_service::domain::authentication::models::RefreshToken;
use restaurant_service::domain::authentication::models::User;
use restaurant_service::domain::authentication::models::UserId;
use restaurant_service::domain::authentication::ports::CredentialStore;
use restaurant_service::domain::authentication::service::AuthService;
use restaurant_service::domain::restaurant::errors::RestaurantError;
use restaurant_service::domain::restaurant::models::Coordinates;
use restaurant_service::domain::restaurant::models::Photo;
use restaurant_service::domain::restaurant::models::RecordEntry;
use restaurant_service::domain::restaurant::models::Restaurant;
use restaurant_service::domain::restaurant::models::SearchRecord;
use restaurant_service::domain::restaurant::ports::PlacesClient;
use restaurant_service::domain::restaurant::ports::RecordRepository;
use restaurant_service::domain::restaurant::service::RestaurantService;
use restaurant_service::inbound::http::router::create_router;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryCredentialStore>,
    pub records: Arc<InMemoryRecordRepository>,
    pub api_client: reqwest::Client,
    pub tokens: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryCredentialStore::default());
        let records = Arc::new(InMemoryRecordRepository::new(Arc::clone(&store)));

        let authenticator = Arc::new(Authenticator::new(
            PasswordHasher::with_cost(PasswordHasher::MIN_COST).unwrap(),
            TokenService::new(ACCESS_SECRET, REFRESH_SECRET),
        ));

        let auth_service = Arc::new(AuthService::new(Arc::clone(&store), authenticator));
        let restaurant_service = Arc::new(RestaurantService::new(
            Arc::new(StubPlacesClient),
            Arc::clone(&records),
        ));

        let router = create_router(auth_service, restaurant_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            records,
            api_client: reqwest::Client::new(),
            tokens: TokenService::new(ACCESS_SECRET, REFRESH_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/registration")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in a fresh user, returning `(access_token, refresh_token)`.
    pub async fn signed_in_user(&self, email: &str) -> (String, String) {
        let response = self.register("Test User", email, "Password1@").await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = self
            .login(email, "Password1@")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    credentials: HashMap<UserId, Credential>,
    refresh_tokens: HashMap<String, RefreshToken>,
}

/// Credential store holding everything in memory, enforcing email uniqueness
#[derive(Default)]
pub struct InMemoryCredentialStore {
    state: Mutex<StoreState>,
}

impl InMemoryCredentialStore {
    pub fn refresh_token_count(&self) -> usize {
        self.state.lock().unwrap().refresh_tokens.len()
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        let user = state.users.iter().find(|u| u.email.as_str() == email)?;
        state
            .credentials
            .get(&user.id)
            .map(|c| c.password_hash.clone())
    }

    fn email_of(&self, user_id: &UserId) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|u| u.id == *user_id)
            .map(|u| u.email.as_str().to_string())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == *email).cloned())
    }

    async fn create_user(
        &self,
        name: &DisplayName,
        email: &EmailAddress,
    ) -> Result<User, AuthError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.email == *email) {
            return Err(AuthError::DuplicateEmail(email.as_str().to_string()));
        }
        let user = User {
            id: UserId::new(),
            name: name.clone(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn create_credential(
        &self,
        user_id: &UserId,
        password_hash: &str,
    ) -> Result<Credential, AuthError> {
        let credential = Credential {
            user_id: *user_id,
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .credentials
            .insert(*user_id, credential.clone());
        Ok(credential)
    }

    async fn find_credential_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Credential>, AuthError> {
        Ok(self.state.lock().unwrap().credentials.get(user_id).cloned())
    }

    async fn create_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
    ) -> Result<RefreshToken, AuthError> {
        let refresh_token = RefreshToken {
            user_id: *user_id,
            token: token.to_string(),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .refresh_tokens
            .insert(token.to_string(), refresh_token.clone());
        Ok(refresh_token)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .refresh_tokens
            .get(token)
            .cloned())
    }

    async fn delete_refresh_token(&self, token: &str) -> Result<u64, AuthError> {
        let removed = self.state.lock().unwrap().refresh_tokens.remove(token);
        Ok(u64::from(removed.is_some()))
    }
}

/// Search log joined against the in-memory credential store for emails
pub struct InMemoryRecordRepository {
    users: Arc<InMemoryCredentialStore>,
    records: Mutex<Vec<SearchRecord>>,
}

impl InMemoryRecordRepository {
    pub fn new(users: Arc<InMemoryCredentialStore>) -> Self {
        Self {
            users,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn insert(&self, record: SearchRecord) -> Result<(), RestaurantError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<RecordEntry>, RestaurantError> {
        let records = self.records.lock().unwrap().clone();
        let mut entries: Vec<RecordEntry> = records
            .into_iter()
            .filter_map(|record| {
                let email = self.users.email_of(&record.user_id)?;
                Some(RecordEntry {
                    email,
                    city: record.city,
                    latitude: record.coordinates.latitude(),
                    longitude: record.coordinates.longitude(),
                    created_at: record.created_at,
                })
            })
            .collect();
        // Newest first; later inserts win timestamp ties
        entries.reverse();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}

/// Places provider knowing a single city
pub struct StubPlacesClient;

pub const BOGOTA: (f64, f64) = (4.711, -74.0721);

#[async_trait]
impl PlacesClient for StubPlacesClient {
    async fn locate_city(&self, city: &str) -> Result<Option<Coordinates>, RestaurantError> {
        if city == "Bogota" {
            Ok(Some(Coordinates::new(BOGOTA.0, BOGOTA.1)?))
        } else {
            Ok(None)
        }
    }

    async fn nearby_restaurants(
        &self,
        _location: &Coordinates,
    ) -> Result<Vec<Restaurant>, RestaurantError> {
        Ok(vec![
            Restaurant {
                name: "Andres Carne de Res".to_string(),
                rating: Some(4.6),
                address: "Calle 3 #11a-56, Chia".to_string(),
                photos: vec![Photo {
                    photo_reference: "abc".to_string(),
                    width: 400,
                    height: 300,
                    html_attributions: vec![],
                }],
            },
            Restaurant {
                name: "Unrated".to_string(),
                rating: None,
                address: Restaurant::UNKNOWN_ADDRESS.to_string(),
                photos: vec![],
            },
        ])
    }
}

/// Access token for `user_id` that expired a minute ago.
pub fn expired_access_token(user_id: &str) -> String {
    TokenService::new(ACCESS_SECRET, REFRESH_SECRET)
        .with_ttls(chrono::Duration::seconds(-60), chrono::Duration::seconds(-60))
        .issue_access_token(user_id)
        .unwrap()
}
