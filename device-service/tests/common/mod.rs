use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::RequestAuthorizer;
use auth::TokenCodec;
use auth::TokenConfig;
use device_service::domain::device::errors::DeviceError;
use device_service::domain::device::models::Device;
use device_service::domain::device::models::DeviceDetails;
use device_service::domain::device::models::DeviceId;
use device_service::domain::device::models::DeviceName;
use device_service::domain::device::ports::DeviceRepository;
use device_service::domain::device::service::DeviceService;
use device_service::domain::role::errors::RoleError;
use device_service::domain::role::models::Role;
use device_service::domain::role::models::RoleId;
use device_service::domain::role::models::RoleName;
use device_service::domain::role::ports::RoleRepository;
use device_service::domain::role::service::RoleService;
use device_service::domain::user::models::EmailAddress;
use device_service::domain::user::models::NewUser;
use device_service::domain::user::models::User;
use device_service::domain::user::models::UserId;
use device_service::domain::user::models::UserProfile;
use device_service::domain::user::ports::UserRepository;
use device_service::domain::user::service::UserService;
use device_service::inbound::http::router::create_router;
use device_service::inbound::http::router::AppState;
use device_service::user::errors::UserError;
use serde_json::json;
use serde_json::Value;

pub const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

pub const ADMIN_ROLE: i32 = 1;
pub const TECHNICIAN_ROLE: i32 = 2;
pub const VIEWER_ROLE: i32 = 3;

/// Live-row store shared by all three repository ports.
///
/// Uniqueness is checked under the same lock as the insert, like a unique
/// index would.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    roles: Vec<(Role, bool)>,
    users: Vec<(User, bool)>,
    devices: Vec<(Device, bool)>,
}

impl InMemoryStore {
    /// Store seeded with the three built-in roles.
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut tables = store.inner.lock().unwrap();
            for (id, name) in [
                (ADMIN_ROLE, RoleName::ADMIN),
                (TECHNICIAN_ROLE, RoleName::TECHNICIAN),
                (VIEWER_ROLE, RoleName::VIEWER),
            ] {
                tables.roles.push((
                    Role {
                        id: RoleId(id),
                        name: RoleName::new(name.to_string()).unwrap(),
                    },
                    false,
                ));
            }
        }
        store
    }

    pub fn live_user_count(&self, email: &str) -> usize {
        let tables = self.inner.lock().unwrap();
        tables
            .users
            .iter()
            .filter(|(user, deleted)| !deleted && user.email.as_str() == email)
            .count()
    }

    /// Soft-delete a role without checking its users, leaving them dangling.
    pub fn retire_role(&self, id: i32) {
        let mut tables = self.inner.lock().unwrap();
        for (role, deleted) in tables.roles.iter_mut() {
            if role.id == RoleId(id) {
                *deleted = true;
            }
        }
    }

    fn role_assigned(tables: &Tables, id: RoleId) -> bool {
        tables
            .users
            .iter()
            .any(|(user, deleted)| !deleted && user.role_id == id)
    }

    fn next_id(len: usize) -> i32 {
        i32::try_from(len).unwrap() + 1
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn create(&self, name: RoleName, _created_by: &str) -> Result<Role, RoleError> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .roles
            .iter()
            .any(|(role, deleted)| !deleted && role.name == name)
        {
            return Err(RoleError::NameAlreadyExists(name.to_string()));
        }

        let role = Role {
            id: RoleId(Self::next_id(tables.roles.len())),
            name,
        };
        tables.roles.push((role.clone(), false));
        Ok(role)
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .roles
            .iter()
            .find(|(role, deleted)| !deleted && role.id == id)
            .map(|(role, _)| role.clone()))
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, RoleError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .roles
            .iter()
            .find(|(role, deleted)| !deleted && &role.name == name)
            .map(|(role, _)| role.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Role>, RoleError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .roles
            .iter()
            .filter(|(_, deleted)| !deleted)
            .map(|(role, _)| role.clone())
            .collect())
    }

    async fn update(&self, role: Role, _updated_by: &str) -> Result<Role, RoleError> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .roles
            .iter()
            .any(|(other, deleted)| !deleted && other.id != role.id && other.name == role.name)
        {
            return Err(RoleError::NameAlreadyExists(role.name.to_string()));
        }

        let slot = tables
            .roles
            .iter_mut()
            .find(|(other, deleted)| !deleted && other.id == role.id)
            .ok_or(RoleError::NotFound(role.id))?;
        slot.0 = role.clone();
        Ok(role)
    }

    async fn is_assigned(&self, id: RoleId) -> Result<bool, RoleError> {
        let tables = self.inner.lock().unwrap();
        Ok(Self::role_assigned(&tables, id))
    }

    async fn delete(&self, id: RoleId, _deleted_by: &str) -> Result<(), RoleError> {
        let mut tables = self.inner.lock().unwrap();
        if Self::role_assigned(&tables, id) {
            return Err(RoleError::InUse(id));
        }
        let slot = tables
            .roles
            .iter_mut()
            .find(|(role, deleted)| !deleted && role.id == id)
            .ok_or(RoleError::NotFound(id))?;
        slot.1 = true;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|(existing, deleted)| !deleted && existing.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if !tables
            .roles
            .iter()
            .any(|(role, _)| role.id == user.role_id)
        {
            return Err(UserError::RoleNotFound(user.role_id));
        }

        let created = User {
            id: UserId(Self::next_id(tables.users.len())),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
        };
        tables.users.push((created.clone(), false));
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|(user, deleted)| !deleted && user.id == id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|(user, deleted)| !deleted && &user.email == email)
            .map(|(user, _)| user.clone()))
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserError> {
        Ok(self
            .list_profiles()
            .await?
            .into_iter()
            .find(|profile| &profile.email == email))
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|(_, deleted)| !deleted)
            .filter_map(|(user, _)| {
                tables
                    .roles
                    .iter()
                    .find(|(role, _)| role.id == user.role_id)
                    .map(|(role, _)| UserProfile {
                        id: user.id,
                        name: user.name.clone(),
                        email: user.email.clone(),
                        role: role.name.clone(),
                    })
            })
            .collect())
    }

    async fn update(&self, user: User, _updated_by: &str) -> Result<User, UserError> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|(other, deleted)| !deleted && other.id != user.id && other.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let slot = tables
            .users
            .iter_mut()
            .find(|(other, deleted)| !deleted && other.id == user.id)
            .ok_or(UserError::NotFound(user.id))?;
        slot.0 = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: UserId, _deleted_by: &str) -> Result<(), UserError> {
        let mut tables = self.inner.lock().unwrap();
        let slot = tables
            .users
            .iter_mut()
            .find(|(user, deleted)| !deleted && user.id == id)
            .ok_or(UserError::NotFound(id))?;
        slot.1 = true;
        Ok(())
    }
}

#[async_trait]
impl DeviceRepository for InMemoryStore {
    async fn create(
        &self,
        details: DeviceDetails,
        _created_by: &str,
    ) -> Result<Device, DeviceError> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .devices
            .iter()
            .any(|(device, deleted)| !deleted && device.name == details.name)
        {
            return Err(DeviceError::NameAlreadyExists(details.name.to_string()));
        }

        let device = Device {
            id: DeviceId(Self::next_id(tables.devices.len())),
            name: details.name,
            location: details.location,
            status: details.status,
        };
        tables.devices.push((device.clone(), false));
        Ok(device)
    }

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DeviceError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .devices
            .iter()
            .find(|(device, deleted)| !deleted && device.id == id)
            .map(|(device, _)| device.clone()))
    }

    async fn find_by_name(&self, name: &DeviceName) -> Result<Option<Device>, DeviceError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .devices
            .iter()
            .find(|(device, deleted)| !deleted && &device.name == name)
            .map(|(device, _)| device.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceError> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .devices
            .iter()
            .filter(|(_, deleted)| !deleted)
            .map(|(device, _)| device.clone())
            .collect())
    }

    async fn update(
        &self,
        id: DeviceId,
        details: DeviceDetails,
        _updated_by: &str,
    ) -> Result<(), DeviceError> {
        let mut tables = self.inner.lock().unwrap();
        let slot = tables
            .devices
            .iter_mut()
            .find(|(device, deleted)| !deleted && device.id == id)
            .ok_or(DeviceError::NotFound(id))?;
        slot.0 = Device {
            id,
            name: details.name,
            location: details.location,
            status: details.status,
        };
        Ok(())
    }

    async fn delete(&self, id: DeviceId, _deleted_by: &str) -> Result<(), DeviceError> {
        let mut tables = self.inner.lock().unwrap();
        let slot = tables
            .devices
            .iter_mut()
            .find(|(device, deleted)| !deleted && device.id == id)
            .ok_or(DeviceError::NotFound(id))?;
        slot.1 = true;
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub token_codec: TokenCodec,
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

        let store = Arc::new(InMemoryStore::seeded());
        let token_config = TokenConfig::new(SECRET, chrono::Duration::hours(24));
        let authenticator = Arc::new(Authenticator::new(&token_config));
        let authorizer = Arc::new(RequestAuthorizer::new(TokenCodec::new(&token_config)));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                authenticator,
            )),
            role_service: Arc::new(RoleService::new(Arc::clone(&store))),
            device_service: Arc::new(DeviceService::new(Arc::clone(&store))),
        };

        let router = create_router(state, authorizer, Duration::from_secs(30));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            token_codec: TokenCodec::new(&token_config),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: i32,
    ) -> reqwest::Response {
        self.post("/user/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to send register request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/user/login")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Register a user with the given role and return a fresh access token.
    pub async fn token_for(&self, email: &str, role: i32) -> String {
        let response = self.register("Test User", email, "password123", role).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = self.login(email, "password123").await.json().await.unwrap();
        body["data"]["token"].as_str().unwrap().to_string()
    }
}
