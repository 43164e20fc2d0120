pub mod device;
pub mod role;
pub mod user;

pub use device::PostgresDeviceRepository;
pub use role::PostgresRoleRepository;
pub use user::PostgresUserRepository;
