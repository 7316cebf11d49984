//! Mock data and service layer for the test hub.
//!
//! In-memory user and post endpoints with simulated latency, plus injectable
//! network and server failure simulators and form validation.

pub mod crud;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod network;
pub mod query;
pub mod response;
pub mod server;
pub mod store;
pub mod validation;

pub use crud::{CrudService, DEFAULT_LATENCY, ServiceConfig};
pub use error::{FieldValidationError, MockError};
pub use model::{
    Author, CreatePostInput, CreateUserInput, LikeToggle, Post, PostStatus, Role,
    UpdatePostInput, UpdateUserInput, User,
};
pub use network::{
    NetworkFault, NetworkSimulator, RequestLog, RequestOutcome, RequestStats, RequestStatus,
    SimulatedResponse, SimulatorConfig,
};
pub use query::{PostFilters, PostQuery, PostStats, SortBy, SortOrder};
pub use response::{ApiResponse, CursorPage, Metadata};
pub use server::{
    HttpStatus, MetricLevel, ServerConfig, ServerLogEntry, ServerMetrics, ServerSimulator,
    StatusClass,
};
pub use store::{MockStore, PostStore, UserStore};
pub use validation::{
    PasswordStrength, UserForm, ValidationResult, password_strength, validate_create_user,
};

/// User endpoint.
pub type UserService = CrudService<UserStore>;

/// Post endpoint.
pub type PostService = CrudService<PostStore>;
