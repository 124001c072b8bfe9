use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
