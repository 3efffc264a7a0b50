#![allow(dead_code)]

use std::sync::Arc;

use spese_core::categories::{CategoryRepository, CategoryService};
use spese_core::db::{self, DbPool};
use spese_core::expenses::{ExpenseRepository, ExpenseService};
use spese_core::importer::ImportService;
use spese_core::users::{NewUser, User, UserRepository, UserService, UserServiceTrait};
use tempfile::TempDir;

/// Fresh on-disk database plus the wired-up service stack. Keep the
/// TempDir alive for the duration of the test.
pub struct TestContext {
    pub pool: Arc<DbPool>,
    pub user_service: UserService,
    pub category_service: Arc<CategoryService>,
    pub expense_service: ExpenseService,
    pub import_service: ImportService,
    pub expense_repository: Arc<ExpenseRepository>,
    _data_dir: TempDir,
}

pub fn setup() -> TestContext {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(data_dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    let user_service = UserService::new(Arc::new(UserRepository::new(pool.clone())));
    let category_service = Arc::new(CategoryService::new(Arc::new(CategoryRepository::new(
        pool.clone(),
    ))));
    let expense_repository = Arc::new(ExpenseRepository::new(pool.clone()));
    let expense_service =
        ExpenseService::new(expense_repository.clone(), category_service.clone());
    let import_service = ImportService::new(expense_repository.clone(), category_service.clone());

    TestContext {
        pool,
        user_service,
        category_service,
        expense_service,
        import_service,
        expense_repository,
        _data_dir: data_dir,
    }
}

pub fn create_user(ctx: &TestContext, username: &str) -> User {
    ctx.user_service
        .create_user(NewUser {
            id: None,
            username: username.to_string(),
        })
        .expect("Failed to create user")
}
