pub mod user_repo;
pub use user_repo::UserRepository;
pub mod venda_repo;
pub use venda_repo::VendaRepository;
