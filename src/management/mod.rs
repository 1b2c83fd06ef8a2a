mod identity;
mod library;

pub use identity::IdentityManager;
pub use library::LibraryManager;
