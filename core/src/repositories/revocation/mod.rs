pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod disabled;
pub mod memory;

pub use disabled::DisabledRevocationStore;
pub use memory::InMemoryRevocationStore;
pub use r#trait::RevocationStore;
