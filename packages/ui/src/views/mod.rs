mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod directory;
pub use directory::DirectoryView;
