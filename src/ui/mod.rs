//! # User Interface Module
//!
//! Dear ImGui overlay for the demo: the [`UiManager`] wires ImGui into winit
//! and wgpu, and [`parameter_panel`] draws the controls that edit the
//! [`ParameterSet`](crate::params::ParameterSet).
//!
//! ## Usage
//!
//! ```no_run
//! use shadowbox::params::ParameterSet;
//! use shadowbox::ui::parameter_panel;
//!
//! fn build(ui: &imgui::Ui, params: &mut ParameterSet) {
//!     for change in parameter_panel(ui, params) {
//!         println!("{:?}", change);
//!     }
//! }
//! ```

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::parameter_panel;
