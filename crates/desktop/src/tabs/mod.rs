pub mod control_panel;
pub mod demo_tab;
pub mod explanation_tab;
pub mod preferences_tab;
